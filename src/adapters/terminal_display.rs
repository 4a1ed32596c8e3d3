//! Text-mode stand-in for the SSD1306 OLED.
//!
//! Keeps a four-row frame buffer and logs the whole frame on every
//! `flush`, the point at which the real panel would receive it over I2C.

use log::{info, warn};

use crate::app::ports::{DISPLAY_ROWS, DisplayPort};
use crate::pins;

pub struct TerminalDisplay {
    rows: [String; DISPLAY_ROWS as usize],
    frames: u64,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        info!(
            "TerminalDisplay: {}x{} @ I2C 0x{:02X} (SDA GPIO{}, SCL GPIO{})",
            pins::DISPLAY_WIDTH_PX,
            pins::DISPLAY_HEIGHT_PX,
            pins::DISPLAY_I2C_ADDR,
            pins::I2C_SDA_GPIO,
            pins::I2C_SCL_GPIO,
        );
        Self {
            rows: Default::default(),
            frames: 0,
        }
    }

    /// Current buffer contents, top row first.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DisplayPort for TerminalDisplay {
    fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    fn draw_line(&mut self, text: &str, row: u8) {
        let Some(slot) = self.rows.get_mut(row as usize) else {
            warn!("TerminalDisplay: row {} out of range", row);
            return;
        };
        slot.clear();
        slot.push_str(text);
    }

    fn flush(&mut self) {
        self.frames += 1;
        info!("DISPLAY | frame {}", self.frames);
        for (row, text) in self.rows.iter().enumerate() {
            if !text.is_empty() {
                info!(
                    "DISPLAY |   ({:>3},{:>2}) {}",
                    pins::DISPLAY_TEXT_X,
                    pins::DISPLAY_ROW_Y[row],
                    text
                );
            }
        }
    }
}
