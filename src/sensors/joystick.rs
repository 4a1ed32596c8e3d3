//! Two-axis analog joystick used as a motion sensor proxy.
//!
//! Each axis is a potentiometer on a 12-bit ADC channel (0–4095).  At rest
//! the stick reads roughly mid-scale; a sample outside the rest band on
//! **either** axis counts as motion.
//!
//! The bands are per-axis and not symmetric (X `[1900, 2050]`,
//! Y `[1950, 2250]` by default).  They match the board's calibration and
//! are kept as measured.

use crate::app::ports::{Axis, JoystickPort};
use crate::config::{RestBand, SystemConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
}

/// Read both axes, X first.
pub fn sample(joystick: &mut impl JoystickPort) -> JoystickSample {
    let x = joystick.sample_axis(Axis::X);
    let y = joystick.sample_axis(Axis::Y);
    JoystickSample { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionDetector {
    x_band: RestBand,
    y_band: RestBand,
}

impl MotionDetector {
    pub const fn new(x_band: RestBand, y_band: RestBand) -> Self {
        Self { x_band, y_band }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.joystick_x_band, config.joystick_y_band)
    }

    pub fn is_motion(&self, x: u16, y: u16) -> bool {
        !self.x_band.contains(x) || !self.y_band.contains(y)
    }

    pub fn detect(&self, sample: JoystickSample) -> bool {
        self.is_motion(sample.x, sample.y)
    }
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}
