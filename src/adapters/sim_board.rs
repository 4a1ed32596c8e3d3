//! Simulated board peripherals for running the panel on a host.
//!
//! - [`SimPin`]: an `embedded-hal` output that logs level changes.
//! - [`SimJoystick`]: a centred stick that a console "nudge" deflects for
//!   exactly one sample.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, trace};

use crate::app::ports::{Axis, JoystickPort};

// ── SimPin ────────────────────────────────────────────────────

pub struct SimPin {
    label: &'static str,
    gpio: i32,
    high: bool,
    /// Buzzer toggles every millisecond; log those at trace only.
    quiet: bool,
}

impl SimPin {
    pub fn new(label: &'static str, gpio: i32) -> Self {
        Self {
            label,
            gpio,
            high: false,
            quiet: false,
        }
    }

    pub fn quiet(label: &'static str, gpio: i32) -> Self {
        Self {
            quiet: true,
            ..Self::new(label, gpio)
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            let level = if high { "HIGH" } else { "LOW" };
            if self.quiet {
                trace!("GPIO{} {} -> {}", self.gpio, self.label, level);
            } else {
                debug!("GPIO{} {} -> {}", self.gpio, self.label, level);
            }
        }
        self.high = high;
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

// ── SimJoystick ───────────────────────────────────────────────

/// Resting position (inside both bands).
pub const REST: (u16, u16) = (1975, 2100);
/// Position reported after a nudge (hard left).
pub const DEFLECTED: (u16, u16) = (0, 2000);

pub struct SimJoystick {
    nudge: Arc<AtomicBool>,
    frame: (u16, u16),
}

/// Cloneable handle that deflects the stick from another thread.
#[derive(Clone)]
pub struct Nudger(Arc<AtomicBool>);

impl Nudger {
    pub fn nudge(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl Default for SimJoystick {
    fn default() -> Self {
        Self::new()
    }
}

impl SimJoystick {
    pub fn new() -> Self {
        Self {
            nudge: Arc::new(AtomicBool::new(false)),
            frame: REST,
        }
    }

    pub fn nudger(&self) -> Nudger {
        Nudger(Arc::clone(&self.nudge))
    }
}

impl JoystickPort for SimJoystick {
    /// X starts a new frame; Y reads the same frame.
    fn sample_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => {
                self.frame = if self.nudge.swap(false, Ordering::AcqRel) {
                    DEFLECTED
                } else {
                    REST
                };
                self.frame.0
            }
            Axis::Y => self.frame.1,
        }
    }
}
