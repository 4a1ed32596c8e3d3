//! System configuration parameters
//!
//! All tunable parameters for the DoorGuard panel.  Defaults reproduce the
//! timing and joystick calibration of the shipped board; a JSON file can
//! override any subset of them (see [`crate::adapters::config_file`]).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Inclusive `[low, high]` range of raw ADC counts treated as "at rest".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestBand {
    pub low: u16,
    pub high: u16,
}

impl RestBand {
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// True if `raw` lies inside the band (bounds included).
    pub fn contains(&self, raw: u16) -> bool {
        raw >= self.low && raw <= self.high
    }
}

/// Upper bound for every millisecond field.  Keeps deadlines well inside
/// the wrap-safe half of the `u32` millisecond clock.
pub const MAX_DURATION_MS: u32 = 60_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Input ---
    /// Shared debounce window across all buttons (milliseconds)
    pub debounce_ms: u32,
    /// Joystick X rest band; samples outside it count as motion
    pub joystick_x_band: RestBand,
    /// Joystick Y rest band; deliberately not symmetric with X
    pub joystick_y_band: RestBand,

    // --- Feedback ---
    /// How long a motion event holds the motion flag/LED (milliseconds)
    pub motion_hold_ms: u32,
    /// Buzzer pulse-train length requested by the alarm (milliseconds)
    pub alarm_pulse_ms: u32,
    /// High phase of one buzzer period (milliseconds)
    pub buzzer_on_ms: u32,
    /// Low phase of one buzzer period (milliseconds)
    pub buzzer_off_ms: u32,

    // --- Timing ---
    /// Main loop rest between iterations (milliseconds)
    pub loop_interval_ms: u32,
    /// Settle time before peripherals are touched at boot (milliseconds)
    pub boot_settle_ms: u32,

    // --- Logging ---
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Input
            debounce_ms: 300,
            joystick_x_band: RestBand::new(1900, 2050),
            joystick_y_band: RestBand::new(1950, 2250),

            // Feedback
            motion_hold_ms: 5000,
            alarm_pulse_ms: 5000,
            buzzer_on_ms: 1,
            buzzer_off_ms: 3,

            // Timing
            loop_interval_ms: 100, // 10 Hz
            boot_settle_ms: 2000,

            log_filter: String::from("info"),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationFailed("debounce_ms must be > 0"));
        }
        if self.loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be > 0"));
        }
        if self.buzzer_on_ms == 0 || self.buzzer_off_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "buzzer_on_ms and buzzer_off_ms must be > 0",
            ));
        }
        if self.motion_hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("motion_hold_ms must be > 0"));
        }
        if self.alarm_pulse_ms == 0 {
            return Err(ConfigError::ValidationFailed("alarm_pulse_ms must be > 0"));
        }
        let durations = [
            self.debounce_ms,
            self.motion_hold_ms,
            self.alarm_pulse_ms,
            self.buzzer_on_ms,
            self.buzzer_off_ms,
            self.loop_interval_ms,
            self.boot_settle_ms,
        ];
        if durations.iter().any(|&ms| ms > MAX_DURATION_MS) {
            return Err(ConfigError::ValidationFailed(
                "durations must be <= MAX_DURATION_MS (60000 ms)",
            ));
        }
        for band in [self.joystick_x_band, self.joystick_y_band] {
            if band.low > band.high {
                return Err(ConfigError::ValidationFailed("joystick band low > high"));
            }
            if band.high > pins::ADC_MAX {
                return Err(ConfigError::ValidationFailed("joystick band above ADC full scale"));
            }
        }
        Ok(())
    }
}
