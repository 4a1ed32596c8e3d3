//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / Coordinator (domain)
//! ```
//!
//! Driven adapters (indicators, display, command channel, joystick, event
//! sinks, config storage) implement these traits.  The
//! [`AppService`](super::service::AppService) and the loop
//! [`Coordinator`](crate::coordinator::Coordinator) consume them via
//! generics, so the domain core never touches hardware directly.
//!
//! Output ports are infallible from the domain's point of view: an
//! always-on panel has nothing useful to do with a failed LED write, so
//! adapters log such failures and carry on.

use crate::app::commands::Command;
use crate::config::SystemConfig;
use crate::fsm::Led;

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs + buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the four digital outputs.
pub trait IndicatorPort {
    /// Drive one indicator LED.
    fn set_led(&mut self, led: Led, on: bool);

    /// Drive the buzzer output level.
    fn set_buzzer(&mut self, on: bool);

    /// Every output low (boot and shutdown state).
    fn all_off(&mut self) {
        for led in Led::ALL {
            self.set_led(led, false);
        }
        self.set_buzzer(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → OLED)
// ───────────────────────────────────────────────────────────────

/// Text-row display with at least [`DISPLAY_ROWS`] fixed rows.
///
/// Drawing is buffered; nothing is visible until [`flush`](Self::flush).
pub trait DisplayPort {
    /// Blank the frame buffer.
    fn clear(&mut self);

    /// Draw `text` on fixed row `row` (0-based, top first).
    fn draw_line(&mut self, text: &str, row: u8);

    /// Transfer the frame buffer to the panel.
    fn flush(&mut self);
}

/// Rows every [`DisplayPort`] must provide.
pub const DISPLAY_ROWS: u8 = 4;

// ───────────────────────────────────────────────────────────────
// Command port (driving adapter: debug channel → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking intake of debug commands.
pub trait CommandPort {
    /// Return the next pending command, or `None` when idle.
    fn poll_command(&mut self) -> Option<Command>;
}

// ───────────────────────────────────────────────────────────────
// Joystick port (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// Analog axes of the joystick used as a motion sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// ADC mux channel for this axis.
    pub const fn adc_channel(self) -> u8 {
        let gpio = match self {
            Self::X => crate::pins::JOYSTICK_X_GPIO,
            Self::Y => crate::pins::JOYSTICK_Y_GPIO,
        };
        (gpio - crate::pins::ADC_BASE_GPIO) as u8
    }
}

/// Read-side port: one raw 12-bit sample (0–4095) per call.  Samples are
/// trusted as-is; no range validation happens downstream.
pub trait JoystickPort {
    fn sample_axis(&mut self, axis: Axis) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Monotonic clock port
// ───────────────────────────────────────────────────────────────

/// Milliseconds since boot, wrapping at `u32::MAX`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← config source)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.  There is deliberately no `save`: the panel
/// keeps nothing across power cycles.
///
/// Implementations MUST validate before returning; invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config source found (first boot / no file).
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
