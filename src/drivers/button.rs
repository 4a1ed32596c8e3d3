//! Debounced button input for the three panel switches.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups.  Each line fires a
//! falling-edge interrupt; all three share one handler that branches on
//! the GPIO number.
//!
//! ## Debounce
//!
//! One [`DebounceGate`] is shared by **all** buttons: an edge is accepted
//! only if `debounce_ms` have passed since the last accepted edge on any
//! line.  Two presses on different buttons inside the window therefore
//! yield only the first.
//!
//! | Button      | GPIO | Event                    |
//! |-------------|------|--------------------------|
//! | A (door)    | 5    | `ToggleDoorRequest`      |
//! | B (owner)   | 6    | `ToggleProximityRequest` |
//! | Joystick SW | 22   | `TriggerAlarmRequest`    |

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embedded_hal::digital::{Error as _, InputPin};
use log::{debug, warn};

use crate::pins;

/// Watched buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Door,
    Proximity,
    Alarm,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Door, Button::Proximity, Button::Alarm];

    pub const fn gpio(self) -> i32 {
        match self {
            Self::Door => pins::BUTTON_DOOR_GPIO,
            Self::Proximity => pins::BUTTON_PROXIMITY_GPIO,
            Self::Alarm => pins::BUTTON_ALARM_GPIO,
        }
    }

    /// Map an interrupting GPIO back to its button.
    pub fn from_gpio(gpio: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.gpio() == gpio)
    }

    /// Logical event this button produces.
    pub const fn event(self) -> InputEvent {
        match self {
            Self::Door => InputEvent::ToggleDoorRequest,
            Self::Proximity => InputEvent::ToggleProximityRequest,
            Self::Alarm => InputEvent::TriggerAlarmRequest,
        }
    }
}

/// Logical button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    ToggleDoorRequest,
    ToggleProximityRequest,
    TriggerAlarmRequest,
}

/// An accepted (debounced) falling edge, tagged with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingEdge {
    pub button: Button,
    pub at_ms: u32,
}

impl FallingEdge {
    pub fn event(&self) -> InputEvent {
        self.button.event()
    }
}

// ── Debounce gate ─────────────────────────────────────────────

/// Single timestamp gate shared by every button line.
///
/// Written only from interrupt context (run-to-completion), so plain
/// atomic load/store is enough; no compare-exchange needed.
pub struct DebounceGate {
    window_ms: u32,
    last_ms: AtomicU32,
    /// False until the first edge is accepted.
    armed: AtomicBool,
}

impl DebounceGate {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_ms: AtomicU32::new(0),
            armed: AtomicBool::new(false),
        }
    }

    /// Accept the edge at `now_ms` if the window since the last accepted
    /// edge has elapsed, recording it as the new reference.
    pub fn admit(&self, now_ms: u32) -> bool {
        if self.armed.load(Ordering::Acquire) {
            let last = self.last_ms.load(Ordering::Acquire);
            if now_ms.wrapping_sub(last) < self.window_ms {
                return false;
            }
        }
        self.last_ms.store(now_ms, Ordering::Release);
        self.armed.store(true, Ordering::Release);
        true
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

// ── Interrupt path ────────────────────────────────────────────

/// Interrupt-side button decoder.
///
/// Shared by reference between the IRQ handler and whoever constructed
/// it; all methods take `&self`.
pub struct ButtonInput {
    gate: DebounceGate,
}

impl ButtonInput {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            gate: DebounceGate::new(debounce_ms),
        }
    }

    /// Falling-edge IRQ for `gpio`.  `pin_low` is the line level read in
    /// the handler.
    ///
    /// The gate is consulted (and consumed) before the GPIO is identified,
    /// so any edge on a watched line restarts the window even if it turns
    /// out to be a release bounce.
    pub fn on_falling_edge(&self, gpio: i32, pin_low: bool, now_ms: u32) -> Option<FallingEdge> {
        if !self.gate.admit(now_ms) {
            debug!("GPIO{} edge debounced", gpio);
            return None;
        }
        let Some(button) = Button::from_gpio(gpio) else {
            debug!("GPIO{} is not a watched button", gpio);
            return None;
        };
        if !pin_low {
            debug!("{:?} edge without low level", button);
            return None;
        }
        Some(FallingEdge {
            button,
            at_ms: now_ms,
        })
    }
}

// ── Polled path ───────────────────────────────────────────────

/// Software edge detector for boards without edge interrupts: sample each
/// button's level and report high→low transitions through the shared gate.
///
/// Polled alternative to [`ButtonInput`]; the simulator feeds presses
/// through the interrupt path instead.
pub struct EdgeDetector {
    gate: DebounceGate,
    /// Last sampled level per button; `true` = high (released).
    last_high: [bool; 3],
}

impl EdgeDetector {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            gate: DebounceGate::new(debounce_ms),
            last_high: [true; 3],
        }
    }

    /// Sample `pin` for `button`; returns an accepted falling edge, if any.
    pub fn poll_edge<P: InputPin>(
        &mut self,
        button: Button,
        pin: &mut P,
        now_ms: u32,
    ) -> Option<FallingEdge> {
        let high = match pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("{:?} read failed: {:?}", button, e.kind());
                return None;
            }
        };
        let idx = button as usize;
        let fell = self.last_high[idx] && !high;
        self.last_high[idx] = high;

        if fell && self.gate.admit(now_ms) {
            Some(FallingEdge {
                button,
                at_ms: now_ms,
            })
        } else {
            None
        }
    }
}
