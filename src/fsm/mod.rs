//! Security state machine: pure transition functions over [`SecurityState`].
//!
//! ```text
//!            ┌───────────────────┐
//!  event ───▶│ dispatch(state,   │───▶ Transition { next, effects }
//!            │          event)   │         │
//!            └───────────────────┘         ├─▶ Led(..)         ─▶ IndicatorPort
//!                                          ├─▶ PulseBuzzer     ─▶ coordinator
//!                                          ├─▶ SilenceBuzzer   ─▶ IndicatorPort
//!                                          ├─▶ HoldMotion      ─▶ coordinator
//!                                          └─▶ RefreshDisplay  ─▶ presenter
//! ```
//!
//! Every handler is a total function: a request that does not apply (open
//! while the owner is away, say) returns the unchanged state and an empty
//! effect list.  Nothing here touches hardware; the
//! [`AppService`](crate::app::service::AppService) executes the effects.

pub mod state;
pub mod transitions;

pub use state::{Led, SecurityState};

use crate::app::commands::Command;
use crate::config::SystemConfig;
use crate::drivers::button::InputEvent;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything that can drive a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityEvent {
    /// Button A (debounced).
    ToggleDoorRequest,
    /// Button B (debounced).
    ToggleProximityRequest,
    /// Joystick push (debounced).
    TriggerAlarmRequest,
    /// Joystick left its rest band.
    MotionDetected,
    /// The motion hold window elapsed.
    MotionHoldExpired,
    /// Debug channel override.
    Command(Command),
}

impl From<InputEvent> for SecurityEvent {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::ToggleDoorRequest => Self::ToggleDoorRequest,
            InputEvent::ToggleProximityRequest => Self::ToggleProximityRequest,
            InputEvent::TriggerAlarmRequest => Self::TriggerAlarmRequest,
        }
    }
}

impl From<Command> for SecurityEvent {
    fn from(cmd: Command) -> Self {
        Self::Command(cmd)
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Side effects requested by a transition, executed in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Drive one indicator LED.
    Led(Led, bool),
    /// Queue a buzzer pulse train of the given length.
    PulseBuzzer { duration_ms: u32 },
    /// Force the buzzer output low and drop any queued pulse train.
    SilenceBuzzer,
    /// Start the motion hold window; expiry is fed back as
    /// [`SecurityEvent::MotionHoldExpired`].
    HoldMotion { duration_ms: u32 },
    /// Re-render the display from the new state.
    RefreshDisplay,
}

/// Upper bound on effects produced by a single handler.
pub const MAX_EFFECTS: usize = 8;

/// Fixed-capacity effect list (no heap).
pub type Effects = heapless::Vec<Effect, MAX_EFFECTS>;

/// Result of applying one event: the next state plus its side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SecurityState,
    pub effects: Effects,
}

impl Transition {
    /// A silent no-op: same state, nothing to do.
    pub fn unchanged(state: &SecurityState) -> Self {
        Self {
            next: *state,
            effects: Effects::new(),
        }
    }

    /// Start from `state` and accumulate effects with [`push`](Self::push).
    pub(crate) fn from_state(state: &SecurityState) -> Self {
        Self::unchanged(state)
    }

    pub(crate) fn push(&mut self, effect: Effect) {
        if self.effects.push(effect).is_err() {
            debug_assert!(false, "effect list overflow: {effect:?}");
        }
    }

    /// True if the transition produced no effects (the request was ignored).
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }

    /// True if the transition asks for a display refresh.
    pub fn refreshes_display(&self) -> bool {
        self.effects.contains(&Effect::RefreshDisplay)
    }
}

// ---------------------------------------------------------------------------
// Rules (timing parameters carried by effects)
// ---------------------------------------------------------------------------

/// Durations attached to the timed effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub alarm_pulse_ms: u32,
    pub motion_hold_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&SystemConfig::default())
    }
}

impl From<&SystemConfig> for Rules {
    fn from(config: &SystemConfig) -> Self {
        Self {
            alarm_pulse_ms: config.alarm_pulse_ms,
            motion_hold_ms: config.motion_hold_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Route one event to its handler.
pub fn dispatch(state: &SecurityState, event: SecurityEvent, rules: &Rules) -> Transition {
    use transitions as t;

    match event {
        SecurityEvent::ToggleDoorRequest => t::on_toggle_door_request(state),
        SecurityEvent::ToggleProximityRequest => t::on_toggle_proximity_request(state),
        SecurityEvent::TriggerAlarmRequest => t::on_trigger_alarm_request(state, rules),
        SecurityEvent::MotionDetected => t::on_motion_detected(state, rules),
        SecurityEvent::MotionHoldExpired => t::on_motion_hold_expired(state),
        SecurityEvent::Command(cmd) => t::on_command(state, cmd, rules),
    }
}
