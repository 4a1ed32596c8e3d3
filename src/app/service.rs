//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`SecurityState`] and is its only writer.  Each
//! event goes through the pure state machine, then the resulting effects
//! are executed against the ports passed in at the call site:
//!
//! ```text
//!  SecurityEvent ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                    │       AppService        │
//!  IndicatorPort ◀── │  fsm::dispatch · effects │ ──▶ DisplayPort
//!                    └────────────────────────┘
//!                      │ pulse / hold requests
//!                      ▼
//!                 Coordinator (takes them on its next step)
//! ```
//!
//! The display is re-rendered synchronously before `handle` returns, so no
//! later event can ever observe a stale frame.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::fsm::{self, Effect, Rules, SecurityEvent, SecurityState};

use super::events::AppEvent;
use super::ports::{DisplayPort, EventSink, IndicatorPort};
use super::presenter;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    state: SecurityState,
    rules: Rules,
    /// Pulse train requested since the coordinator last looked (ms).
    pending_pulse_ms: Option<u32>,
    /// Motion hold requested since the coordinator last looked (ms).
    pending_hold_ms: Option<u32>,
    render_count: u64,
    transition_count: u64,
}

impl AppService {
    /// Construct the service in the boot state.
    ///
    /// Does **not** touch any port; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: SecurityState::new(),
            rules: Rules::from(config),
            pending_pulse_ms: None,
            pending_hold_ms: None,
            render_count: 0,
            transition_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output low and render the boot frame.
    pub fn start(
        &mut self,
        hw: &mut impl IndicatorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        hw.all_off();
        self.render(display);
        sink.emit(&AppEvent::Started(self.state));
        info!("AppService started: {:?}", self.state);
    }

    // ── Event handling ────────────────────────────────────────

    /// Apply one event and execute its effects.
    ///
    /// Returns `true` if the event produced any effect, `false` if it was a
    /// silent no-op.
    pub fn handle(
        &mut self,
        event: SecurityEvent,
        hw: &mut impl IndicatorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let transition = fsm::dispatch(&self.state, event, &self.rules);

        if transition.is_noop() {
            debug!("{:?} ignored in {:?}", event, self.state);
            sink.emit(&AppEvent::Ignored(event));
            return false;
        }

        self.state = transition.next;
        self.transition_count += 1;

        let mut refresh = false;
        for effect in &transition.effects {
            match *effect {
                Effect::Led(led, on) => hw.set_led(led, on),
                Effect::PulseBuzzer { duration_ms } => {
                    self.pending_pulse_ms = Some(duration_ms);
                }
                Effect::SilenceBuzzer => {
                    hw.set_buzzer(false);
                    self.pending_pulse_ms = None;
                }
                Effect::HoldMotion { duration_ms } => {
                    self.pending_hold_ms = Some(duration_ms);
                }
                Effect::RefreshDisplay => refresh = true,
            }
        }

        if refresh {
            self.render(display);
        }

        info!("{:?} -> {:?}", event, self.state);
        sink.emit(&AppEvent::Transition {
            event,
            state: self.state,
        });
        true
    }

    /// Take the pending pulse request, if any.  The request is cleared.
    pub fn take_pulse_request(&mut self) -> Option<u32> {
        self.pending_pulse_ms.take()
    }

    /// Take the pending motion hold request, if any.  The request is cleared.
    pub fn take_motion_hold(&mut self) -> Option<u32> {
        self.pending_hold_ms.take()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the current state.
    pub fn state(&self) -> SecurityState {
        self.state
    }

    /// Whether a pulse request is pending (cleared when a train ends).
    pub fn pulse_pending(&self) -> bool {
        self.pending_pulse_ms.is_some()
    }

    /// Frames rendered since construction (boot frame included).
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Events that produced effects since construction.
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn render(&mut self, display: &mut impl DisplayPort) {
        presenter::render(&self.state, display);
        self.render_count += 1;
    }
}
