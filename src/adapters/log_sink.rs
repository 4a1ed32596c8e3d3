//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one structured line per
//! application event to the `log` facade (stderr via `tracing-subscriber`
//! in the simulator, UART on a board).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::SecurityState;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn flags(s: &SecurityState) -> String {
    format!(
        "door={} owner={} motion={} alarm={}",
        if s.door_open { "OPEN" } else { "CLOSED" },
        if s.owner_near { "NEAR" } else { "FAR" },
        u8::from(s.motion_detected),
        u8::from(s.alarm_active),
    )
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | {}", flags(state));
            }
            AppEvent::Transition { event, state } => {
                info!("STATE | {:?} | {}", event, flags(state));
            }
            AppEvent::Ignored(event) => {
                debug!("STATE | {:?} ignored", event);
            }
            AppEvent::BuzzerStarted { duration_ms } => {
                info!("BUZZER | on for {} ms", duration_ms);
            }
            AppEvent::BuzzerFinished => {
                info!("BUZZER | off");
            }
        }
    }
}
