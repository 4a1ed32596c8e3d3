//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) and the loop
//! [`Coordinator`](crate::coordinator::Coordinator) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::{SecurityEvent, SecurityState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service rendered its boot state (carries that state).
    Started(SecurityState),

    /// An event was applied and produced effects.
    Transition {
        event: SecurityEvent,
        state: SecurityState,
    },

    /// An event was a silent no-op (e.g. door toggle with owner far).
    Ignored(SecurityEvent),

    /// A buzzer pulse train started.
    BuzzerStarted { duration_ms: u32 },

    /// The running pulse train completed; the buzzer is low.
    BuzzerFinished,
}
