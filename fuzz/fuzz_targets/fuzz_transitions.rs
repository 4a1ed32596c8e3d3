//! Fuzz target: arbitrary event sequences through the state machine
//!
//! Each input byte selects one event.  After every transition the LED
//! projections must mirror the flags and the owner/door/alarm invariants
//! must hold.
//!
//! cargo fuzz run fuzz_transitions

#![no_main]

use doorguard::app::commands::Command;
use doorguard::fsm::{self, Rules, SecurityEvent, SecurityState};
use libfuzzer_sys::fuzz_target;

fn event(byte: u8) -> SecurityEvent {
    match byte % 9 {
        0 => SecurityEvent::ToggleDoorRequest,
        1 => SecurityEvent::ToggleProximityRequest,
        2 => SecurityEvent::TriggerAlarmRequest,
        3 => SecurityEvent::MotionDetected,
        4 => SecurityEvent::MotionHoldExpired,
        5 => Command::Open.into(),
        6 => Command::ForceClose.into(),
        7 => Command::ArmAlarm.into(),
        _ => Command::DisarmAlarm.into(),
    }
}

fuzz_target!(|data: &[u8]| {
    let rules = Rules::default();
    let mut state = SecurityState::new();

    for &byte in data {
        let before = state;
        let t = fsm::dispatch(&before, event(byte), &rules);
        state = t.next;

        assert!(state.leds_in_sync());
        if !before.door_open && state.door_open {
            assert!(before.owner_near);
        }
        if before.owner_near && !state.owner_near {
            assert!(!state.door_open);
        }
        if !before.owner_near && state.owner_near {
            assert!(!state.alarm_active);
        }
        if state != before {
            assert!(t.refreshes_display());
        }
    }
});
