//! Concrete transition handlers, one per event variant.
//!
//! ```text
//!  owner far ──[proximity]──▶ owner near ──[door]──▶ door open
//!      ▲                          │  ▲                    │
//!      │                          │  └──────[door]────────┘
//!      └──────[proximity]─────────┘
//!        (door auto-closes if open)
//!
//!  any ──[alarm button / 'L']──▶ alarm active ──[owner returns / 'D']──▶ alarm off
//!  any ──[motion]──▶ motion + door closed ──[hold expired]──▶ motion cleared
//! ```
//!
//! Handlers read the current state and return a new one.  LED effects are
//! emitted for every LED a handler writes, even when its level does not
//! change.

use log::debug;

use super::{Effect, Led, Rules, SecurityState, Transition};
use crate::app::commands::Command;

// ═══════════════════════════════════════════════════════════════════════════
//  Button events
// ═══════════════════════════════════════════════════════════════════════════

/// Button A: flips the door, but only for an owner who is near.
pub fn on_toggle_door_request(state: &SecurityState) -> Transition {
    if !state.owner_near {
        debug!("door toggle ignored: owner far");
        return Transition::unchanged(state);
    }

    let mut t = Transition::from_state(state);
    t.next.door_open = !state.door_open;
    t.next.led_door = t.next.door_open;
    t.push(Effect::Led(Led::Door, t.next.led_door));
    t.push(Effect::RefreshDisplay);
    t
}

/// Button B: flips owner proximity.
///
/// Leaving closes an open door; returning cancels an active alarm.  Both
/// happen in the same transition, so no intermediate state is observable.
/// Always refreshes the display.
pub fn on_toggle_proximity_request(state: &SecurityState) -> Transition {
    let mut t = Transition::from_state(state);
    t.next.owner_near = !state.owner_near;

    if !t.next.owner_near && t.next.door_open {
        t.next.door_open = false;
        t.next.led_door = false;
        t.push(Effect::Led(Led::Door, false));
    }

    if t.next.owner_near && t.next.alarm_active {
        t.next.alarm_active = false;
        t.next.led_alarm = false;
        t.push(Effect::Led(Led::Alarm, false));
        t.push(Effect::SilenceBuzzer);
    }

    t.push(Effect::RefreshDisplay);
    t
}

/// Joystick push: arms the alarm unconditionally and requests a pulse.
/// Re-triggerable while already active.
pub fn on_trigger_alarm_request(state: &SecurityState, rules: &Rules) -> Transition {
    arm_alarm(state, rules)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Motion
// ═══════════════════════════════════════════════════════════════════════════

/// Joystick deflection: latch motion, force the door shut, start the hold.
pub fn on_motion_detected(state: &SecurityState, rules: &Rules) -> Transition {
    let mut t = Transition::from_state(state);
    t.next.motion_detected = true;
    t.next.led_motion = true;
    t.next.door_open = false;
    t.next.led_door = false;
    t.push(Effect::Led(Led::Motion, true));
    t.push(Effect::Led(Led::Door, false));
    t.push(Effect::RefreshDisplay);
    t.push(Effect::HoldMotion {
        duration_ms: rules.motion_hold_ms,
    });
    t
}

/// End of the hold window: clear motion and its LED.
pub fn on_motion_hold_expired(state: &SecurityState) -> Transition {
    let mut t = Transition::from_state(state);
    t.next.motion_detected = false;
    t.next.led_motion = false;
    t.push(Effect::Led(Led::Motion, false));
    t.push(Effect::RefreshDisplay);
    t
}

// ═══════════════════════════════════════════════════════════════════════════
//  Debug channel
// ═══════════════════════════════════════════════════════════════════════════

/// Operator overrides.  `ForceClose` and `DisarmAlarm` skip the owner gate.
pub fn on_command(state: &SecurityState, cmd: Command, rules: &Rules) -> Transition {
    match cmd {
        Command::Open => {
            if !state.owner_near {
                debug!("open command ignored: owner far");
                return Transition::unchanged(state);
            }
            set_door(state, true)
        }
        Command::ForceClose => set_door(state, false),
        Command::ArmAlarm => arm_alarm(state, rules),
        Command::DisarmAlarm => {
            let mut t = Transition::from_state(state);
            t.next.alarm_active = false;
            t.next.led_alarm = false;
            t.push(Effect::Led(Led::Alarm, false));
            t.push(Effect::SilenceBuzzer);
            t.push(Effect::RefreshDisplay);
            t
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared pieces
// ═══════════════════════════════════════════════════════════════════════════

fn set_door(state: &SecurityState, open: bool) -> Transition {
    let mut t = Transition::from_state(state);
    t.next.door_open = open;
    t.next.led_door = open;
    t.push(Effect::Led(Led::Door, open));
    t.push(Effect::RefreshDisplay);
    t
}

fn arm_alarm(state: &SecurityState, rules: &Rules) -> Transition {
    let mut t = Transition::from_state(state);
    t.next.alarm_active = true;
    t.next.led_alarm = true;
    t.push(Effect::Led(Led::Alarm, true));
    t.push(Effect::PulseBuzzer {
        duration_ms: rules.alarm_pulse_ms,
    });
    t.push(Effect::RefreshDisplay);
    t
}
