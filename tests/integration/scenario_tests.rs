//! End-to-end scenarios: button edges and debug commands through the
//! shared panel down to LEDs, buzzer and display.

use doorguard::app::commands::Command;
use doorguard::app::events::AppEvent;
use doorguard::app::ports::IndicatorPort;
use doorguard::fsm::{Led, SecurityEvent, SecurityState};
use doorguard::pins;

use crate::mock_hw::{IndicatorCall, started_panel};

const DOOR: i32 = pins::BUTTON_DOOR_GPIO;
const OWNER: i32 = pins::BUTTON_PROXIMITY_GPIO;
const ALARM: i32 = pins::BUTTON_ALARM_GPIO;

#[test]
fn boot_renders_closed_and_far() {
    let panel = started_panel();
    panel.with(|p| {
        assert_eq!(p.display.flushes(), 1);
        assert_eq!(p.display.last_frame(), ["Door Closed", "Owner Far"]);
        assert!(!p.hw.buzzer_on());
        assert_eq!(p.sink.events, [AppEvent::Started(SecurityState::new())]);
    });
}

// ── Owner arrives, opens, leaves ──────────────────────────────

#[test]
fn owner_opens_then_leaving_closes_the_door() {
    let panel = started_panel();

    assert!(panel.on_gpio_irq(OWNER, true, 1_000));
    assert!(panel.on_gpio_irq(DOOR, true, 1_400));
    assert!(panel.state().door_open);
    assert!(panel.on_gpio_irq(OWNER, true, 1_800));

    let s = panel.state();
    assert!(!s.door_open && !s.owner_near && !s.alarm_active);
    assert!(s.leds_in_sync());

    panel.with(|p| {
        // Boot frame + two proximity refreshes + one door refresh.
        assert_eq!(p.display.flushes(), 4);
        assert_eq!(p.service.render_count(), 4);
        assert_eq!(p.display.last_frame(), ["Door Closed", "Owner Far"]);
        assert!(!p.hw.led(Led::Door));
    });
}

#[test]
fn door_ignored_while_owner_far() {
    let panel = started_panel();
    assert!(!panel.on_gpio_irq(DOOR, true, 1_000));
    panel.with(|p| {
        assert_eq!(p.display.flushes(), 1);
        assert_eq!(
            p.sink.events.last(),
            Some(&AppEvent::Ignored(SecurityEvent::ToggleDoorRequest))
        );
    });
}

// ── Alarm ─────────────────────────────────────────────────────

#[test]
fn arm_then_disarm_by_command_leaves_door_and_owner_alone() {
    let panel = started_panel();
    panel.on_gpio_irq(OWNER, true, 0);
    let before = panel.state();

    assert!(panel.dispatch(Command::ArmAlarm.into()));
    assert!(panel.state().alarm_active);
    panel.with(|p| p.hw.set_buzzer(true));

    assert!(panel.dispatch(Command::DisarmAlarm.into()));
    let s = panel.state();
    assert!(!s.alarm_active && !s.led_alarm);
    assert_eq!((s.door_open, s.owner_near), (before.door_open, before.owner_near));
    panel.with(|p| {
        assert!(!p.hw.buzzer_on());
        assert!(!p.hw.led(Led::Alarm));
        assert_eq!(p.service.take_pulse_request(), None);
    });
}

#[test]
fn owner_return_cancels_alarm_in_one_refresh() {
    let panel = started_panel();
    assert!(panel.on_gpio_irq(ALARM, true, 0));
    assert!(panel.state().alarm_active);
    let flushes = panel.with(|p| p.display.flushes());

    assert!(panel.on_gpio_irq(OWNER, true, 500));
    let s = panel.state();
    assert!(s.owner_near && !s.alarm_active);
    panel.with(|p| {
        assert_eq!(p.display.flushes(), flushes + 1);
        assert!(p.hw.calls.contains(&IndicatorCall::Buzzer(false)));
    });
}

#[test]
fn alarm_button_is_retriggerable() {
    let panel = started_panel();
    assert!(panel.on_gpio_irq(ALARM, true, 0));
    assert!(panel.on_gpio_irq(ALARM, true, 400));
    assert!(panel.state().alarm_active);
    panel.with(|p| {
        assert_eq!(p.service.transition_count(), 2);
        assert_eq!(p.display.last_frame(), ["Door Closed", "Owner Far", "Alarm Active!"]);
    });
}

// ── Debounce idempotence ──────────────────────────────────────

#[test]
fn double_press_inside_window_counts_once() {
    let panel = started_panel();
    assert!(panel.on_gpio_irq(OWNER, true, 2_000));
    assert!(!panel.on_gpio_irq(OWNER, true, 2_150));
    assert!(panel.state().owner_near);

    assert!(panel.on_gpio_irq(DOOR, true, 2_300));
    assert!(!panel.on_gpio_irq(DOOR, true, 2_310));
    assert!(panel.state().door_open);
}

#[test]
fn open_command_respects_owner_gate_but_force_close_does_not() {
    let panel = started_panel();
    assert!(!panel.dispatch(Command::Open.into()));
    assert!(!panel.state().door_open);

    panel.on_gpio_irq(OWNER, true, 0);
    assert!(panel.dispatch(Command::Open.into()));
    assert!(panel.state().door_open);
    assert!(panel.dispatch(Command::ForceClose.into()));
    assert!(!panel.state().door_open);
}
