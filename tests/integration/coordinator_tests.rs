//! Coordinator under a simulated clock: motion hold, buzzer trains, and
//! button interrupts landing between loop steps.

use doorguard::app::commands::Command;
use doorguard::app::events::AppEvent;
use doorguard::config::{MAX_DURATION_MS, SystemConfig};
use doorguard::coordinator::{Coordinator, Phase};
use doorguard::fsm::Led;
use doorguard::pins;

use crate::mock_hw::{ScriptedCommands, ScriptedJoystick, TestPanel, started_panel_with};

struct Rig {
    panel: TestPanel,
    coord: Coordinator,
    commands: ScriptedCommands,
    joystick: ScriptedJoystick,
    now: u32,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(&SystemConfig::default())
    }

    fn with_config(config: &SystemConfig) -> Self {
        Self {
            panel: started_panel_with(config),
            coord: Coordinator::new(config),
            commands: ScriptedCommands::default(),
            joystick: ScriptedJoystick::default(),
            now: 0,
        }
    }

    /// One step at the current time; the clock then jumps to the next
    /// deadline.
    fn step(&mut self) {
        let wait = self
            .coord
            .step(self.now, &self.panel, &mut self.commands, &mut self.joystick);
        assert!(wait > 0);
        self.now += wait;
    }

    /// Step until the clock reaches `until_ms`.
    fn run_until(&mut self, until_ms: u32) {
        while self.now < until_ms {
            self.step();
        }
    }

    /// Step until the coordinator is resting; returns the time it got there.
    fn run_until_rest(&mut self) -> u32 {
        loop {
            let now = self.now;
            self.step();
            if matches!(self.coord.phase(), Phase::Rest { .. }) {
                return now;
            }
        }
    }

    fn buzzer_events(&self) -> (usize, usize) {
        self.panel.with(|p| {
            (
                p.sink.count(|e| matches!(e, AppEvent::BuzzerStarted { .. })),
                p.sink.count(|e| *e == AppEvent::BuzzerFinished),
            )
        })
    }
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn idle_loop_runs_every_100ms() {
    let mut rig = Rig::new();
    rig.run_until(1_000);
    assert_eq!(rig.coord.iterations(), 10);
    assert_eq!(rig.joystick.samples, 10);
    assert_eq!(rig.panel.with(|p| p.display.flushes()), 1);
}

#[test]
fn one_command_per_iteration() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.commands.push(Command::DisarmAlarm);

    // First iteration applies ArmAlarm only, then plays its train.
    rig.step();
    assert!(rig.panel.state().alarm_active);
    assert_eq!(rig.commands.0.len(), 1);
}

// ── Motion ────────────────────────────────────────────────────

#[test]
fn motion_forces_door_closed_then_self_clears() {
    let mut rig = Rig::new();
    rig.panel.on_gpio_irq(pins::BUTTON_PROXIMITY_GPIO, true, 0);
    rig.panel.dispatch(Command::Open.into());
    assert!(rig.panel.state().door_open);

    rig.joystick.push(0, 2000);
    rig.step();

    let s = rig.panel.state();
    assert!(s.motion_detected && !s.door_open);
    assert_eq!(rig.coord.phase(), &Phase::MotionHold { until_ms: 5_000 });
    rig.panel.with(|p| {
        assert!(p.hw.led(Led::Motion));
        assert!(!p.hw.led(Led::Door));
        assert_eq!(p.display.last_frame(), ["Door Closed", "Owner Near", "Motion"]);
    });

    // No input at all: the hold expires on its own.
    assert_eq!(rig.now, 5_000);
    rig.step();
    let s = rig.panel.state();
    assert!(!s.motion_detected && !s.led_motion);
    rig.panel.with(|p| {
        assert!(!p.hw.led(Led::Motion));
        assert_eq!(p.display.last_frame(), ["Door Closed", "Owner Near"]);
    });
}

#[test]
fn longest_allowed_hold_runs_in_full() {
    let config = SystemConfig {
        motion_hold_ms: MAX_DURATION_MS,
        ..SystemConfig::default()
    };
    assert!(config.validate().is_ok());
    let mut rig = Rig::with_config(&config);
    rig.joystick.push(0, 2000);
    rig.step();
    assert_eq!(
        rig.coord.phase(),
        &Phase::MotionHold {
            until_ms: MAX_DURATION_MS
        }
    );
    assert!(rig.panel.state().motion_detected);

    rig.run_until(MAX_DURATION_MS);
    assert!(rig.panel.state().motion_detected);
    rig.step();
    assert!(!rig.panel.state().motion_detected);
}

#[test]
fn joystick_is_not_sampled_during_hold() {
    let mut rig = Rig::new();
    rig.joystick.push(0, 2000);
    rig.step();
    rig.run_until(5_000);
    assert_eq!(rig.joystick.samples, 1);
    assert_eq!(rig.coord.iterations(), 1);
}

#[test]
fn each_out_of_band_sample_is_a_new_detection() {
    let mut rig = Rig::new();
    rig.joystick.push(0, 2000);
    rig.joystick.push(1975, 4000);
    rig.run_until(10_200);
    let detections = rig.panel.with(|p| {
        p.sink.count(|e| {
            matches!(
                e,
                AppEvent::Transition {
                    event: doorguard::fsm::SecurityEvent::MotionDetected,
                    ..
                }
            )
        })
    });
    assert_eq!(detections, 2);
    assert!(!rig.panel.state().motion_detected);
}

// ── Buzzer ────────────────────────────────────────────────────

#[test]
fn alarm_plays_full_train_and_ends_low() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);

    let rested_at = rig.run_until_rest();
    assert_eq!(rested_at, 5_000);
    rig.panel.with(|p| {
        assert_eq!(p.hw.buzzer_rises(), 1250);
        assert!(!p.hw.buzzer_on());
    });
    assert_eq!(rig.buzzer_events(), (1, 1));
    // Arming alone does not clear the alarm.
    assert!(rig.panel.state().alarm_active);
}

#[test]
fn disarm_is_polled_after_train() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.commands.push(Command::DisarmAlarm);
    rig.run_until(5_200);
    let s = rig.panel.state();
    assert!(!s.alarm_active && !s.led_alarm);
    rig.panel.with(|p| assert!(!p.hw.buzzer_on()));
}

#[test]
fn owner_return_mid_train_does_not_cancel_it() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.run_until(2_000);

    assert!(rig.panel.on_gpio_irq(pins::BUTTON_PROXIMITY_GPIO, true, rig.now));
    let s = rig.panel.state();
    assert!(s.owner_near && !s.alarm_active);

    let rested_at = rig.run_until_rest();
    assert_eq!(rested_at, 5_000);
    rig.panel.with(|p| {
        assert_eq!(p.hw.buzzer_rises(), 1250);
        assert!(!p.hw.buzzer_on());
    });
    assert_eq!(rig.buzzer_events(), (1, 1));
}

#[test]
fn alarm_pressed_mid_train_is_absorbed_by_it() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.run_until(1_000);
    assert!(rig.panel.on_gpio_irq(pins::BUTTON_ALARM_GPIO, true, rig.now));
    assert!(rig.panel.with(|p| p.service.pulse_pending()));

    let rested_at = rig.run_until_rest();
    assert_eq!(rested_at, 5_000);
    assert!(!rig.panel.with(|p| p.service.pulse_pending()));

    rig.run_until(12_000);
    assert_eq!(rig.buzzer_events(), (1, 1));
    rig.panel.with(|p| {
        assert_eq!(p.hw.buzzer_rises(), 1250);
        assert!(!p.hw.buzzer_on());
    });
    assert!(rig.panel.state().alarm_active);
}

#[test]
fn alarm_after_train_plays_again() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.run_until_rest();
    rig.run_until(6_000);

    rig.commands.push(Command::ArmAlarm);
    rig.step();
    assert!(matches!(rig.coord.phase(), Phase::Buzzing { .. }));
    assert_eq!(rig.buzzer_events(), (2, 1));
}

#[test]
fn motion_hold_runs_before_queued_buzzer() {
    let mut rig = Rig::new();
    rig.commands.push(Command::ArmAlarm);
    rig.joystick.push(0, 2000);
    rig.step();
    assert!(matches!(rig.coord.phase(), Phase::MotionHold { .. }));
    assert_eq!(rig.buzzer_events(), (0, 0));

    rig.step();
    assert!(matches!(rig.coord.phase(), Phase::Buzzing { .. }));
    assert_eq!(rig.buzzer_events(), (1, 0));
}
