//! Main loop coordinator.
//!
//! The panel's main thread is a cooperative loop at a fixed cadence.  Each
//! iteration polls the debug channel once, samples the joystick, holds the
//! motion flag if motion was seen, plays any requested buzzer train, then
//! rests.  Button interrupts are serviced asynchronously through the
//! [`SharedPanel`] and are never polled here.
//!
//! Instead of sleeping inline, the loop is an explicit phase machine stepped
//! by a clock.  [`Coordinator::step`] does whatever is due at `now_ms` and
//! returns how long the caller may wait before stepping again:
//!
//! ```text
//!           ┌──────────────────────────────────────────────┐
//!           ▼                                              │
//!   ┌──────────────┐ motion ┌────────────┐                 │
//!   │     Poll     │───────▶│ MotionHold │──┐              │
//!   │ cmd · sample │        └────────────┘  │ expired      │
//!   └──────┬───────┘                        ▼              │
//!          │ no motion               pulse requested?      │
//!          └──────────────────────────▶ yes ──▶ Buzzing ──┤
//!                                       no  ──────────▶ Rest
//! ```
//!
//! A running phase is never cancelled: a hold or a pulse train always runs
//! to completion, while interrupts keep mutating the panel in between steps.
//! The pulse request is cleared when its train ends, so an alarm raised
//! while the buzzer is already sounding does not queue a second train.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::panel::SharedPanel;
use crate::app::ports::{ClockPort, CommandPort, DisplayPort, EventSink, IndicatorPort, JoystickPort};
use crate::config::SystemConfig;
use crate::drivers::buzzer::PulseTrain;
use crate::fsm::SecurityEvent;
use crate::sensors::{MotionDetector, joystick};

// ═══════════════════════════════════════════════════════════════
//  Phases
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Start of an iteration: command, then joystick.
    Poll,
    /// Motion flag is held until `until_ms`.
    MotionHold { until_ms: u32 },
    /// A pulse train is playing; the current level is held until `until_ms`.
    Buzzing { train: PulseTrain, until_ms: u32 },
    /// Idle gap between iterations.
    Rest { until_ms: u32 },
}

/// Milliseconds from `now` to `deadline`, 0 if it has passed.  Correct
/// across `u32` wrap for spans under ~24 days.
fn remaining(now_ms: u32, deadline_ms: u32) -> u32 {
    let d = deadline_ms.wrapping_sub(now_ms);
    if d > u32::MAX / 2 { 0 } else { d }
}

// ═══════════════════════════════════════════════════════════════
//  Coordinator
// ═══════════════════════════════════════════════════════════════

pub struct Coordinator {
    phase: Phase,
    motion: MotionDetector,
    loop_interval_ms: u32,
    buzzer_on_ms: u32,
    buzzer_off_ms: u32,
    iterations: u64,
}

impl Coordinator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            phase: Phase::Poll,
            motion: MotionDetector::from_config(config),
            loop_interval_ms: config.loop_interval_ms,
            buzzer_on_ms: config.buzzer_on_ms,
            buzzer_off_ms: config.buzzer_off_ms,
            iterations: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Poll phases entered so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Advance as far as possible at `now_ms`.
    ///
    /// Returns the milliseconds until the next step is due (always > 0
    /// for a valid config).
    pub fn step<H, D, S>(
        &mut self,
        now_ms: u32,
        panel: &SharedPanel<H, D, S>,
        commands: &mut impl CommandPort,
        joystick: &mut impl JoystickPort,
    ) -> u32
    where
        H: IndicatorPort,
        D: DisplayPort,
        S: EventSink,
    {
        loop {
            let wait = match self.phase.clone() {
                Phase::Poll => self.poll(now_ms, panel, commands, joystick),
                Phase::MotionHold { until_ms } => match remaining(now_ms, until_ms) {
                    0 => {
                        panel.dispatch(SecurityEvent::MotionHoldExpired);
                        self.after_motion(now_ms, panel)
                    }
                    left => left,
                },
                Phase::Buzzing { train, until_ms } => match remaining(now_ms, until_ms) {
                    0 => self.advance_train(now_ms, train, panel),
                    left => left,
                },
                Phase::Rest { until_ms } => match remaining(now_ms, until_ms) {
                    0 => {
                        self.phase = Phase::Poll;
                        0
                    }
                    left => left,
                },
            };
            if wait > 0 {
                return wait;
            }
        }
    }

    /// Step forever against a real clock.
    pub fn run<H, D, S>(
        &mut self,
        clock: &impl ClockPort,
        delay: &mut impl DelayNs,
        panel: &SharedPanel<H, D, S>,
        commands: &mut impl CommandPort,
        joystick: &mut impl JoystickPort,
    ) -> !
    where
        H: IndicatorPort,
        D: DisplayPort,
        S: EventSink,
    {
        info!("Coordinator running ({} ms cadence)", self.loop_interval_ms);
        loop {
            let wait = self.step(clock.now_ms(), panel, commands, joystick);
            delay.delay_ms(wait.max(1));
        }
    }

    // ── Phase handlers ────────────────────────────────────────

    fn poll<H, D, S>(
        &mut self,
        now_ms: u32,
        panel: &SharedPanel<H, D, S>,
        commands: &mut impl CommandPort,
        joystick: &mut impl JoystickPort,
    ) -> u32
    where
        H: IndicatorPort,
        D: DisplayPort,
        S: EventSink,
    {
        self.iterations += 1;

        // (a) at most one command per iteration
        if let Some(cmd) = commands.poll_command() {
            debug!("command {:?}", cmd);
            panel.dispatch(cmd.into());
        }

        // (b) joystick; sampled outside the lock
        let sample = joystick::sample(joystick);
        if self.motion.detect(sample) {
            debug!("motion at x={} y={}", sample.x, sample.y);
            let hold = panel.with(|p| {
                p.dispatch(SecurityEvent::MotionDetected);
                p.service.take_motion_hold()
            });
            if let Some(hold_ms) = hold {
                self.phase = Phase::MotionHold {
                    until_ms: now_ms.wrapping_add(hold_ms),
                };
                return 0;
            }
        }

        self.after_motion(now_ms, panel)
    }

    /// (c) start a requested pulse train, else rest.
    fn after_motion<H, D, S>(&mut self, now_ms: u32, panel: &SharedPanel<H, D, S>) -> u32
    where
        H: IndicatorPort,
        D: DisplayPort,
        S: EventSink,
    {
        let request = panel.with(|p| {
            let req = p.service.take_pulse_request();
            if let Some(duration_ms) = req {
                p.emit(&AppEvent::BuzzerStarted { duration_ms });
            }
            req
        });

        match request {
            Some(duration_ms) => {
                let train = PulseTrain::new(duration_ms, self.buzzer_on_ms, self.buzzer_off_ms);
                self.advance_train(now_ms, train, panel)
            }
            None => self.rest(now_ms),
        }
    }

    fn advance_train<H, D, S>(
        &mut self,
        now_ms: u32,
        mut train: PulseTrain,
        panel: &SharedPanel<H, D, S>,
    ) -> u32
    where
        H: IndicatorPort,
        D: DisplayPort,
        S: EventSink,
    {
        if let Some(step) = train.next() {
            panel.with(|p| p.hw.set_buzzer(step.level));
            self.phase = Phase::Buzzing {
                train,
                until_ms: now_ms.wrapping_add(step.hold_ms),
            };
            return 0;
        }
        panel.with(|p| {
            p.hw.set_buzzer(false);
            // A request raised while the train was playing is absorbed by it.
            if let Some(duration_ms) = p.service.take_pulse_request() {
                debug!("pulse request ({} ms) dropped at end of train", duration_ms);
            }
            p.emit(&AppEvent::BuzzerFinished);
        });
        self.rest(now_ms)
    }

    fn rest(&mut self, now_ms: u32) -> u32 {
        self.phase = Phase::Rest {
            until_ms: now_ms.wrapping_add(self.loop_interval_ms),
        };
        0
    }
}
