//! Passive buzzer driver.
//!
//! The buzzer is a bare piezo on a GPIO: it sounds only while the pin is
//! toggled.  An alarm is a square-wave **pulse train** with an asymmetric
//! duty cycle (default 1 ms high, 3 ms low, ~25 % on), repeated in whole
//! periods until the cumulative time reaches the requested duration.
//!
//! ```text
//!  pin  ─┐ ┌───┐ ┌───┐ ┌───  ...  ┐ ┌──────
//!        └─┘   └─┘   └─┘          └─┘   (left low)
//!        on off on off on  ...   on off
//! ```
//!
//! [`PulseTrain`] yields the level/hold steps so a caller can interleave
//! them with other work; [`pulse_buzzer`] plays a train to completion on
//! the calling thread.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

/// One half-period: drive the pin to `level` and hold it for `hold_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseStep {
    pub level: bool,
    pub hold_ms: u32,
}

/// Iterator over the steps of one alarm pulse train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseTrain {
    duration_ms: u32,
    on_ms: u32,
    off_ms: u32,
    elapsed_ms: u32,
    high_next: bool,
}

impl PulseTrain {
    pub const fn new(duration_ms: u32, on_ms: u32, off_ms: u32) -> Self {
        Self {
            duration_ms,
            on_ms,
            off_ms,
            elapsed_ms: 0,
            high_next: true,
        }
    }

    pub const fn period_ms(&self) -> u32 {
        self.on_ms.saturating_add(self.off_ms)
    }

    /// Whole periods the train plays in total.
    pub fn periods(&self) -> u32 {
        match self.period_ms() {
            0 => 0,
            p => self.duration_ms.div_ceil(p),
        }
    }

    pub const fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Time covered by the periods already completed.
    pub const fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

impl Iterator for PulseTrain {
    type Item = PulseStep;

    fn next(&mut self) -> Option<PulseStep> {
        if self.high_next {
            // A zero period would never make progress.
            if self.elapsed_ms >= self.duration_ms || self.period_ms() == 0 {
                return None;
            }
            self.high_next = false;
            Some(PulseStep {
                level: true,
                hold_ms: self.on_ms,
            })
        } else {
            self.high_next = true;
            self.elapsed_ms = self.elapsed_ms.saturating_add(self.period_ms());
            Some(PulseStep {
                level: false,
                hold_ms: self.off_ms,
            })
        }
    }
}

/// Play `train` to completion, blocking the caller.  The pin is low on
/// return.
///
/// Blocking form for a bare loop that owns the buzzer pin.  The
/// [`Coordinator`](crate::coordinator::Coordinator) steps the same
/// [`PulseTrain`] one half-period at a time instead, so button interrupts
/// are serviced while the alarm sounds.
pub fn pulse_buzzer<P, D>(pin: &mut P, delay: &mut D, train: PulseTrain)
where
    P: OutputPin,
    D: DelayNs,
{
    for step in train {
        let res = if step.level {
            pin.set_high()
        } else {
            pin.set_low()
        };
        if let Err(e) = res {
            warn!("buzzer write failed: {:?}", e.kind());
        }
        delay.delay_ms(step.hold_ms);
    }
    if let Err(e) = pin.set_low() {
        warn!("buzzer write failed: {:?}", e.kind());
    }
}
