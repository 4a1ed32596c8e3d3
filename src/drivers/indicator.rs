//! Indicator outputs: three LEDs and the buzzer line.
//!
//! All four are plain push-pull GPIOs, active HIGH.  The bank owns one
//! `embedded-hal` [`OutputPin`] per output and implements
//! [`IndicatorPort`] on top of them.
//!
//! | Output | GPIO | Colour |
//! |--------|------|--------|
//! | door   | 11   | green  |
//! | motion | 12   | blue   |
//! | alarm  | 13   | red    |
//! | buzzer | 21   | -      |

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::app::ports::IndicatorPort;
use crate::fsm::Led;

pub struct IndicatorBank<P> {
    door: P,
    motion: P,
    alarm: P,
    buzzer: P,
    /// Last level written per LED, for queries.
    levels: [bool; 3],
    buzzer_on: bool,
}

impl<P: OutputPin> IndicatorBank<P> {
    pub fn new(door: P, motion: P, alarm: P, buzzer: P) -> Self {
        Self {
            door,
            motion,
            alarm,
            buzzer,
            levels: [false; 3],
            buzzer_on: false,
        }
    }

    pub fn led_on(&self, led: Led) -> bool {
        self.levels[led as usize]
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer_on
    }

    fn pin(&mut self, led: Led) -> &mut P {
        match led {
            Led::Door => &mut self.door,
            Led::Motion => &mut self.motion,
            Led::Alarm => &mut self.alarm,
        }
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) -> Result<(), P::Error> {
    if on { pin.set_high() } else { pin.set_low() }
}

impl<P: OutputPin> IndicatorPort for IndicatorBank<P> {
    fn set_led(&mut self, led: Led, on: bool) {
        if let Err(e) = drive(self.pin(led), on) {
            warn!("{:?} LED (GPIO{}) write failed: {:?}", led, led.gpio(), e.kind());
            return;
        }
        self.levels[led as usize] = on;
    }

    fn set_buzzer(&mut self, on: bool) {
        if let Err(e) = drive(&mut self.buzzer, on) {
            warn!("buzzer write failed: {:?}", e.kind());
            return;
        }
        self.buzzer_on = on;
    }
}
