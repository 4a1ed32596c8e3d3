//! The single shared aggregate every transition reads and writes.
//!
//! `SecurityState` is the "blackboard" of the panel: door, proximity,
//! alarm and motion flags plus the three LED projections that mirror them
//! 1:1 onto physical outputs.  It is created once at boot with everything
//! false/closed and only ever replaced wholesale by a [`Transition`].
//!
//! [`Transition`]: super::Transition

/// Indicator LEDs, one per observable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    /// Green: door open.
    Door,
    /// Blue: motion within its hold window.
    Motion,
    /// Red: alarm active.
    Alarm,
}

impl Led {
    pub const ALL: [Led; 3] = [Led::Door, Led::Motion, Led::Alarm];

    /// Board GPIO driving this LED.
    pub const fn gpio(self) -> i32 {
        match self {
            Self::Door => crate::pins::LED_DOOR_GPIO,
            Self::Motion => crate::pins::LED_MOTION_GPIO,
            Self::Alarm => crate::pins::LED_ALARM_GPIO,
        }
    }
}

/// Door / proximity / alarm / motion state of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SecurityState {
    /// True while the door is open.
    pub door_open: bool,
    /// True while the simulated owner-proximity toggle reads "near".
    pub owner_near: bool,
    /// True while an intrusion alarm is armed/sounding.
    pub alarm_active: bool,
    /// True while a motion event is inside its hold window.
    pub motion_detected: bool,

    /// Door LED output (mirrors `door_open`).
    pub led_door: bool,
    /// Motion LED output (mirrors `motion_detected`).
    pub led_motion: bool,
    /// Alarm LED output (mirrors `alarm_active`).
    pub led_alarm: bool,
}

impl SecurityState {
    /// Boot state: door closed, owner far, alarm off, no motion, LEDs dark.
    pub const fn new() -> Self {
        Self {
            door_open: false,
            owner_near: false,
            alarm_active: false,
            motion_detected: false,
            led_door: false,
            led_motion: false,
            led_alarm: false,
        }
    }

    /// Current level of one LED projection.
    pub fn led(&self, led: Led) -> bool {
        match led {
            Led::Door => self.led_door,
            Led::Motion => self.led_motion,
            Led::Alarm => self.led_alarm,
        }
    }

    /// True when every LED matches the flag it projects.
    pub fn leds_in_sync(&self) -> bool {
        self.led_door == self.door_open
            && self.led_motion == self.motion_detected
            && self.led_alarm == self.alarm_active
    }
}
