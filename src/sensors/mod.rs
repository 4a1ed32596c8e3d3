//! Sensor subsystem.
//!
//! The only sensor is the joystick, sampled each loop iteration and
//! reduced to a motion / no-motion verdict by [`joystick::MotionDetector`].

pub mod joystick;

pub use joystick::{JoystickSample, MotionDetector};
