//! Peripheral drivers: buttons, buzzer, indicator outputs.

pub mod button;
pub mod buzzer;
pub mod indicator;
