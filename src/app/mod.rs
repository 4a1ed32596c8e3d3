//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the DoorGuard panel:
//! event handling over the security state machine, effect execution,
//! display presentation, and the interrupt-safe shared panel.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod panel;
pub mod ports;
pub mod presenter;
pub mod service;
