//! DoorGuard panel library.
//!
//! Exposes the domain core (state machine, service, coordinator), the
//! peripheral drivers and the host adapters used by the `doorguard`
//! simulator binary and by the integration tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod coordinator;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;

pub use error::{Error, Result};
