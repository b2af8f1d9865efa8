//! Shiplights library.
//!
//! Drives a ship model's lighting rig: randomly flickering cabin windows,
//! software-pulsed nacelle glow, and choreographed navigation blinkers,
//! remote-controlled over a newline-delimited JSON TCP protocol.
//!
//! All hardware access goes through the port traits in [`app::ports`], so
//! the whole engine runs against the simulated rig in [`adapters::sim`]
//! for tests and bench use.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod patterns;
pub mod server;

pub mod adapters;

mod error;

pub use error::{CommandError, ConfigError};
