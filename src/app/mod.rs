//! Application core: subsystem orchestration, zero hardware access.
//!
//! The lighting logic talks to devices exclusively through the **port
//! traits** in [`ports`], keeping this layer fully testable against the
//! simulated rig or recording mocks.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
