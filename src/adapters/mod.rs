//! Adapters on the far side of the port traits.
//!
//! The real GPIO rig is an external collaborator; what lives here is the
//! simulated bench rig the binary and tests run against, plus the
//! logging sink and the character-display mirror.

pub mod display;
pub mod log_sink;
pub mod sim;
