//! Outbound application events.
//!
//! The [`ShipService`](super::service::ShipService) emits these through
//! the [`EventSink`](super::ports::EventSink) port after every handled
//! command. Adapters on the other side decide what to do with them;
//! the default sink writes the operator log.

pub use super::state::StateSnapshot;

use super::state::{CabinMode, NacelleMode};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    CabinsOn,
    CabinsOff,
    CabinsModeSet(CabinMode),
    NacellesOn,
    NacellesOff,
    NacellesModeSet(NacelleMode),
    BlinkersOn,
    BlinkersOff,
    AllOn,
    AllOff,
    /// A `get_state` request was served (no mutation).
    StateQueried,
    /// A `stop`/`exit`/`halt` command was accepted.
    ShuttingDown,
}
