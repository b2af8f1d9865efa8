//! Port traits: the boundary between lighting logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShipService / pattern loops
//! ```
//!
//! Device adapters (GPIO pins, the simulated bench rig) implement the
//! light traits; observability adapters implement [`EventSink`] and
//! [`DisplayMirror`]. Devices take `&self` and must be `Send + Sync`:
//! every light is shared between the command-dispatch path and at most
//! one background pattern loop via `Arc`.

use std::time::Duration;

use crate::app::events::{AppEvent, StateSnapshot};

// ───────────────────────────────────────────────────────────────
// Output devices (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// A binary on/off output device.
pub trait Light: Send + Sync {
    fn on(&self);
    fn off(&self);
    fn toggle(&self);

    /// Whether the device currently emits light.
    fn is_lit(&self) -> bool;
}

/// A PWM-capable device with a settable analog level.
///
/// `is_lit` is defined as `level() > 0`; `on()` drives the level to 1.0
/// and `off()` to 0.0.
pub trait PwmLight: Light {
    /// Set the output level. Values are clamped to [0, 1] by adapters.
    fn set_level(&self, level: f32);

    /// Current output level in [0, 1].
    fn level(&self) -> f32;
}

/// A device with an externally-provided periodic blink capability.
///
/// `blink` starts the pattern and returns immediately; the adapter owns
/// the periodic toggling. `off()` cancels a running blink.
pub trait BlinkLight: Light {
    fn blink(&self, on_time: Duration, off_time: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (operator log, status display, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Display mirror (driven adapter: domain → local state display)
// ───────────────────────────────────────────────────────────────

/// Optional local mirror of the subsystem state, refreshed after every
/// state-changing command.
pub trait DisplayMirror {
    fn render(&mut self, snapshot: &StateSnapshot);
}

/// A mirror that displays nothing.
pub struct NullMirror;

impl DisplayMirror for NullMirror {
    fn render(&mut self, _snapshot: &StateSnapshot) {}
}
