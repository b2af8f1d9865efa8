//! Simulated bench rig.
//!
//! In-memory light implementations with the same observable behaviour as
//! the hardware: atomic state readable from any thread, and a background
//! blink worker per blinking light. Blink cancellation uses an epoch
//! counter: every `on`/`off`/`blink` bumps it, and a worker exits as
//! soon as the epoch it was started under is stale.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::trace;

use crate::app::ports::{BlinkLight, Light, PwmLight};
use crate::app::service::ShipRig;

const BLINK_SLICE: Duration = Duration::from_millis(50);

// ── SimLight ──────────────────────────────────────────────────

/// A binary light. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SimLight {
    inner: Arc<LightState>,
}

struct LightState {
    label: String,
    lit: AtomicBool,
    /// Bumped on every on/off/blink; stale workers exit.
    epoch: AtomicU64,
}

impl SimLight {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(LightState {
                label: label.into(),
                lit: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }
}

impl Light for SimLight {
    fn on(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.lit.store(true, Ordering::SeqCst);
        trace!("{} on", self.inner.label);
    }

    fn off(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.lit.store(false, Ordering::SeqCst);
        trace!("{} off", self.inner.label);
    }

    fn toggle(&self) {
        self.inner.lit.fetch_xor(true, Ordering::SeqCst);
    }

    fn is_lit(&self) -> bool {
        self.inner.lit.load(Ordering::SeqCst)
    }
}

impl BlinkLight for SimLight {
    fn blink(&self, on_time: Duration, off_time: Duration) {
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            trace!("{} blink worker started", inner.label);
            while inner.epoch.load(Ordering::SeqCst) == epoch {
                inner.lit.store(true, Ordering::SeqCst);
                if !sleep_while_current(&inner, epoch, on_time) {
                    break;
                }
                inner.lit.store(false, Ordering::SeqCst);
                if !sleep_while_current(&inner, epoch, off_time) {
                    break;
                }
            }
            trace!("{} blink worker exiting", inner.label);
        });
    }
}

/// Sliced sleep that bails out when the light's epoch moves on.
fn sleep_while_current(inner: &LightState, epoch: u64, total: Duration) -> bool {
    let mut remaining = total;
    while !remaining.is_zero() {
        if inner.epoch.load(Ordering::SeqCst) != epoch {
            return false;
        }
        let slice = remaining.min(BLINK_SLICE);
        thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
    inner.epoch.load(Ordering::SeqCst) == epoch
}

// ── SimPwmLight ───────────────────────────────────────────────

/// A PWM light. Level is stored as f32 bits in an atomic; `is_lit`
/// means a non-zero level.
#[derive(Clone)]
pub struct SimPwmLight {
    inner: Arc<PwmState>,
}

struct PwmState {
    label: String,
    level_bits: AtomicU32,
}

impl SimPwmLight {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(PwmState {
                label: label.into(),
                level_bits: AtomicU32::new(0.0_f32.to_bits()),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }
}

impl Light for SimPwmLight {
    fn on(&self) {
        self.set_level(1.0);
    }

    fn off(&self) {
        self.set_level(0.0);
    }

    fn toggle(&self) {
        if self.is_lit() {
            self.off();
        } else {
            self.on();
        }
    }

    fn is_lit(&self) -> bool {
        self.level() > 0.0
    }
}

impl PwmLight for SimPwmLight {
    fn set_level(&self, level: f32) {
        let clamped = level.clamp(0.0, 1.0);
        self.inner.level_bits.store(clamped.to_bits(), Ordering::SeqCst);
        trace!("{} level {:.3}", self.inner.label, clamped);
    }

    fn level(&self) -> f32 {
        f32::from_bits(self.inner.level_bits.load(Ordering::SeqCst))
    }
}

// ── Bench rig ─────────────────────────────────────────────────

/// Build a full simulated rig with the original model's device layout:
/// one static cabin light, five flickering windows, a static nacelle
/// light plus PWM glow, and the five navigation blinkers.
pub fn bench_rig() -> ShipRig {
    let cabin_windows: Vec<Arc<dyn Light>> = (1..=5)
        .map(|i| Arc::new(SimLight::new(format!("cabin-{i}"))) as Arc<dyn Light>)
        .collect();

    ShipRig {
        static_cabins: Arc::new(SimLight::new("static-cabins")),
        cabin_windows,
        static_nacelles: Arc::new(SimLight::new("static-nacelles")),
        nacelle_glow: Arc::new(SimPwmLight::new("nacelle-glow")),
        port_blinker: Arc::new(SimLight::new("port")),
        starboard_blinker: Arc::new(SimLight::new("starboard")),
        top_blinkers: [
            Arc::new(SimLight::new("top-1")),
            Arc::new(SimLight::new("top-2")),
            Arc::new(SimLight::new("top-3")),
        ],
    }
}
