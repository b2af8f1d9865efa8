//! Triangle-wave pulse engine for the nacelle glow.
//!
//! [`TriangleWave`] is the pure per-tick fade state machine; the
//! [`PulseEngine`] drives it against a PWM light from a single worker
//! thread ticking every 50 ms. Rise and fall durations are independent,
//! so an asymmetric pulse (quick rise, slow decay) is just a shape.
//!
//! At most one worker is ever alive per engine: `start` stops and joins
//! any previous worker before spawning, and `stop` is idempotent and
//! always forces the light fully off, whatever phase the fade was in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::app::ports::PwmLight;
use crate::config::PulseShape;

/// Fixed fade tick period.
pub const PULSE_TICK: Duration = Duration::from_millis(50);

const TICK_SECS: f32 = 0.05;

/// Per-tick triangle-wave state: rises from `lower` to `upper` and back,
/// clamping exactly at the limits and reversing direction on clamp.
#[derive(Debug, Clone, Copy)]
pub struct TriangleWave {
    value: f32,
    rising: bool,
    lower: f32,
    upper: f32,
    step_up: f32,
    step_down: f32,
}

impl TriangleWave {
    pub fn new(shape: &PulseShape) -> Self {
        let span = shape.upper_limit - shape.lower_limit;
        Self {
            value: shape.lower_limit,
            rising: true,
            lower: shape.lower_limit,
            upper: shape.upper_limit,
            step_up: span / (shape.fade_in_secs / TICK_SECS),
            step_down: span / (shape.fade_out_secs / TICK_SECS),
        }
    }

    /// Current output value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether the wave is in its rising phase.
    pub fn rising(&self) -> bool {
        self.rising
    }

    /// Advance one tick and return the new value.
    pub fn advance(&mut self) -> f32 {
        if self.rising {
            let v = self.value + self.step_up;
            if v >= self.upper {
                self.value = self.upper;
                self.rising = false;
            } else {
                self.value = v;
            }
        } else {
            let v = self.value - self.step_down;
            if v <= self.lower {
                self.value = self.lower;
                self.rising = true;
            } else {
                self.value = v;
            }
        }
        self.value
    }
}

/// Owns one PWM light and at most one fade worker.
pub struct PulseEngine {
    light: Arc<dyn PwmLight>,
    pulsing: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PulseEngine {
    pub fn new(light: Arc<dyn PwmLight>) -> Self {
        Self {
            light,
            pulsing: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Start pulsing with the given shape on a background worker.
    ///
    /// Any live worker is stopped and joined first, so rapid repeated
    /// starts can never stack fade loops on the same device.
    pub fn start(&mut self, shape: PulseShape) {
        self.stop();
        self.pulsing.store(true, Ordering::SeqCst);

        let light = Arc::clone(&self.light);
        let pulsing = Arc::clone(&self.pulsing);
        self.worker = Some(thread::spawn(move || run_fade(&light, &pulsing, &shape)));
        debug!(
            "pulse worker started (rise {:.2}s, fall {:.2}s)",
            shape.fade_in_secs, shape.fade_out_secs
        );
    }

    /// Stop pulsing and force the light fully off, regardless of phase.
    /// Safe to call repeatedly or when no worker is running.
    pub fn stop(&mut self) {
        self.pulsing.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.light.off();
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulsing.load(Ordering::SeqCst)
    }

    /// Whether a fade worker is currently alive.
    pub fn has_worker(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PulseEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_fade(light: &Arc<dyn PwmLight>, pulsing: &AtomicBool, shape: &PulseShape) {
    let mut wave = TriangleWave::new(shape);
    light.set_level(wave.value());
    while pulsing.load(Ordering::SeqCst) {
        light.set_level(wave.advance());
        thread::sleep(PULSE_TICK);
    }
    debug!("pulse worker exiting");
}
