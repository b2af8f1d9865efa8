//! Random-flicker engine for the cabin window group.
//!
//! A [`FlickerGroup`] owns a fixed set of lights and at most one worker
//! thread. In Random mode the worker repeatedly toggles one uniformly
//! chosen window, pausing a random `0..=max` tenths of a second between
//! toggles. While the group is switched off the worker idles at the
//! configured poll rate instead of exiting, so `on()` resumes the
//! flicker without spawning a fresh thread.
//!
//! Worker lifecycle is supervised: `set_random` starts a loop only when
//! none is alive, and `set_static` clears the keep-running flag and
//! **joins** the worker before re-lighting, so the group can never end
//! up with two loops fighting over the same windows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, trace};
use rand::Rng;

use crate::app::ports::Light;
use crate::app::state::CabinMode;
use crate::config::FlickerTiming;
use crate::patterns::interruptible_sleep;

/// Flags shared between the group handle and its worker thread.
struct FlickerFlags {
    /// Whether the group is currently displaying.
    active: AtomicBool,
    /// Cleared to ask the worker to exit entirely.
    keep_running: AtomicBool,
}

/// A fixed group of lights with a runtime-selectable flicker mode.
pub struct FlickerGroup {
    lights: Vec<Arc<dyn Light>>,
    mode: CabinMode,
    flags: Arc<FlickerFlags>,
    worker: Option<JoinHandle<()>>,
    timing: FlickerTiming,
}

impl FlickerGroup {
    /// Create a group over a fixed, non-empty set of lights.
    ///
    /// No worker is started until the first [`set_random`](Self::set_random).
    pub fn new(lights: Vec<Arc<dyn Light>>, mode: CabinMode, timing: FlickerTiming) -> Self {
        assert!(!lights.is_empty(), "flicker group needs at least one light");
        Self {
            lights,
            mode,
            flags: Arc::new(FlickerFlags {
                active: AtomicBool::new(false),
                keep_running: AtomicBool::new(false),
            }),
            worker: None,
            timing,
        }
    }

    pub fn mode(&self) -> CabinMode {
        self.mode
    }

    /// Whether the group is currently displaying.
    pub fn is_lit(&self) -> bool {
        self.flags.active.load(Ordering::SeqCst)
    }

    /// One character per light, `'1'` lit / `'0'` unlit, in device order.
    pub fn bitmap(&self) -> String {
        self.lights
            .iter()
            .map(|l| if l.is_lit() { '1' } else { '0' })
            .collect()
    }

    /// Mark the group active and light the initial frame: every window in
    /// Static mode, an independent fair coin flip per window in Random
    /// mode. Does not start the worker; that is `set_random`'s job.
    pub fn on(&mut self) {
        self.on_with(&mut rand::thread_rng());
    }

    /// `on()` with an injected RNG, for deterministic tests.
    pub fn on_with<R: Rng>(&mut self, rng: &mut R) {
        self.flags.active.store(true, Ordering::SeqCst);
        for light in &self.lights {
            if self.mode == CabinMode::Static || rng.gen_bool(0.5) {
                light.on();
            }
        }
    }

    /// Darken every window. The worker is left idling at the poll rate so
    /// a later `on()` resumes flicker without a fresh thread.
    pub fn off(&mut self) {
        self.flags.active.store(false, Ordering::SeqCst);
        for light in &self.lights {
            light.off();
        }
    }

    /// Switch to Random mode and ensure exactly one worker is running.
    pub fn set_random(&mut self) {
        self.mode = CabinMode::Random;
        if self.worker_alive() {
            return;
        }
        self.reap_worker();
        self.flags.keep_running.store(true, Ordering::SeqCst);

        let lights: Vec<Arc<dyn Light>> = self.lights.iter().map(Arc::clone).collect();
        let flags = Arc::clone(&self.flags);
        let timing = self.timing;
        self.worker = Some(thread::spawn(move || run_flicker(&lights, &flags, &timing)));
        debug!("flicker worker started ({} lights)", self.lights.len());
    }

    /// Switch to Static mode: stop and join the worker, wait out the
    /// settle delay, then re-light everything if the group was displaying.
    pub fn set_static(&mut self) {
        self.mode = CabinMode::Static;
        self.stop_worker();
        thread::sleep(self.timing.settle_delay());
        if self.is_lit() {
            self.on();
        }
    }

    /// Whether a worker thread is currently alive.
    pub fn has_worker(&self) -> bool {
        self.worker_alive()
    }

    fn worker_alive(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Drop a handle whose thread has already exited.
    fn reap_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn stop_worker(&mut self) {
        self.flags.keep_running.store(false, Ordering::SeqCst);
        self.reap_worker();
    }
}

impl Drop for FlickerGroup {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

fn run_flicker(lights: &[Arc<dyn Light>], flags: &FlickerFlags, timing: &FlickerTiming) {
    let mut rng = rand::thread_rng();
    while flags.keep_running.load(Ordering::SeqCst) {
        if flags.active.load(Ordering::SeqCst) {
            while flags.active.load(Ordering::SeqCst) && flags.keep_running.load(Ordering::SeqCst) {
                let idx = rng.gen_range(0..lights.len());
                lights[idx].toggle();
                trace!("flicker toggled window {idx}");

                let tenths = rng.gen_range(0..=timing.max_pause_tenths);
                let pause = std::time::Duration::from_millis(u64::from(tenths) * 100);
                interruptible_sleep(pause, || {
                    !flags.active.load(Ordering::SeqCst)
                        || !flags.keep_running.load(Ordering::SeqCst)
                });
            }
        } else {
            // Idle poll while the group is dark; only a full stop exits.
            interruptible_sleep(timing.idle_poll(), || {
                !flags.keep_running.load(Ordering::SeqCst)
            });
        }
    }
    debug!("flicker worker exiting");
}
