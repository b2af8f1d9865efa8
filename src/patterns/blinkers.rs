//! Navigation blinker choreography.
//!
//! The blink pattern itself is an external device capability
//! ([`BlinkLight`]); this module only sequences the startup: the side
//! pair first (port leads, starboard one stagger later), then the top
//! triple in 1, 3, 2 order with the same stagger. Side and top groups
//! each share one period/duty.

use std::sync::Arc;
use std::thread;

use log::debug;

use crate::app::ports::BlinkLight;
use crate::config::BlinkerTiming;

/// The five navigation blinkers and their choreography timing.
pub struct BlinkerSet {
    port: Arc<dyn BlinkLight>,
    starboard: Arc<dyn BlinkLight>,
    top: [Arc<dyn BlinkLight>; 3],
    timing: BlinkerTiming,
}

impl BlinkerSet {
    pub fn new(
        port: Arc<dyn BlinkLight>,
        starboard: Arc<dyn BlinkLight>,
        top: [Arc<dyn BlinkLight>; 3],
        timing: BlinkerTiming,
    ) -> Self {
        Self {
            port,
            starboard,
            top,
            timing,
        }
    }

    /// Run the startup choreography. Blocks for three staggers (roughly
    /// 300 ms at default timing) while the starts are spaced out.
    pub fn start(&self) {
        let t = &self.timing;

        self.port.blink(t.side_on(), t.side_off());
        thread::sleep(t.stagger());
        self.starboard.blink(t.side_on(), t.side_off());

        self.top[0].blink(t.top_on(), t.top_off());
        thread::sleep(t.stagger());
        self.top[2].blink(t.top_on(), t.top_off());
        thread::sleep(t.stagger());
        self.top[1].blink(t.top_on(), t.top_off());

        debug!("blinker choreography started");
    }

    /// Cancel every blinker and darken it.
    pub fn all_off(&self) {
        self.port.off();
        self.starboard.off();
        for light in &self.top {
            light.off();
        }
    }
}
