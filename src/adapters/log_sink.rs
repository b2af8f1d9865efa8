//! Event sink that writes the operator log.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::state::{CabinMode, NacelleMode};

/// Logs every application event as a short operator message.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CabinsOn => info!("Cabins on."),
            AppEvent::CabinsOff => info!("Cabins off."),
            AppEvent::CabinsModeSet(CabinMode::Random) => info!("Cabins mode set to random."),
            AppEvent::CabinsModeSet(CabinMode::Static) => info!("Cabins mode set to static."),
            AppEvent::NacellesOn => info!("Nacelles on."),
            AppEvent::NacellesOff => info!("Nacelles off."),
            AppEvent::NacellesModeSet(NacelleMode::Pulse) => info!("Nacelles mode set to pulse."),
            AppEvent::NacellesModeSet(NacelleMode::Static) => {
                info!("Nacelles mode set to static.");
            }
            AppEvent::BlinkersOn => info!("Blinkers on."),
            AppEvent::BlinkersOff => info!("Blinkers off."),
            AppEvent::AllOn => info!("All on."),
            AppEvent::AllOff => info!("All off."),
            AppEvent::StateQueried => info!("Getting state."),
            AppEvent::ShuttingDown => info!("Stopping..."),
        }
    }
}
