//! Character-display mirror of the subsystem state.
//!
//! Stands in for the optional local character display on the model's
//! base: one short line per refresh, redrawn after every state-changing
//! command.

use log::info;

use crate::app::ports::DisplayMirror;
use crate::app::state::{CabinMode, NacelleMode, StateSnapshot};

/// Renders the snapshot as a single fixed-layout log line.
#[derive(Default)]
pub struct ConsoleMirror;

impl ConsoleMirror {
    pub fn new() -> Self {
        Self
    }

    fn format(snapshot: &StateSnapshot) -> String {
        let cabins_mode = match snapshot.cabins_mode {
            CabinMode::Random => "rnd",
            CabinMode::Static => "sta",
        };
        let nacelles_mode = match snapshot.nacelles_mode {
            NacelleMode::Pulse => "pul",
            NacelleMode::Static => "sta",
        };
        format!(
            "CAB {} {} [{}] | NAC {} {} | BLK {}",
            on_off(snapshot.cabins),
            cabins_mode,
            snapshot.cabin_lights,
            on_off(snapshot.nacelles),
            nacelles_mode,
            on_off(snapshot.blinkers),
        )
    }
}

fn on_off(lit: bool) -> &'static str {
    if lit {
        "ON "
    } else {
        "off"
    }
}

impl DisplayMirror for ConsoleMirror {
    fn render(&mut self, snapshot: &StateSnapshot) {
        info!(target: "shiplights::display", "{}", Self::format(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_line_is_fixed_layout() {
        let snap = StateSnapshot {
            cabins: true,
            cabins_mode: CabinMode::Random,
            cabin_lights: "10011".to_string(),
            nacelles: false,
            nacelles_mode: NacelleMode::Pulse,
            blinkers: true,
        };
        assert_eq!(
            ConsoleMirror::format(&snap),
            "CAB ON  rnd [10011] | NAC off pul | BLK ON "
        );
    }
}
