//! Subsystem mode enums and the wire-format state snapshot.

use serde::{Deserialize, Serialize};

/// Display mode of the cabin window group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinMode {
    /// One randomly chosen window toggles at random intervals.
    Random,
    /// All windows held continuously on.
    Static,
}

/// Display mode of the nacelle glow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NacelleMode {
    /// PWM device held fully on.
    Static,
    /// Triangle-wave fade between the configured limits.
    Pulse,
}

/// Point-in-time snapshot of all subsystem state.
///
/// Field names and encodings are the wire format: this struct serialises
/// directly into the `get_state` response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Cabin subsystem on/off.
    pub cabins: bool,
    pub cabins_mode: CabinMode,
    /// One character per cabin window, in device order: `'1'` lit, `'0'` unlit.
    pub cabin_lights: String,
    /// Nacelle subsystem on/off.
    pub nacelles: bool,
    pub nacelles_mode: NacelleMode,
    /// Whether `blinkers on` was the last blinker command issued.
    /// A last-command flag, not a hardware readback.
    pub blinkers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_serialise_lowercase() {
        assert_eq!(serde_json::to_string(&CabinMode::Random).unwrap(), "\"random\"");
        assert_eq!(serde_json::to_string(&CabinMode::Static).unwrap(), "\"static\"");
        assert_eq!(serde_json::to_string(&NacelleMode::Pulse).unwrap(), "\"pulse\"");
        assert_eq!(serde_json::to_string(&NacelleMode::Static).unwrap(), "\"static\"");
    }

    #[test]
    fn snapshot_wire_format() {
        let snap = StateSnapshot {
            cabins: true,
            cabins_mode: CabinMode::Random,
            cabin_lights: "10110".to_string(),
            nacelles: false,
            nacelles_mode: NacelleMode::Pulse,
            blinkers: true,
        };
        let v: serde_json::Value = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["cabins"], true);
        assert_eq!(v["cabins_mode"], "random");
        assert_eq!(v["cabin_lights"], "10110");
        assert_eq!(v["nacelles"], false);
        assert_eq!(v["nacelles_mode"], "pulse");
        assert_eq!(v["blinkers"], true);
    }
}
