//! Controller configuration.
//!
//! All tunable parameters for the lighting rig. Defaults reproduce the
//! timing of the original installation; values can be overridden from a
//! JSON config file at startup.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default TCP port for the command server.
pub const DEFAULT_PORT: u16 = 3141;

/// Core controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Bind address for the command server.
    pub listen_addr: String,

    /// Grace delay between the `stop` command and process exit (ms).
    pub shutdown_grace_ms: u64,

    /// Nacelle pulse fade curve.
    pub pulse: PulseShape,

    /// Cabin flicker timing.
    pub flicker: FlickerTiming,

    /// Navigation blinker choreography timing.
    pub blinkers: BlinkerTiming,
}

/// Triangle-wave fade shape for the nacelle pulse.
///
/// Rise and fall durations are independent, so an asymmetric pulse
/// (quick rise, slow decay) is a configuration, not a special case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseShape {
    /// Seconds to fade from `lower_limit` to `upper_limit`.
    pub fade_in_secs: f32,
    /// Seconds to fade back down.
    pub fade_out_secs: f32,
    /// Bottom of the fade, in [0, 1].
    pub lower_limit: f32,
    /// Top of the fade, in [0, 1].
    pub upper_limit: f32,
}

/// Cabin flicker cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerTiming {
    /// Pause between the mode switch to static and re-lighting (ms).
    pub settle_delay_ms: u64,
    /// Poll interval while the group is switched off (ms).
    pub idle_poll_ms: u64,
    /// Upper bound of the random inter-toggle pause, in tenths of a
    /// second. The pause is drawn uniformly from `0..=max`.
    pub max_pause_tenths: u32,
}

/// Navigation blinker periods and stagger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkerTiming {
    /// Side (port/starboard) blinker on-time (seconds).
    pub side_on_secs: f32,
    /// Side blinker off-time (seconds).
    pub side_off_secs: f32,
    /// Top blinker on-time (seconds).
    pub top_on_secs: f32,
    /// Top blinker off-time (seconds).
    pub top_off_secs: f32,
    /// Stagger between successive blinker starts (ms).
    pub stagger_ms: u64,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            shutdown_grace_ms: 500,
            pulse: PulseShape::default(),
            flicker: FlickerTiming::default(),
            blinkers: BlinkerTiming::default(),
        }
    }
}

impl Default for PulseShape {
    fn default() -> Self {
        Self {
            fade_in_secs: 0.3,
            fade_out_secs: 0.9,
            lower_limit: 0.6,
            upper_limit: 1.0,
        }
    }
}

impl Default for FlickerTiming {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1200,
            idle_poll_ms: 1000,
            max_pause_tenths: 50, // up to 5 s between toggles
        }
    }
}

impl Default for BlinkerTiming {
    fn default() -> Self {
        Self {
            side_on_secs: 5.0,
            side_off_secs: 0.1,
            top_on_secs: 0.1,
            top_off_secs: 2.0,
            stagger_ms: 100,
        }
    }
}

impl ShipConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pulse.validate()?;
        if self.flicker.max_pause_tenths == 0 {
            return Err(ConfigError::ValidationFailed(
                "flicker.max_pause_tenths must be at least 1",
            ));
        }
        if self.flicker.idle_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "flicker.idle_poll_ms must be non-zero",
            ));
        }
        if self.blinkers.side_on_secs <= 0.0 || self.blinkers.top_on_secs <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "blinker on-times must be positive",
            ));
        }
        Ok(())
    }
}

impl PulseShape {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_in_secs <= 0.0 || self.fade_out_secs <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "pulse fade durations must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.lower_limit) || !(0.0..=1.0).contains(&self.upper_limit) {
            return Err(ConfigError::ValidationFailed(
                "pulse limits must lie in [0, 1]",
            ));
        }
        if self.lower_limit >= self.upper_limit {
            return Err(ConfigError::ValidationFailed(
                "pulse lower_limit must be below upper_limit",
            ));
        }
        Ok(())
    }
}

impl FlickerTiming {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}

impl BlinkerTiming {
    pub fn side_on(&self) -> Duration {
        Duration::from_secs_f32(self.side_on_secs)
    }

    pub fn side_off(&self) -> Duration {
        Duration::from_secs_f32(self.side_off_secs)
    }

    pub fn top_on(&self) -> Duration {
        Duration::from_secs_f32(self.top_on_secs)
    }

    pub fn top_off(&self) -> Duration {
        Duration::from_secs_f32(self.top_off_secs)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}
