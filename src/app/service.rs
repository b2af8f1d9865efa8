//! Ship service: subsystem orchestration and command dispatch.
//!
//! [`ShipService`] owns the three subsystems (cabins, nacelles,
//! blinkers), their mode flags, and the pattern engines that drive them.
//! It exposes the on/off/mode operations, a consistent state snapshot,
//! and `process_command`, the single dispatch point for the remote
//! protocol.
//!
//! ```text
//!  JSON request ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │       ShipService         │
//!     Light ports ◀─│  FlickerGroup · Pulse ·   │
//!                   │  BlinkerSet               │
//!                   └──────────────────────────┘
//! ```
//!
//! The service is shared behind a single lock; background pattern
//! workers hold only their own flags and device handles, never the
//! service lock.

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::app::commands::Command;
use crate::app::events::AppEvent;
use crate::app::ports::{BlinkLight, EventSink, Light, PwmLight};
use crate::app::state::{CabinMode, NacelleMode, StateSnapshot};
use crate::config::{PulseShape, ShipConfig};
use crate::error::CommandError;
use crate::patterns::blinkers::BlinkerSet;
use crate::patterns::flicker::FlickerGroup;
use crate::patterns::pulse::PulseEngine;

/// The physical (or simulated) devices making up the rig, in the wiring
/// layout of the original model.
pub struct ShipRig {
    /// Always-on cabin light, the subsystem's on/off indicator.
    pub static_cabins: Arc<dyn Light>,
    /// Flickering cabin windows, in device order.
    pub cabin_windows: Vec<Arc<dyn Light>>,
    /// Always-on nacelle light, the subsystem's on/off indicator.
    pub static_nacelles: Arc<dyn Light>,
    /// PWM nacelle glow driven by the pulse engine.
    pub nacelle_glow: Arc<dyn PwmLight>,
    pub port_blinker: Arc<dyn BlinkLight>,
    pub starboard_blinker: Arc<dyn BlinkLight>,
    /// Top blinkers 1–3 in device order (choreography fires 1, 3, 2).
    pub top_blinkers: [Arc<dyn BlinkLight>; 3],
}

/// Outcome of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A command was applied; subsystem state may have changed.
    Applied,
    /// Snapshot reply to `get_state`; no mutation.
    State(StateSnapshot),
    /// Well-shaped but unrecognised request; nothing happened.
    Ignored,
    /// `stop` was accepted: everything is off, the process should exit.
    Shutdown,
}

pub struct ShipService {
    static_cabins: Arc<dyn Light>,
    cabins: FlickerGroup,
    static_nacelles: Arc<dyn Light>,
    nacelle_glow: Arc<dyn PwmLight>,
    nacelles: PulseEngine,
    blinkers: BlinkerSet,
    cabins_mode: CabinMode,
    nacelles_mode: NacelleMode,
    blinkers_lit: bool,
    pulse_shape: PulseShape,
}

impl ShipService {
    /// Assemble the service from a device rig and configuration.
    ///
    /// Boots with the original rig's default modes: random cabins,
    /// pulsing nacelles. Nothing is lit until the first `on` call.
    pub fn new(rig: ShipRig, config: &ShipConfig) -> Self {
        let cabins = FlickerGroup::new(rig.cabin_windows, CabinMode::Random, config.flicker);
        let nacelles = PulseEngine::new(Arc::clone(&rig.nacelle_glow));
        let blinkers = BlinkerSet::new(
            rig.port_blinker,
            rig.starboard_blinker,
            rig.top_blinkers,
            config.blinkers,
        );
        Self {
            static_cabins: rig.static_cabins,
            cabins,
            static_nacelles: rig.static_nacelles,
            nacelle_glow: rig.nacelle_glow,
            nacelles,
            blinkers,
            cabins_mode: CabinMode::Random,
            nacelles_mode: NacelleMode::Pulse,
            blinkers_lit: false,
            pulse_shape: config.pulse,
        }
    }

    // ── Cabins ────────────────────────────────────────────────

    pub fn cabins_on(&mut self) {
        self.static_cabins.on();
        self.cabins.on();
        match self.cabins_mode {
            CabinMode::Static => self.cabins.set_static(),
            CabinMode::Random => self.cabins.set_random(),
        }
    }

    pub fn cabins_off(&mut self) {
        self.static_cabins.off();
        self.cabins.off();
    }

    /// Store the cabin mode; if the cabins are currently displaying,
    /// restart them so the change is immediately visible.
    pub fn set_cabins_mode(&mut self, mode: CabinMode) {
        self.cabins_mode = mode;
        if self.cabins.is_lit() {
            self.cabins_off();
            self.cabins_on();
        }
    }

    pub fn cabins_mode(&self) -> CabinMode {
        self.cabins_mode
    }

    // ── Nacelles ──────────────────────────────────────────────

    pub fn nacelles_on(&mut self) {
        self.static_nacelles.on();
        match self.nacelles_mode {
            NacelleMode::Static => {
                // Full glow, not a pulse.
                self.nacelles.stop();
                self.nacelle_glow.on();
            }
            NacelleMode::Pulse => self.nacelles.start(self.pulse_shape),
        }
    }

    pub fn nacelles_off(&mut self) {
        self.static_nacelles.off();
        self.nacelles.stop();
    }

    /// Store the nacelle mode; if the nacelles are currently on, restart
    /// them so the change is immediately visible.
    pub fn set_nacelles_mode(&mut self, mode: NacelleMode) {
        self.nacelles_mode = mode;
        if self.static_nacelles.is_lit() {
            self.nacelles_off();
            self.nacelles_on();
        }
    }

    pub fn nacelles_mode(&self) -> NacelleMode {
        self.nacelles_mode
    }

    // ── Blinkers ──────────────────────────────────────────────

    pub fn blinkers_on(&mut self) {
        self.blinkers.start();
        self.blinkers_lit = true;
    }

    pub fn blinkers_off(&mut self) {
        self.blinkers.all_off();
        self.blinkers_lit = false;
    }

    // ── Whole ship ────────────────────────────────────────────

    pub fn all_on(&mut self) {
        self.cabins_on();
        self.nacelles_on();
        self.blinkers_on();
    }

    pub fn all_off(&mut self) {
        self.cabins_off();
        self.nacelles_off();
        self.blinkers_off();
    }

    // ── Queries ───────────────────────────────────────────────

    /// Point-in-time snapshot of all subsystem state. Callers hold the
    /// service lock for the duration, so no command can interleave;
    /// individual window bits may still move under a live flicker worker.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            cabins: self.static_cabins.is_lit(),
            cabins_mode: self.cabins_mode,
            cabin_lights: self.cabins.bitmap(),
            nacelles: self.static_nacelles.is_lit(),
            nacelles_mode: self.nacelles_mode,
            blinkers: self.blinkers_lit,
        }
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Decode and apply one remote request.
    ///
    /// Unrecognised commands are deliberately ignored (the protocol is
    /// lenient); a request that is neither a string nor a sequence of
    /// strings is a [`CommandError`] surfaced to the caller.
    pub fn process_command(
        &mut self,
        request: &Value,
        sink: &mut impl EventSink,
    ) -> Result<Dispatch, CommandError> {
        match Command::from_request(request)? {
            Some(cmd) => Ok(self.handle_command(cmd, sink)),
            None => {
                debug!("ignoring unrecognised command: {request}");
                Ok(Dispatch::Ignored)
            }
        }
    }

    /// Apply one parsed command and emit the matching event.
    pub fn handle_command(&mut self, cmd: Command, sink: &mut impl EventSink) -> Dispatch {
        match cmd {
            Command::CabinsOn => {
                self.cabins_on();
                sink.emit(&AppEvent::CabinsOn);
            }
            Command::CabinsOff => {
                self.cabins_off();
                sink.emit(&AppEvent::CabinsOff);
            }
            Command::SetCabinsMode(mode) => {
                self.set_cabins_mode(mode);
                sink.emit(&AppEvent::CabinsModeSet(mode));
            }
            Command::NacellesOn => {
                self.nacelles_on();
                sink.emit(&AppEvent::NacellesOn);
            }
            Command::NacellesOff => {
                self.nacelles_off();
                sink.emit(&AppEvent::NacellesOff);
            }
            Command::SetNacellesMode(mode) => {
                self.set_nacelles_mode(mode);
                sink.emit(&AppEvent::NacellesModeSet(mode));
            }
            Command::BlinkersOn => {
                self.blinkers_on();
                sink.emit(&AppEvent::BlinkersOn);
            }
            Command::BlinkersOff => {
                self.blinkers_off();
                sink.emit(&AppEvent::BlinkersOff);
            }
            Command::AllOn => {
                self.all_on();
                sink.emit(&AppEvent::AllOn);
            }
            Command::AllOff => {
                self.all_off();
                sink.emit(&AppEvent::AllOff);
            }
            Command::GetState => {
                sink.emit(&AppEvent::StateQueried);
                return Dispatch::State(self.snapshot());
            }
            Command::Shutdown => {
                self.all_off();
                sink.emit(&AppEvent::ShuttingDown);
                return Dispatch::Shutdown;
            }
        }
        Dispatch::Applied
    }
}
