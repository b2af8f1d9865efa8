//! Lifecycle tests for the background pattern workers: at most one loop
//! per group/engine, cooperative cancellation, resume without respawn.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use shiplights::adapters::sim::{SimLight, SimPwmLight};
use shiplights::app::ports::{Light, PwmLight};
use shiplights::app::state::CabinMode;
use shiplights::config::{FlickerTiming, PulseShape};
use shiplights::patterns::flicker::FlickerGroup;
use shiplights::patterns::pulse::PulseEngine;

fn fast_timing() -> FlickerTiming {
    FlickerTiming {
        settle_delay_ms: 10,
        idle_poll_ms: 20,
        max_pause_tenths: 1, // toggles at most 100 ms apart
    }
}

fn flicker_group(n: usize) -> (FlickerGroup, Vec<SimLight>) {
    let lights: Vec<SimLight> = (0..n)
        .map(|i| SimLight::new(format!("w{i}")))
        .collect();
    let ports: Vec<Arc<dyn Light>> = lights
        .iter()
        .map(|l| Arc::new(l.clone()) as Arc<dyn Light>)
        .collect();
    (
        FlickerGroup::new(ports, CabinMode::Random, fast_timing()),
        lights,
    )
}

// ── Flicker worker lifecycle ─────────────────────────────────

#[test]
fn rapid_set_random_never_stacks_workers() {
    let (mut group, _lights) = flicker_group(4);
    for _ in 0..10 {
        group.set_random();
    }
    assert!(group.has_worker(), "one worker should be running");
    group.set_static();
    assert!(
        !group.has_worker(),
        "set_static must stop and join the worker"
    );
}

#[test]
fn off_leaves_worker_idling_for_resume() {
    let (mut group, _lights) = flicker_group(4);
    group.on();
    group.set_random();
    assert!(group.has_worker());

    group.off();
    thread::sleep(Duration::from_millis(60));
    assert!(group.has_worker(), "off() must not kill the worker");

    group.on();
    assert!(group.has_worker(), "resume reuses the idling worker");
}

#[test]
fn random_mode_actually_flickers() {
    let (mut group, lights) = flicker_group(1);
    group.on();
    group.set_random();

    // One window, toggles at most 100 ms apart: sample for transitions.
    let mut last = lights[0].is_lit();
    let mut transitions = 0;
    for _ in 0..80 {
        thread::sleep(Duration::from_millis(10));
        let now = lights[0].is_lit();
        if now != last {
            transitions += 1;
            last = now;
        }
    }
    assert!(transitions > 0, "window never toggled in 800 ms");
}

#[test]
fn set_static_after_flicker_lights_everything() {
    let (mut group, lights) = flicker_group(5);
    group.on();
    group.set_random();
    thread::sleep(Duration::from_millis(150));

    group.set_static();
    assert!(!group.has_worker());
    assert!(
        lights.iter().all(Light::is_lit),
        "static mode must settle with every window lit"
    );
    assert_eq!(group.bitmap(), "11111");
}

// ── Pulse engine lifecycle ───────────────────────────────────

fn fast_shape() -> PulseShape {
    PulseShape {
        fade_in_secs: 0.1,
        fade_out_secs: 0.1,
        lower_limit: 0.2,
        upper_limit: 1.0,
    }
}

#[test]
fn rapid_restart_keeps_single_pulse_worker() {
    let glow = SimPwmLight::new("glow");
    let mut engine = PulseEngine::new(Arc::new(glow.clone()));

    for _ in 0..5 {
        engine.start(fast_shape());
    }
    assert!(engine.is_pulsing());
    assert!(engine.has_worker());

    thread::sleep(Duration::from_millis(200));
    assert!(
        glow.level() >= 0.2 - 1e-4,
        "running pulse stays above the lower limit"
    );

    engine.stop();
    assert!(!engine.is_pulsing());
    assert!(!engine.has_worker());
}

#[test]
fn stop_is_idempotent_and_forces_off() {
    let glow = SimPwmLight::new("glow");
    let mut engine = PulseEngine::new(Arc::new(glow.clone()));

    // Stop before any start: still forces the light off.
    glow.set_level(0.7);
    engine.stop();
    assert!((glow.level() - 0.0).abs() < 1e-6);

    engine.start(fast_shape());
    thread::sleep(Duration::from_millis(120));
    engine.stop();
    engine.stop();
    assert!((glow.level() - 0.0).abs() < 1e-6);
    assert!(!engine.has_worker());
}

#[test]
fn engine_restarts_after_stop() {
    let glow = SimPwmLight::new("glow");
    let mut engine = PulseEngine::new(Arc::new(glow.clone()));

    engine.start(fast_shape());
    engine.stop();
    engine.start(fast_shape());
    assert!(engine.has_worker());
    thread::sleep(Duration::from_millis(100));
    assert!(glow.is_lit(), "restarted pulse drives the light again");
    engine.stop();
}
