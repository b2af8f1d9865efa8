//! Shiplights: ship-model lighting controller.
//!
//! Boots the simulated rig fully lit (nacelles, cabins, blinkers, in the
//! original power-on order) and serves the command protocol until a
//! `stop` command arrives.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use parking_lot::Mutex;

use shiplights::adapters::display::ConsoleMirror;
use shiplights::adapters::log_sink::LogEventSink;
use shiplights::adapters::sim;
use shiplights::app::service::ShipService;
use shiplights::config::ShipConfig;
use shiplights::server::CommandServer;

#[derive(Parser)]
#[command(name = "shiplights", version, about)]
struct Args {
    /// Path to a JSON config file (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen address (e.g. 0.0.0.0:3141).
    #[arg(long)]
    listen: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ShipConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ShipConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    info!("shiplights v{}", env!("CARGO_PKG_VERSION"));

    let rig = sim::bench_rig();
    let service = Arc::new(Mutex::new(ShipService::new(rig, &config)));

    // Power-on sequence of the original rig: everything lights up.
    {
        let mut ship = service.lock();
        ship.nacelles_on();
        ship.cabins_on();
        ship.blinkers_on();
    }

    let server = CommandServer::bind(config.listen_addr.as_str(), Arc::clone(&service))
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!("listening on {}", server.local_addr()?);

    let mut sink = LogEventSink::new();
    let mut mirror = ConsoleMirror::new();
    server.run(&mut sink, &mut mirror)?;

    info!("shutting down");
    thread::sleep(Duration::from_millis(config.shutdown_grace_ms));
    Ok(())
}
