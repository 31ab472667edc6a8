//! # Hop Service
//!
//! Validates the requested interface and channel list, then hops until the
//! process receives SIGINT or SIGTERM. The interface is left on the last
//! channel that was set.

use lib::interfaces::NetClass;
use lib::preflight;
use lib::wireless::WirelessExtensions;
use log::*;
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::sync::watch;

use crate::errors::AppError;
use crate::services::{GlobalConfig, HopConfig, Run};

pub struct HopService {
    global_config: GlobalConfig,
    config: HopConfig,
}

impl Run<HopConfig> for HopService {
    fn new(global_config: GlobalConfig, config: HopConfig) -> Self {
        HopService { global_config, config }
    }

    async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        debug!("Starting hop service (log level: {})", self.global_config.log_level);
        ensure_root()?;

        let request = self.config.clone().into_request()?;
        let mut hopper = preflight::prepare(WirelessExtensions::new(), &NetClass::default(), request)?;

        // Register handlers before the first hop so an early signal is not lost.
        let interrupt = signal(SignalKind::interrupt())?;
        let terminate = signal(SignalKind::terminate())?;
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        tokio::spawn(forward_signals(interrupt, terminate, shutdown_tx));

        hopper.run(shutdown_rx).await;
        Ok(())
    }
}

/// Fires `shutdown` on the first SIGINT or SIGTERM.
async fn forward_signals(mut interrupt: Signal, mut terminate: Signal, shutdown: watch::Sender<()>) {
    tokio::select! {
        _ = interrupt.recv() => info!("Received SIGINT"),
        _ = terminate.recv() => info!("Received SIGTERM"),
    }
    if shutdown.send(()).is_err() {
        debug!("Hopper already stopped");
    }
}

/// Changing channels needs root.
fn ensure_root() -> Result<(), AppError> {
    // SAFETY: geteuid has no preconditions and cannot fail.
    if unsafe { libc::geteuid() } != 0 {
        return Err(AppError::NotRoot);
    }
    Ok(())
}
