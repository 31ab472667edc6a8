//! Hopping Scheduler
//! -----------------
//!
//! Walks a [`ChannelList`] with a fixed stride, switching the interface to
//! each channel it lands on and pausing a fixed delay between hops. The loop
//! only ends through its stop signal; the interface stays on whichever
//! channel was set last.

use std::time::Duration;

use log::{info, warn};
use tokio::sync::watch;

use crate::channels::ChannelList;
use crate::errors::ConfigError;
use crate::frequency::channel_for_frequency;
use crate::wireless::{InterfaceName, WirelessControl};

/// Default hop stride.
pub const DEFAULT_HOP: usize = 1;

/// Default delay between hops, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// What happened on a single hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopOutcome {
    /// The interface is now on `channel`.
    Switched { channel: u8 },
    /// The switch was refused. `actual` is the channel the interface reports
    /// instead, if its frequency could be read (0 when it maps to no channel).
    Failed { attempted: u8, actual: Option<u8> },
}

/// Drives one interface through a [`ChannelList`].
///
/// The hopper starts on the first channel and moves `hop` positions after
/// every attempt, wrapping around the end of the list. It owns its control
/// handle, so nothing else changes the channel while it runs.
#[derive(Debug)]
pub struct Hopper<C> {
    control: C,
    iface: InterfaceName,
    channels: ChannelList,
    hop: usize,
    delay: Duration,
    index: usize,
}

impl<C: WirelessControl> Hopper<C> {
    /// Creates a hopper positioned on the first channel of `channels`.
    ///
    /// # Errors
    /// [`ConfigError::ZeroHop`] if `hop` is 0, which would pin the hopper to
    /// one channel forever.
    pub fn new(control: C, iface: InterfaceName, channels: ChannelList, hop: usize, delay: Duration) -> Result<Self, ConfigError> {
        if hop == 0 {
            return Err(ConfigError::ZeroHop);
        }
        Ok(Self {
            control,
            iface,
            channels,
            hop,
            delay,
            index: 0,
        })
    }

    pub fn interface(&self) -> &InterfaceName {
        &self.iface
    }

    pub fn channels(&self) -> &ChannelList {
        &self.channels
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Switches to the current channel and advances the index by the stride.
    ///
    /// A refused switch is reported, never retried.
    pub fn hop_once(&mut self) -> HopOutcome {
        let channel = self.channels.as_slice()[self.index];

        let outcome = match self.control.set_channel(&self.iface, channel) {
            Ok(()) => {
                info!("{} -> {channel}", self.iface);
                HopOutcome::Switched { channel }
            }
            Err(e) => {
                let actual = self.control.get_frequency(&self.iface).map(channel_for_frequency).ok();
                match actual {
                    Some(actual) => warn!("Unable to set {} to channel {channel} -> {actual} ({e})", self.iface),
                    None => warn!("Unable to set {} to channel {channel} ({e})", self.iface),
                }
                HopOutcome::Failed { attempted: channel, actual }
            }
        };

        let len = self.channels.len();
        self.index = (self.index + self.hop % len) % len;
        outcome
    }

    /// Hops until `shutdown` fires or its sender is dropped, returning the
    /// number of hops made.
    ///
    /// The signal is checked before every hop and also cuts the pause between
    /// hops short.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<()>) -> u64 {
        info!(
            "Hopping {} over channels {} (hop: {}, timeout: {}ms)",
            self.iface,
            self.channels,
            self.hop,
            self.delay.as_millis()
        );

        let mut hops = 0;
        loop {
            if shutdown.has_changed().unwrap_or(true) {
                break;
            }

            self.hop_once();
            hops += 1;

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        info!("Stopped hopping on {} after {hops} hops", self.iface);
        hops
    }
}
