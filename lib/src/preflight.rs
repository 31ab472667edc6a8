//! Startup checks that turn a hop request into a ready [`Hopper`].
//!
//! Every failure here is a configuration error: hopping never starts on an
//! interface that is missing, not wireless or not in monitor mode, nor on a
//! degenerate channel list.

use std::time::Duration;

use log::{debug, info};

use crate::channels::ChannelList;
use crate::errors::ConfigError;
use crate::hopper::Hopper;
use crate::interfaces::NetClass;
use crate::probe::is_monitor_mode;
use crate::wireless::{InterfaceName, WirelessControl};

/// What the user asked for, before any of it has been checked against the system.
#[derive(Debug, Clone)]
pub struct HopRequest {
    pub interface: String,
    /// Explicit list; `None` asks the driver for its supported channels.
    pub channels: Option<ChannelList>,
    pub hop: usize,
    pub delay: Duration,
}

/// Validates `request` in order (name, existence, wireless support, monitor
/// mode, channels, stride) and builds the hopper.
pub fn prepare<C: WirelessControl>(control: C, net: &NetClass, request: HopRequest) -> Result<Hopper<C>, ConfigError> {
    let iface = InterfaceName::new(request.interface)?;

    if !net.exists(iface.as_str()) {
        return Err(ConfigError::InterfaceNotFound(iface.to_string()));
    }

    match control.get_protocol(&iface) {
        Ok(protocol) => debug!("{iface} speaks {protocol}"),
        Err(e) => {
            debug!("Protocol query on {iface} failed: {e}");
            return Err(ConfigError::NotWireless(iface.to_string()));
        }
    }

    if !is_monitor_mode(&control, &iface) {
        return Err(ConfigError::NotMonitorMode(iface.to_string()));
    }

    let channels = match request.channels {
        Some(channels) => channels,
        None => {
            let supported = control.get_supported_channels(&iface)?;
            let channels = ChannelList::from_supported(iface.as_str(), &supported)?;
            info!("Discovered {} supported channels on {iface}", channels.len());
            channels
        }
    };

    info!("Using Interface: {iface}");
    info!("Hop: {}", request.hop);
    info!("Hop Timeout: {}", request.delay.as_millis());

    Hopper::new(control, iface, channels, request.hop, request.delay)
}
