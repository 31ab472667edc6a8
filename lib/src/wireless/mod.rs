//!
//! Wireless Control Port
//! ---------------------
//!
//! Everything that reads or writes the radio state of an interface goes
//! through [`WirelessControl`]. Implementations are stateless handles: each
//! call acquires its own control socket and releases it before returning, so
//! a failure only ever affects the call that hit it.

#[cfg(test)]
use mockall::automock;

use std::fmt;

use crate::errors::WirelessError;

pub mod wext;

pub use wext::WirelessExtensions;

/// Size of the kernel's interface name field, terminating NUL included.
pub const IFNAMSIZ: usize = 16;

/// Structural cap on the number of channels a list can hold.
pub const MAX_SUPPORTED_CHANNELS: usize = u8::MAX as usize;

/// Name of a network device, checked against the kernel's naming rules.
///
/// Names that do not fit the fixed-width kernel field are rejected instead
/// of being truncated onto some other device's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceName(String);

impl InterfaceName {
    pub fn new(name: impl Into<String>) -> Result<Self, WirelessError> {
        let name = name.into();
        let reject = |reason| Err(WirelessError::InvalidInterfaceName { name: name.clone(), reason });

        if name.is_empty() {
            return reject("name is empty");
        }
        if name.len() >= IFNAMSIZ {
            return reject("name is longer than 15 bytes");
        }
        if name == "." || name == ".." {
            return reject("name is reserved");
        }
        if name.chars().any(|c| c == '/' || c == ':' || c == '\0' || c.is_whitespace()) {
            return reject("name contains '/', ':', NUL or whitespace");
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// NUL padded copy for the `ifr_name` field of a request.
    pub fn to_ifr_name(&self) -> [libc::c_char; IFNAMSIZ] {
        let mut buf = [0 as libc::c_char; IFNAMSIZ];
        for (dst, src) in buf.iter_mut().zip(self.0.as_bytes()) {
            *dst = *src as libc::c_char;
        }
        buf
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for InterfaceName {
    type Error = WirelessError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

/// Operating mode reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Auto,
    AdHoc,
    Infrastructure,
    Master,
    Repeater,
    Secondary,
    Monitor,
    Mesh,
}

impl TryFrom<u32> for Mode {
    type Error = WirelessError;

    /// Maps the kernel's `IW_MODE_*` values.
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => Mode::Auto,
            1 => Mode::AdHoc,
            2 => Mode::Infrastructure,
            3 => Mode::Master,
            4 => Mode::Repeater,
            5 => Mode::Secondary,
            6 => Mode::Monitor,
            7 => Mode::Mesh,
            other => return Err(WirelessError::UnknownMode(other)),
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Auto => "Auto",
            Mode::AdHoc => "Ad-Hoc",
            Mode::Infrastructure => "Infrastructure",
            Mode::Master => "Master",
            Mode::Repeater => "Repeater",
            Mode::Secondary => "Secondary",
            Mode::Monitor => "Monitor",
            Mode::Mesh => "Mesh",
        };
        f.write_str(name)
    }
}

/// Result of a supported channel query.
///
/// A rejected range query is not an error: the caller gets `Unavailable`
/// and can fall back to a list of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportedChannels {
    /// Channel indices as advertised by the driver, in driver order.
    Reported(Vec<u8>),
    /// The driver rejected the range query.
    Unavailable,
}

impl SupportedChannels {
    /// Channels to work with; empty when the query was rejected.
    pub fn channels(&self) -> &[u8] {
        match self {
            SupportedChannels::Reported(channels) => channels,
            SupportedChannels::Unavailable => &[],
        }
    }
}

/// Wireless Control Port Trait
/// ---------------------------
///
/// Queries and commands issued against a single named interface. Each call
/// is one blocking request to the driver.
#[cfg_attr(test, automock)]
pub trait WirelessControl {
    /// Radio protocol name (e.g. "IEEE 802.11"). Fails for wired interfaces.
    fn get_protocol(&self, iface: &InterfaceName) -> Result<String, WirelessError>;

    /// Current operating mode.
    fn get_mode(&self, iface: &InterfaceName) -> Result<Mode, WirelessError>;

    /// Current operating frequency in MHz.
    fn get_frequency(&self, iface: &InterfaceName) -> Result<u16, WirelessError>;

    /// Switch to `channel`. Channel 0 is rejected without touching the driver.
    fn set_channel(&self, iface: &InterfaceName, channel: u8) -> Result<(), WirelessError>;

    /// Channel indices the driver advertises, capped at [`MAX_SUPPORTED_CHANNELS`].
    fn get_supported_channels(&self, iface: &InterfaceName) -> Result<SupportedChannels, WirelessError>;
}
