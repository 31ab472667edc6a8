//! Channel lists: the ordered set of channels a hopper cycles through.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::errors::ConfigError;
use crate::wireless::SupportedChannels;

/// Maximum number of channels in a list.
pub const MAX_CHANNELS: usize = 255;

/// Separator between channels in a list argument.
pub const CHANNEL_DELIMITER: char = ',';

/// Non-empty, ordered list of distinct channels in `1..=255`.
///
/// Order is hopping order. Construction is the only place the invariants are
/// checked, so a `ChannelList` can always be hopped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelList(Vec<u8>);

impl ChannelList {
    /// Builds a list from channel values, dropping repeats after their first occurrence.
    pub fn new(channels: impl IntoIterator<Item = u8>) -> Result<Self, ConfigError> {
        let mut list = Vec::new();
        for channel in channels {
            if channel == 0 {
                return Err(ConfigError::InvalidChannel(channel.to_string()));
            }
            if list.contains(&channel) {
                warn!("Channel {channel} listed more than once, keeping the first");
                continue;
            }
            list.push(channel);
        }

        if list.is_empty() {
            return Err(ConfigError::EmptyChannelList);
        }
        if list.len() > MAX_CHANNELS {
            return Err(ConfigError::TooManyChannels(list.len()));
        }
        Ok(Self(list))
    }

    /// Parses a comma separated argument such as `"1,6,11"`.
    ///
    /// Empty fields are skipped; any other field that is not a channel in
    /// `1..=255` fails the whole list.
    pub fn parse(arg: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = arg.split(CHANNEL_DELIMITER).map(str::trim).filter(|t| !t.is_empty()).collect();
        if tokens.len() > MAX_CHANNELS {
            return Err(ConfigError::TooManyChannels(tokens.len()));
        }

        let channels = tokens
            .into_iter()
            .map(|token| match token.parse::<u8>() {
                Ok(channel) if channel != 0 => Ok(channel),
                _ => Err(ConfigError::InvalidChannel(token.to_string())),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::new(channels)
    }

    /// Builds a list from what the driver advertised for `iface`.
    ///
    /// A rejected query, an empty table or a table of only zero entries all
    /// mean nothing was discovered.
    pub fn from_supported(iface: &str, supported: &SupportedChannels) -> Result<Self, ConfigError> {
        let discovered: Vec<u8> = supported.channels().iter().copied().filter(|&c| c != 0).collect();
        if discovered.is_empty() {
            return Err(ConfigError::NoChannelsDiscovered(iface.to_string()));
        }
        Self::new(discovered.into_iter().take(MAX_CHANNELS))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ChannelList {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChannelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(u8::to_string).collect();
        f.write_str(&joined.join(","))
    }
}
