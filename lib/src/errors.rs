use thiserror::Error;

/// Errors raised by the wireless control port.
#[derive(Error, Debug)]
pub enum WirelessError {
    #[error("Unable to open control socket: {0}")]
    Socket(std::io::Error),

    #[error("Request {request:#06x} rejected for {interface}: {source}")]
    Ioctl {
        interface: String,
        request: u32,
        source: std::io::Error,
    },

    #[error("Invalid channel: {0}")]
    InvalidChannel(u8),

    #[error("Invalid interface name `{name}`: {reason}")]
    InvalidInterfaceName { name: String, reason: &'static str },

    #[error("Driver reported unknown mode {0}")]
    UnknownMode(u32),

    #[error("Frequency {mantissa}e{exponent} does not fit the MHz range")]
    FrequencyOutOfRange { mantissa: i32, exponent: i16 },
}

/// Fatal configuration errors, all detected before hopping starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Channel list is empty")]
    EmptyChannelList,

    #[error("Too many channels: {0} given, list must be at most {max}", max = crate::channels::MAX_CHANNELS)]
    TooManyChannels(usize),

    #[error("Invalid channel `{0}`; channels must be in 1..=255")]
    InvalidChannel(String),

    #[error("Unable to get supported channels for {0}")]
    NoChannelsDiscovered(String),

    #[error("Hop must be at least 1")]
    ZeroHop,

    #[error("{0} interface not found")]
    InterfaceNotFound(String),

    #[error("{0} is not a wireless interface")]
    NotWireless(String),

    #[error("{0} is not in monitor mode")]
    NotMonitorMode(String),

    #[error("Wireless error: {0}")]
    Wireless(#[from] WirelessError),
}
