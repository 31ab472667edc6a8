//! Frequency to channel translation for the 2.4 GHz and 5 GHz bands.
//!
//! The mapping is lossy and only used to report which channel an interface
//! ended up on; channel selection always passes the raw channel index to the
//! driver.

use crate::errors::WirelessError;

/// Spacing between adjacent channels, in MHz.
pub const FREQUENCY_DELTA: u16 = 5;

/// 2.4 GHz reference frequency; channel 1 sits one delta above it.
pub const BG_BASE_FREQUENCY: u16 = 2407;
/// Channel 1.
pub const BG_LOWER_FREQUENCY: u16 = 2412;
/// Channel 13.
pub const BG_UPPER_FREQUENCY: u16 = 2472;
/// Channel 14 is off the linear grid.
pub const BG_CH14_FREQUENCY: u16 = 2484;

pub const A_BASE_FREQUENCY: u16 = 5000;
/// Channel 34.
pub const A_LOWER_FREQUENCY: u16 = 5170;
/// Channel 165.
pub const A_UPPER_FREQUENCY: u16 = 5825;

/// Returned when a frequency maps to no known channel.
pub const UNKNOWN_CHANNEL: u8 = 0;

/// Returns the channel for a frequency in MHz, or [`UNKNOWN_CHANNEL`].
pub fn channel_for_frequency(freq: u16) -> u8 {
    let channel = match freq {
        BG_LOWER_FREQUENCY..=BG_UPPER_FREQUENCY => (freq - BG_BASE_FREQUENCY) / FREQUENCY_DELTA,
        BG_CH14_FREQUENCY => 14,
        A_LOWER_FREQUENCY..=A_UPPER_FREQUENCY => (freq - A_BASE_FREQUENCY) / FREQUENCY_DELTA,
        _ => return UNKNOWN_CHANNEL,
    };
    // Both linear ranges top out at channel 165.
    channel as u8
}

/// Decodes the kernel's `m * 10^e` Hz representation into MHz.
///
/// An exponent of zero hands the mantissa back untouched, which is what
/// drivers reporting an already scaled value (or a bare channel index) expect.
pub fn decode_mhz(mantissa: i32, exponent: i16) -> Result<u16, WirelessError> {
    let out_of_range = || WirelessError::FrequencyOutOfRange { mantissa, exponent };

    let value = if exponent == 0 {
        i64::from(mantissa)
    } else {
        let hz = (mantissa as f64) * 10f64.powi(i32::from(exponent));
        (hz / 1e6).round() as i64
    };

    u16::try_from(value).map_err(|_| out_of_range())
}
