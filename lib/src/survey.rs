//! Diagnostic summary of the wireless interfaces on this host.

use std::fmt;
use std::io;

use log::debug;

use crate::frequency::channel_for_frequency;
use crate::interfaces::NetClass;
use crate::wireless::{InterfaceName, Mode, WirelessControl};

/// Radio state of one wireless interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceReport {
    pub name: String,
    pub protocol: String,
    pub mode: Mode,
    /// Current channel; only read for interfaces in monitor mode.
    pub channel: Option<u8>,
    pub supported: Vec<u8>,
}

impl fmt::Display for InterfaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " - {} [{}]", self.name, self.protocol)?;
        writeln!(f, "\tMode: {}", self.mode)?;
        if let Some(channel) = self.channel {
            writeln!(f, "\tChannel: {channel}")?;
        }
        let supported: Vec<String> = self.supported.iter().map(u8::to_string).collect();
        writeln!(f, "\tSupported Channels: {}", supported.join(","))
    }
}

/// Reports on `name`, or `None` if it is not a usable wireless interface.
pub fn describe<C: WirelessControl + ?Sized>(control: &C, name: &str) -> Option<InterfaceReport> {
    let iface = match InterfaceName::new(name) {
        Ok(iface) => iface,
        Err(e) => {
            debug!("Skipping {name}: {e}");
            return None;
        }
    };

    let protocol = control.get_protocol(&iface).ok()?;
    let mode = match control.get_mode(&iface) {
        Ok(mode) => mode,
        Err(e) => {
            debug!("Skipping {iface}: {e}");
            return None;
        }
    };
    let supported = match control.get_supported_channels(&iface) {
        Ok(supported) => supported.channels().to_vec(),
        Err(e) => {
            debug!("Skipping {iface}: {e}");
            return None;
        }
    };

    let channel = if mode == Mode::Monitor {
        control.get_frequency(&iface).ok().map(channel_for_frequency)
    } else {
        None
    };

    Some(InterfaceReport {
        name: iface.to_string(),
        protocol,
        mode,
        channel,
        supported,
    })
}

/// Reports on every wireless interface listed under `net`.
pub fn survey<C: WirelessControl + ?Sized>(control: &C, net: &NetClass) -> io::Result<Vec<InterfaceReport>> {
    Ok(net.list()?.iter().filter_map(|name| describe(control, name)).collect())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::errors::WirelessError;
    use crate::wireless::{MockWirelessControl, SupportedChannels};

    fn not_wireless() -> WirelessError {
        WirelessError::Socket(io::Error::from_raw_os_error(libc::EOPNOTSUPP))
    }

    #[test]
    fn test_describe_monitor_interface() {
        let mut control = MockWirelessControl::new();
        control.expect_get_protocol().returning(|_| Ok("IEEE 802.11".to_string()));
        control.expect_get_mode().returning(|_| Ok(Mode::Monitor));
        control.expect_get_frequency().returning(|_| Ok(2437));
        control
            .expect_get_supported_channels()
            .returning(|_| Ok(SupportedChannels::Reported(vec![1, 6, 11])));

        let report = describe(&control, "wlan0").unwrap();
        assert_eq!(report.channel, Some(6));
        assert_eq!(
            report.to_string(),
            " - wlan0 [IEEE 802.11]\n\tMode: Monitor\n\tChannel: 6\n\tSupported Channels: 1,6,11\n"
        );
    }

    #[test]
    fn test_describe_managed_interface_skips_channel() {
        let mut control = MockWirelessControl::new();
        control.expect_get_protocol().returning(|_| Ok("IEEE 802.11".to_string()));
        control.expect_get_mode().returning(|_| Ok(Mode::Infrastructure));
        control.expect_get_frequency().never();
        control
            .expect_get_supported_channels()
            .returning(|_| Ok(SupportedChannels::Unavailable));

        let report = describe(&control, "wlan0").unwrap();
        assert_eq!(report.channel, None);
        assert_eq!(
            report.to_string(),
            " - wlan0 [IEEE 802.11]\n\tMode: Infrastructure\n\tSupported Channels: \n"
        );
    }

    #[test]
    fn test_describe_wired_interface() {
        let mut control = MockWirelessControl::new();
        control.expect_get_protocol().returning(|_| Err(not_wireless()));

        assert!(describe(&control, "eth0").is_none());
    }

    #[test]
    fn test_survey_keeps_wireless_only() {
        let dir = tempdir().unwrap();
        for name in ["eth0", "lo", "wlan0"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let mut control = MockWirelessControl::new();
        control.expect_get_protocol().returning(|iface| {
            if iface.as_str() == "wlan0" {
                Ok("IEEE 802.11".to_string())
            } else {
                Err(not_wireless())
            }
        });
        control.expect_get_mode().returning(|_| Ok(Mode::Monitor));
        control.expect_get_frequency().returning(|_| Ok(5180));
        control
            .expect_get_supported_channels()
            .returning(|_| Ok(SupportedChannels::Reported(vec![36, 40])));

        let reports = survey(&control, &NetClass::new(dir.path())).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "wlan0");
        assert_eq!(reports[0].channel, Some(36));
        assert_eq!(reports[0].supported, vec![36, 40]);
    }
}
