//! Interface state checks built on the control port.

use log::debug;

use crate::wireless::{InterfaceName, Mode, WirelessControl};

/// Whether `iface` is currently in monitor mode.
///
/// A failed mode query answers `false` as well; callers cannot tell
/// "not in monitor mode" from "could not ask".
pub fn is_monitor_mode<C: WirelessControl + ?Sized>(control: &C, iface: &InterfaceName) -> bool {
    match control.get_mode(iface) {
        Ok(mode) => mode == Mode::Monitor,
        Err(e) => {
            debug!("Mode query on {iface} failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WirelessError;
    use crate::wireless::MockWirelessControl;

    fn wlan0() -> InterfaceName {
        InterfaceName::new("wlan0").unwrap()
    }

    #[test]
    fn test_monitor_mode_is_detected() {
        let mut control = MockWirelessControl::new();
        control.expect_get_mode().times(1).returning(|_| Ok(Mode::Monitor));

        assert!(is_monitor_mode(&control, &wlan0()));
    }

    #[test]
    fn test_other_modes_are_not_monitor() {
        for mode in [Mode::Auto, Mode::AdHoc, Mode::Infrastructure, Mode::Master, Mode::Repeater, Mode::Secondary, Mode::Mesh] {
            let mut control = MockWirelessControl::new();
            control.expect_get_mode().times(1).returning(move |_| Ok(mode));

            assert!(!is_monitor_mode(&control, &wlan0()), "{mode} reported as monitor");
        }
    }

    // A failed query and a non-monitor mode give the same answer.
    #[test]
    fn test_failed_query_reads_as_not_monitor() {
        let mut control = MockWirelessControl::new();
        control.expect_get_mode().times(1).returning(|_| Err(WirelessError::UnknownMode(42)));
        assert!(!is_monitor_mode(&control, &wlan0()));

        let mut control = MockWirelessControl::new();
        control
            .expect_get_mode()
            .times(1)
            .returning(|_| Err(WirelessError::Socket(std::io::Error::from_raw_os_error(libc::EMFILE))));
        assert!(!is_monitor_mode(&control, &wlan0()));
    }
}
