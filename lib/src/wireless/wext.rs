//! Linux wireless extensions backend.
//!
//! Mirrors the request structures from `linux/wireless.h` and issues them
//! through `ioctl` on a throwaway datagram socket.

use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use log::{debug, trace};

use crate::errors::WirelessError;
use crate::frequency::decode_mhz;
use crate::wireless::{IFNAMSIZ, InterfaceName, MAX_SUPPORTED_CHANNELS, Mode, SupportedChannels, WirelessControl};

pub const SIOCGIWNAME: u32 = 0x8B01;
pub const SIOCSIWFREQ: u32 = 0x8B04;
pub const SIOCGIWFREQ: u32 = 0x8B05;
pub const SIOCGIWMODE: u32 = 0x8B07;
pub const SIOCGIWRANGE: u32 = 0x8B0B;

const IW_MAX_BITRATES: usize = 32;
const IW_MAX_ENCODING_SIZES: usize = 8;
const IW_MAX_TXPOWER: usize = 8;
const IW_MAX_FREQUENCIES: usize = 32;

/// `struct iw_freq`: a frequency as `m * 10^e` Hz, or a channel when `e == 0` and `m < 1000`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct IwFreq {
    pub m: i32,
    pub e: i16,
    /// Channel index of a range table entry.
    pub i: u8,
    pub flags: u8,
}

/// `struct iw_point`: user buffer for variable sized payloads.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IwPoint {
    pub pointer: *mut libc::c_void,
    pub length: u16,
    pub flags: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
#[allow(dead_code)]
struct IwQuality {
    qual: u8,
    level: u8,
    noise: u8,
    updated: u8,
}

/// `union iwreq_data`, restricted to the members this backend touches.
#[repr(C)]
#[derive(Clone, Copy)]
pub union IwReqData {
    pub name: [libc::c_char; IFNAMSIZ],
    pub mode: u32,
    pub freq: IwFreq,
    pub data: IwPoint,
    // sockaddr is the widest member of the kernel union.
    _sockaddr: [u8; 16],
}

/// `struct iwreq`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IwReq {
    pub ifr_name: [libc::c_char; IFNAMSIZ],
    pub u: IwReqData,
}

impl IwReq {
    pub fn new(iface: &InterfaceName) -> Self {
        // SAFETY: every member of the union is plain old data.
        let mut req: IwReq = unsafe { mem::zeroed() };
        req.ifr_name = iface.to_ifr_name();
        req
    }
}

/// `struct iw_range`, field for field, so the channel table lands at the
/// same offset the kernel writes it to.
#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)]
struct IwRange {
    throughput: u32,
    min_nwid: u32,
    max_nwid: u32,
    old_num_channels: u16,
    old_num_frequency: u8,
    scan_capa: u8,
    event_capa: [u32; 6],
    sensitivity: i32,
    max_qual: IwQuality,
    avg_qual: IwQuality,
    num_bitrates: u8,
    bitrate: [i32; IW_MAX_BITRATES],
    min_rts: i32,
    max_rts: i32,
    min_frag: i32,
    max_frag: i32,
    min_pmp: i32,
    max_pmp: i32,
    min_pmt: i32,
    max_pmt: i32,
    pmp_flags: u16,
    pmt_flags: u16,
    pm_capa: u16,
    encoding_size: [u16; IW_MAX_ENCODING_SIZES],
    num_encoding_sizes: u8,
    max_encoding_tokens: u8,
    encoding_login_index: u8,
    txpower_capa: u16,
    num_txpower: u8,
    txpower: [i32; IW_MAX_TXPOWER],
    we_version_compiled: u8,
    we_version_source: u8,
    retry_capa: u16,
    retry_flags: u16,
    r_time_flags: u16,
    min_retry: i32,
    max_retry: i32,
    min_r_time: i32,
    max_r_time: i32,
    num_channels: u16,
    num_frequency: u8,
    freq: [IwFreq; IW_MAX_FREQUENCIES],
    enc_capa: u32,
    min_pms: i32,
    max_pms: i32,
    pms_flags: u16,
    modul_capa: i32,
    bitrate_capa: u32,
}

impl IwRange {
    /// Channel indices of the advertised frequency table.
    fn channels(&self) -> Vec<u8> {
        let count = (self.num_frequency as usize).min(IW_MAX_FREQUENCIES).min(MAX_SUPPORTED_CHANNELS);
        self.freq[..count].iter().map(|freq| freq.i).collect()
    }
}

/// Control socket scoped to a single request; closed when dropped.
struct ControlSocket(OwnedFd);

impl ControlSocket {
    fn open() -> Result<Self, WirelessError> {
        // SAFETY: plain socket(2) call, the result is checked before use.
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return Err(WirelessError::Socket(io::Error::last_os_error()));
        }
        // SAFETY: fd was just returned by socket(2) and is owned by nobody else.
        Ok(Self(unsafe { OwnedFd::from_raw_fd(fd) }))
    }

    /// Issues `request` with `req` as argument.
    fn ioctl(&self, request: u32, req: &mut IwReq) -> io::Result<()> {
        // SAFETY: req is a properly sized iwreq; any buffer it points at is
        // owned by the caller and outlives this call.
        let ret = unsafe { libc::ioctl(self.0.as_raw_fd(), request as _, req as *mut IwReq) };
        if ret < 0 { Err(io::Error::last_os_error()) } else { Ok(()) }
    }
}

/// Wireless extensions implementation of [`WirelessControl`].
///
/// Holds no state; every method opens and closes its own socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct WirelessExtensions;

impl WirelessExtensions {
    pub fn new() -> Self {
        Self
    }

    /// Opens a socket, runs one request and hands back the filled-in request.
    fn request(&self, iface: &InterfaceName, request: u32, mut req: IwReq) -> Result<IwReq, WirelessError> {
        let socket = ControlSocket::open()?;
        trace!("Issuing request {request:#06x} on {iface}");
        socket.ioctl(request, &mut req).map_err(|source| WirelessError::Ioctl {
            interface: iface.to_string(),
            request,
            source,
        })?;
        Ok(req)
    }
}

impl WirelessControl for WirelessExtensions {
    fn get_protocol(&self, iface: &InterfaceName) -> Result<String, WirelessError> {
        let req = self.request(iface, SIOCGIWNAME, IwReq::new(iface))?;
        // SAFETY: SIOCGIWNAME fills the name member.
        let raw = unsafe { req.u.name };
        let bytes: Vec<u8> = raw.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn get_mode(&self, iface: &InterfaceName) -> Result<Mode, WirelessError> {
        let req = self.request(iface, SIOCGIWMODE, IwReq::new(iface))?;
        // SAFETY: SIOCGIWMODE fills the mode member.
        Mode::try_from(unsafe { req.u.mode })
    }

    fn get_frequency(&self, iface: &InterfaceName) -> Result<u16, WirelessError> {
        let req = self.request(iface, SIOCGIWFREQ, IwReq::new(iface))?;
        // SAFETY: SIOCGIWFREQ fills the freq member.
        let freq = unsafe { req.u.freq };
        decode_mhz(freq.m, freq.e)
    }

    fn set_channel(&self, iface: &InterfaceName, channel: u8) -> Result<(), WirelessError> {
        if channel == 0 {
            return Err(WirelessError::InvalidChannel(channel));
        }

        // The driver takes a bare channel index: mantissa below 1000, exponent 0.
        let mut req = IwReq::new(iface);
        req.u.freq = IwFreq {
            m: i32::from(channel),
            ..IwFreq::default()
        };
        self.request(iface, SIOCSIWFREQ, req)?;
        Ok(())
    }

    fn get_supported_channels(&self, iface: &InterfaceName) -> Result<SupportedChannels, WirelessError> {
        // Some drivers write more than they advertise, so give them twice the room.
        let mut buffer = vec![0u8; mem::size_of::<IwRange>() * 2];

        let mut req = IwReq::new(iface);
        req.u.data = IwPoint {
            pointer: buffer.as_mut_ptr().cast(),
            length: buffer.len() as u16,
            flags: 0,
        };

        let socket = ControlSocket::open()?;
        if let Err(e) = socket.ioctl(SIOCGIWRANGE, &mut req) {
            debug!("Range query on {iface} rejected: {e}");
            return Ok(SupportedChannels::Unavailable);
        }
        drop(socket);

        // SAFETY: the buffer is at least one iw_range long and the kernel
        // filled it; read_unaligned copes with the Vec<u8> alignment.
        let range: IwRange = unsafe { std::ptr::read_unaligned(buffer.as_ptr().cast()) };
        Ok(SupportedChannels::Reported(range.channels()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_layouts_match_kernel() {
        assert_eq!(mem::size_of::<IwFreq>(), 8);
        assert_eq!(mem::size_of::<IwQuality>(), 4);
        assert_eq!(mem::size_of::<IwReqData>(), 16);
        assert_eq!(mem::size_of::<IwReq>(), IFNAMSIZ + 16);
        assert_eq!(mem::align_of::<IwRange>(), 4);
    }

    #[test]
    fn test_request_carries_interface_name() {
        let iface = InterfaceName::new("wlan0").unwrap();
        let req = IwReq::new(&iface);
        assert_eq!(req.ifr_name, iface.to_ifr_name());
        // SAFETY: zeroed on construction.
        assert_eq!(unsafe { req.u.mode }, 0);
    }

    #[test]
    fn test_set_channel_zero_is_rejected_before_any_request() {
        let iface = InterfaceName::new("nonexistent0").unwrap();
        let err = WirelessExtensions::new().set_channel(&iface, 0).unwrap_err();
        assert!(matches!(err, WirelessError::InvalidChannel(0)));
    }

    #[test]
    fn test_range_channel_table_is_capped() {
        // SAFETY: IwRange is plain old data.
        let mut range: IwRange = unsafe { mem::zeroed() };
        range.num_frequency = 200;
        for (idx, freq) in range.freq.iter_mut().enumerate() {
            freq.i = idx as u8 + 1;
        }
        let channels = range.channels();
        assert_eq!(channels.len(), IW_MAX_FREQUENCIES);
        assert_eq!(channels[0], 1);
        assert_eq!(channels[31], 32);
    }

    #[test]
    fn test_range_channel_table_follows_count() {
        // SAFETY: IwRange is plain old data.
        let mut range: IwRange = unsafe { mem::zeroed() };
        range.num_frequency = 3;
        range.freq[0].i = 1;
        range.freq[1].i = 6;
        range.freq[2].i = 11;
        range.freq[3].i = 13;
        assert_eq!(range.channels(), vec![1, 6, 11]);
    }
}
