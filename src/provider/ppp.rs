// PPP ioctl source (Linux). Counter structs mirror <linux/ppp_defs.h>.

use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use super::{LinkStatsSource, SourceError};
use crate::models::{CompChannel, CompressionCounters, LinkCounters, VjCounters};

// SIOCDEVPRIVATE + 0 / + 2.
const SIOCGPPPSTATS: libc::c_ulong = 0x89f0;
const SIOCGPPPCSTATS: libc::c_ulong = 0x89f2;

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)]
struct RawPppStat {
    ppp_discards: u32,
    ppp_ibytes: u32,
    ppp_ioctects: u32,
    ppp_ipackets: u32,
    ppp_ierrors: u32,
    ppp_ilqrs: u32,
    ppp_obytes: u32,
    ppp_ooctects: u32,
    ppp_opackets: u32,
    ppp_oerrors: u32,
    ppp_olqrs: u32,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct RawVjStat {
    vjs_packets: u32,
    vjs_compressed: u32,
    vjs_searches: u32,
    vjs_misses: u32,
    vjs_uncompressedin: u32,
    vjs_compressedin: u32,
    vjs_errorin: u32,
    vjs_tossed: u32,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct RawPppStats {
    p: RawPppStat,
    vj: RawVjStat,
}

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(dead_code)]
struct RawCompStat {
    unc_bytes: u32,
    unc_packets: u32,
    comp_bytes: u32,
    comp_packets: u32,
    inc_bytes: u32,
    inc_packets: u32,
    in_count: u32,
    bytes_out: u32,
    // Not computed by the kernel; we derive our own fixed-point ratio.
    ratio: f64,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct RawCompStats {
    // c is the transmit (compression) side, d the receive side.
    c: RawCompStat,
    d: RawCompStat,
}

// The kernel expects the request's data pointer to point at the stats block
// trailing the ifreq, as in struct ifpppstatsreq.
#[repr(C)]
struct StatsReq<T> {
    ifr: libc::ifreq,
    stats: T,
}

pub struct PppIoctlSource {
    socket: OwnedFd,
}

impl PppIoctlSource {
    /// Opens the datagram socket the stats ioctls are issued against.
    /// Failure here is fatal; there is no counter source without it.
    pub fn new() -> io::Result<Self> {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self {
            socket: unsafe { OwnedFd::from_raw_fd(fd) },
        })
    }

    fn request<T: Copy>(&self, interface: &str, cmd: libc::c_ulong) -> Result<T, SourceError> {
        let mut req = StatsReq::<T> {
            ifr: named_ifreq(interface)?,
            stats: unsafe { mem::zeroed() },
        };
        req.ifr.ifr_ifru.ifru_data = (&raw mut req.stats).cast::<libc::c_char>();
        let rc = unsafe {
            libc::ioctl(
                self.socket.as_raw_fd(),
                cmd,
                (&raw mut req).cast::<libc::c_void>(),
            )
        };
        if rc < 0 {
            return Err(SourceError::Fetch(io::Error::last_os_error()));
        }
        Ok(req.stats)
    }
}

impl LinkStatsSource for PppIoctlSource {
    fn link_counters(&mut self, interface: &str) -> Result<LinkCounters, SourceError> {
        let raw: RawPppStats = self.request(interface, SIOCGPPPSTATS)?;
        Ok(raw.into())
    }

    fn compression_counters(
        &mut self,
        interface: &str,
    ) -> Result<CompressionCounters, SourceError> {
        let raw: RawCompStats = match self.request(interface, SIOCGPPPCSTATS) {
            Ok(raw) => raw,
            Err(SourceError::Fetch(err))
                if matches!(
                    err.raw_os_error(),
                    Some(libc::ENOTTY) | Some(libc::EOPNOTSUPP)
                ) =>
            {
                return Err(SourceError::Unsupported);
            }
            Err(err) => return Err(err),
        };
        let mut counters = CompressionCounters::from(raw);
        counters.normalize();
        Ok(counters)
    }
}

fn named_ifreq(interface: &str) -> Result<libc::ifreq, SourceError> {
    let mut ifr: libc::ifreq = unsafe { mem::zeroed() };
    let name = interface.as_bytes();
    if name.len() >= ifr.ifr_name.len() {
        return Err(SourceError::Fetch(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("interface name too long: {interface}"),
        )));
    }
    for (dst, src) in ifr.ifr_name.iter_mut().zip(name) {
        *dst = *src as libc::c_char;
    }
    Ok(ifr)
}

impl From<RawPppStats> for LinkCounters {
    fn from(raw: RawPppStats) -> Self {
        LinkCounters {
            in_bytes: raw.p.ppp_ibytes.into(),
            in_packets: raw.p.ppp_ipackets.into(),
            in_errors: raw.p.ppp_ierrors.into(),
            out_bytes: raw.p.ppp_obytes.into(),
            out_packets: raw.p.ppp_opackets.into(),
            out_errors: raw.p.ppp_oerrors.into(),
            vj: VjCounters {
                offered: raw.vj.vjs_packets.into(),
                compressed: raw.vj.vjs_compressed.into(),
                searches: raw.vj.vjs_searches.into(),
                misses: raw.vj.vjs_misses.into(),
                uncompressed_in: raw.vj.vjs_uncompressedin.into(),
                compressed_in: raw.vj.vjs_compressedin.into(),
                error_in: raw.vj.vjs_errorin.into(),
                tossed: raw.vj.vjs_tossed.into(),
            },
        }
    }
}

impl From<RawCompStat> for CompChannel {
    fn from(raw: RawCompStat) -> Self {
        CompChannel {
            uncompressed_bytes: raw.unc_bytes.into(),
            uncompressed_packets: raw.unc_packets.into(),
            compressed_bytes: raw.comp_bytes.into(),
            compressed_packets: raw.comp_packets.into(),
            incompressible_bytes: raw.inc_bytes.into(),
            incompressible_packets: raw.inc_packets.into(),
            equivalent_bytes: raw.in_count.into(),
            emitted_bytes: raw.bytes_out.into(),
            ratio_q8: 0,
        }
    }
}

impl From<RawCompStats> for CompressionCounters {
    fn from(raw: RawCompStats) -> Self {
        CompressionCounters {
            inbound: raw.d.into(),
            outbound: raw.c.into(),
        }
    }
}
