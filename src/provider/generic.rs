// Portable source backed by sysinfo. Byte/packet counters only; the
// platform has no VJ or compressor counters to report.

use std::io;

use sysinfo::Networks;

use super::{LinkStatsSource, SourceError};
use crate::models::{CompressionCounters, LinkCounters, VjCounters};

pub struct GenericSource {
    networks: Networks,
}

impl Default for GenericSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericSource {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl LinkStatsSource for GenericSource {
    fn link_counters(&mut self, interface: &str) -> Result<LinkCounters, SourceError> {
        self.networks.refresh(true);
        let data = self.networks.list().get(interface).ok_or_else(|| {
            SourceError::Fetch(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such interface: {interface}"),
            ))
        })?;
        Ok(LinkCounters {
            in_bytes: data.total_received(),
            in_packets: data.total_packets_received(),
            in_errors: data.total_errors_on_received(),
            out_bytes: data.total_transmitted(),
            out_packets: data.total_packets_transmitted(),
            out_errors: data.total_errors_on_transmitted(),
            vj: VjCounters::default(),
        })
    }

    fn compression_counters(
        &mut self,
        _interface: &str,
    ) -> Result<CompressionCounters, SourceError> {
        Err(SourceError::Unsupported)
    }
}
