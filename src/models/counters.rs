// Link-layer counter snapshots

/// Raw per-interface counters as reported by the platform. Captured fresh
/// each tick; values are cumulative since the interface came up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounters {
    pub in_bytes: u64,
    pub in_packets: u64,
    pub in_errors: u64,
    pub out_bytes: u64,
    pub out_packets: u64,
    pub out_errors: u64,
    pub vj: VjCounters,
}

/// Van Jacobson TCP/IP header-compression counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VjCounters {
    /// Outbound packets offered to the compressor.
    pub offered: u64,
    /// Outbound packets sent with a compressed header.
    pub compressed: u64,
    /// Connection-state cache searches and misses (transmit side).
    pub searches: u64,
    pub misses: u64,
    /// Inbound packets received uncompressed / compressed / unrecognized.
    pub uncompressed_in: u64,
    pub compressed_in: u64,
    pub error_in: u64,
    /// Inbound packets dropped for missing connection state.
    pub tossed: u64,
}

impl LinkCounters {
    /// Floor-clamped difference against an earlier snapshot. Counters can
    /// regress when the interface resets underneath us; clamping trades a
    /// one-tick undercount for never reporting a negative delta.
    pub fn delta(&self, prev: &LinkCounters) -> LinkCounters {
        LinkCounters {
            in_bytes: self.in_bytes.saturating_sub(prev.in_bytes),
            in_packets: self.in_packets.saturating_sub(prev.in_packets),
            in_errors: self.in_errors.saturating_sub(prev.in_errors),
            out_bytes: self.out_bytes.saturating_sub(prev.out_bytes),
            out_packets: self.out_packets.saturating_sub(prev.out_packets),
            out_errors: self.out_errors.saturating_sub(prev.out_errors),
            vj: self.vj.delta(&prev.vj),
        }
    }
}

impl VjCounters {
    pub fn delta(&self, prev: &VjCounters) -> VjCounters {
        VjCounters {
            offered: self.offered.saturating_sub(prev.offered),
            compressed: self.compressed.saturating_sub(prev.compressed),
            searches: self.searches.saturating_sub(prev.searches),
            misses: self.misses.saturating_sub(prev.misses),
            uncompressed_in: self.uncompressed_in.saturating_sub(prev.uncompressed_in),
            compressed_in: self.compressed_in.saturating_sub(prev.compressed_in),
            error_in: self.error_in.saturating_sub(prev.error_in),
            tossed: self.tossed.saturating_sub(prev.tossed),
        }
    }
}
