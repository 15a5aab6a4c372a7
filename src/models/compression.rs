// Header-compression counter snapshots

/// One direction of a compressor's counters. `equivalent_bytes` and
/// `emitted_bytes` are the aggregate fields some sources omit; `normalize`
/// reconstructs them and derives the cumulative ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompChannel {
    pub uncompressed_bytes: u64,
    pub uncompressed_packets: u64,
    pub compressed_bytes: u64,
    pub compressed_packets: u64,
    pub incompressible_bytes: u64,
    pub incompressible_packets: u64,
    /// Uncompressed-equivalent size of everything emitted.
    pub equivalent_bytes: u64,
    /// Bytes actually emitted after compression.
    pub emitted_bytes: u64,
    /// Cumulative compression ratio, fixed point with an 8-bit fractional
    /// scale (value * 256). Zero when nothing has been emitted.
    pub ratio_q8: u64,
}

impl CompChannel {
    /// Fill in aggregate fields for sources that leave them zero and derive
    /// the cumulative ratio from them.
    pub fn normalize(&mut self) {
        if self.emitted_bytes == 0 {
            self.emitted_bytes = self.compressed_bytes + self.incompressible_bytes;
            self.equivalent_bytes = self.uncompressed_bytes;
        }
        self.ratio_q8 = if self.emitted_bytes == 0 {
            0
        } else {
            self.equivalent_bytes * 256 / self.emitted_bytes
        };
    }

    /// Cumulative ratio as a plain float.
    pub fn ratio(&self) -> f64 {
        self.ratio_q8 as f64 / 256.0
    }

    /// Floor-clamped counter difference. The ratio is a cumulative quantity,
    /// not a differenced one; it carries through from `self`.
    pub fn delta(&self, prev: &CompChannel) -> CompChannel {
        CompChannel {
            uncompressed_bytes: self.uncompressed_bytes.saturating_sub(prev.uncompressed_bytes),
            uncompressed_packets: self
                .uncompressed_packets
                .saturating_sub(prev.uncompressed_packets),
            compressed_bytes: self.compressed_bytes.saturating_sub(prev.compressed_bytes),
            compressed_packets: self.compressed_packets.saturating_sub(prev.compressed_packets),
            incompressible_bytes: self
                .incompressible_bytes
                .saturating_sub(prev.incompressible_bytes),
            incompressible_packets: self
                .incompressible_packets
                .saturating_sub(prev.incompressible_packets),
            equivalent_bytes: self.equivalent_bytes.saturating_sub(prev.equivalent_bytes),
            emitted_bytes: self.emitted_bytes.saturating_sub(prev.emitted_bytes),
            ratio_q8: self.ratio_q8,
        }
    }
}

/// Both directions of an interface's compression counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionCounters {
    pub inbound: CompChannel,
    pub outbound: CompChannel,
}

impl CompressionCounters {
    pub fn normalize(&mut self) {
        self.inbound.normalize();
        self.outbound.normalize();
    }

    pub fn delta(&self, prev: &CompressionCounters) -> CompressionCounters {
        CompressionCounters {
            inbound: self.inbound.delta(&prev.inbound),
            outbound: self.outbound.delta(&prev.outbound),
        }
    }
}
