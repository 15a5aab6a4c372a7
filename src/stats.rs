// Rate and ratio arithmetic over per-tick counter deltas

/// Convert a byte delta into a kB/s figure over the sampling interval.
pub fn kbps(bytes: u64, interval_secs: u64) -> f64 {
    bytes as f64 / (interval_secs as f64 * 1024.0)
}

/// Per-tick compression rate for the ratio display: uncompressed-equivalent
/// bytes over bytes actually emitted this interval. A zero compressed-byte
/// delta reads as 1.0 (nothing went through the compressor).
pub fn compression_rate(comp_bytes: u64, inc_bytes: u64, unc_bytes: u64) -> f64 {
    if comp_bytes == 0 {
        1.0
    } else {
        unc_bytes as f64 / (comp_bytes + inc_bytes) as f64
    }
}
