// Column plan: computed once from the display config and consumed by both
// header and data rendering, so the two can never drift apart.

use crate::config::{DisplayConfig, VjDetail};

/// Which side of the link a cell describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

/// What a data cell reads. Byte-valued kinds render as kB/s in rate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bytes,
    Packets,
    VjCompressed,
    VjUncompressed,
    VjErrors,
    NonVj,
    VjTossed,
    VjSearches,
    VjMisses,
    CompressionRate,
    UncompressedBytes,
    CompressedBytes,
    CompressedPackets,
    IncompressibleBytes,
    IncompressiblePackets,
    TotalRatio,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub width: usize,
    pub kind: ColumnKind,
}

const fn col(label: &'static str, width: usize, kind: ColumnKind) -> Column {
    Column { label, width, kind }
}

/// Ordered columns for each direction of one interface's span.
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    pub inbound: Vec<Column>,
    pub outbound: Vec<Column>,
    pub compression_table: bool,
}

impl ColumnPlan {
    pub fn new(display: &DisplayConfig) -> Self {
        if display.compression_table {
            let bytes_label = if display.rate { "KB/S" } else { "BYTE" };
            let table = vec![
                col(bytes_label, 9, ColumnKind::CompressedBytes),
                col("PACK", 8, ColumnKind::CompressedPackets),
                col(bytes_label, 9, ColumnKind::IncompressibleBytes),
                col("PACK", 8, ColumnKind::IncompressiblePackets),
                col("RATIO", 6, ColumnKind::TotalRatio),
            ];
            return ColumnPlan {
                inbound: table.clone(),
                outbound: table,
                compression_table: true,
            };
        }

        let mut inbound = vec![
            col("IN", 9, ColumnKind::Bytes),
            col("PACK", 8, ColumnKind::Packets),
        ];
        let mut outbound = vec![
            col("OUT", 9, ColumnKind::Bytes),
            col("PACK", 8, ColumnKind::Packets),
        ];
        if display.vj_detail != VjDetail::Suppressed {
            inbound.push(col("VJCOMP", 8, ColumnKind::VjCompressed));
            outbound.push(col("VJCOMP", 8, ColumnKind::VjCompressed));
            if display.ratio_only {
                for cols in [&mut inbound, &mut outbound] {
                    cols.push(col("RATIO", 8, ColumnKind::CompressionRate));
                    cols.push(col("UBYTE", 8, ColumnKind::UncompressedBytes));
                }
            } else if display.vj_detail == VjDetail::Extended {
                inbound.push(col("VJTOSS", 8, ColumnKind::VjTossed));
                inbound.push(col("NON-VJ", 8, ColumnKind::NonVj));
                outbound.push(col("VJSRCH", 8, ColumnKind::VjSearches));
                outbound.push(col("VJMISS", 8, ColumnKind::VjMisses));
            } else {
                inbound.push(col("VJUNC", 8, ColumnKind::VjUncompressed));
                inbound.push(col("VJERR", 8, ColumnKind::VjErrors));
                outbound.push(col("VJUNC", 8, ColumnKind::VjUncompressed));
                outbound.push(col("NON-VJ", 8, ColumnKind::NonVj));
            }
        }
        ColumnPlan {
            inbound,
            outbound,
            compression_table: false,
        }
    }

    /// Printed width of one direction: column widths plus single-space gaps.
    pub fn direction_width(columns: &[Column]) -> usize {
        columns.iter().map(|c| c.width).sum::<usize>() + columns.len().saturating_sub(1)
    }

    /// Printed width of one interface's full span (both directions plus the
    /// three-character direction divider).
    pub fn span_width(&self) -> usize {
        Self::direction_width(&self.inbound) + 3 + Self::direction_width(&self.outbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(f: impl FnOnce(&mut DisplayConfig)) -> DisplayConfig {
        let mut d = DisplayConfig::default();
        f(&mut d);
        d
    }

    #[test]
    fn full_detail_span_matches_historical_width() {
        let plan = ColumnPlan::new(&DisplayConfig::default());
        assert_eq!(plan.span_width(), 93);
    }

    #[test]
    fn suppressed_span_is_two_columns_per_direction() {
        let plan = ColumnPlan::new(&display(|d| d.vj_detail = VjDetail::Suppressed));
        assert_eq!(plan.inbound.len(), 2);
        assert_eq!(plan.span_width(), 39);
    }

    #[test]
    fn compression_table_span_matches_historical_width() {
        let plan = ColumnPlan::new(&display(|d| d.compression_table = true));
        assert_eq!(plan.span_width(), 91);
    }

    #[test]
    fn ratio_only_replaces_detail_pair() {
        let plan = ColumnPlan::new(&display(|d| d.ratio_only = true));
        let kinds: Vec<_> = plan.inbound.iter().map(|c| c.kind).collect();
        assert!(kinds.contains(&ColumnKind::CompressionRate));
        assert!(!kinds.contains(&ColumnKind::VjUncompressed));
        assert_eq!(plan.span_width(), 93);
    }

    #[test]
    fn compression_table_labels_follow_rate_mode() {
        let plan = ColumnPlan::new(&display(|d| {
            d.compression_table = true;
            d.rate = true;
        }));
        assert_eq!(plan.inbound[0].label, "KB/S");
    }
}
