// Scrolling table output: header blocks and one data row per tick, all
// derived from a single column plan.

mod columns;

pub use columns::{Column, ColumnKind, ColumnPlan, Direction};

use std::io::{self, Write};

use crate::config::DisplayConfig;
use crate::models::{CompChannel, CompressionCounters, LinkCounters};
use crate::stats;

/// Data rows between header re-emissions.
const HEADER_EVERY: u64 = 20;

const DIRECTION_DIVIDER: &str = " ⎸ ";
const INTERFACE_DIVIDER: &str = " ⏐ ";

/// One interface's differenced numbers for the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowSample {
    /// Clamped delta against the baseline. Equals the raw snapshot while the
    /// baseline is zero, which covers first rows and absolute mode.
    pub delta: LinkCounters,
    /// Cumulative compression counters, for the cumulative ratio column.
    pub comp: CompressionCounters,
    /// Clamped compression counter deltas.
    pub comp_delta: CompressionCounters,
    /// Whether byte columns may render as kB/s on this row.
    pub rate_active: bool,
}

pub struct TableRenderer {
    plan: ColumnPlan,
    interfaces: Vec<String>,
    interval_secs: u64,
    data_rows: u64,
}

impl TableRenderer {
    pub fn new(display: &DisplayConfig, interfaces: &[String], interval_secs: u64) -> Self {
        TableRenderer {
            plan: ColumnPlan::new(display),
            interfaces: interfaces.to_vec(),
            interval_secs,
            data_rows: 0,
        }
    }

    /// Emit the header block (when due) and exactly one data row, then flush.
    /// `None` rows render as placeholder dashes at full column width.
    pub fn write_tick<W: Write>(
        &mut self,
        out: &mut W,
        rows: &[Option<RowSample>],
    ) -> io::Result<()> {
        if self.data_rows % HEADER_EVERY == 0 {
            self.write_header(out)?;
        }
        let row = self.joined(|i| match &rows[i] {
            Some(sample) => self.sample_span(sample),
            None => self.placeholder_span(),
        });
        writeln!(out, "{row}")?;
        self.data_rows += 1;
        out.flush()
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let span = self.plan.span_width();
        let names = self.joined(|i| format!("{:>span$}", self.interfaces[i]));
        writeln!(out, "{names}")?;
        if self.plan.compression_table {
            let groups = self.joined(|_| {
                format!(
                    "{}{}{}",
                    group_heading("IN:", &self.plan.inbound),
                    DIRECTION_DIVIDER,
                    group_heading("OUT:", &self.plan.outbound)
                )
            });
            writeln!(out, "{groups}")?;
        }
        let labels = self.joined(|_| {
            format!(
                "{}{}{}",
                label_row(&self.plan.inbound),
                DIRECTION_DIVIDER,
                label_row(&self.plan.outbound)
            )
        });
        writeln!(out, "{labels}")
    }

    /// One line fragment per configured interface, joined by the divider.
    fn joined(&self, mut cell: impl FnMut(usize) -> String) -> String {
        (0..self.interfaces.len())
            .map(&mut cell)
            .collect::<Vec<_>>()
            .join(INTERFACE_DIVIDER)
    }

    fn sample_span(&self, sample: &RowSample) -> String {
        format!(
            "{}{}{}",
            self.direction_cells(&self.plan.inbound, Direction::Inbound, sample),
            DIRECTION_DIVIDER,
            self.direction_cells(&self.plan.outbound, Direction::Outbound, sample)
        )
    }

    fn placeholder_span(&self) -> String {
        let dashes = |columns: &[Column]| {
            columns
                .iter()
                .map(|c| format!("{:>width$}", "-", width = c.width))
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!(
            "{}{}{}",
            dashes(&self.plan.inbound),
            DIRECTION_DIVIDER,
            dashes(&self.plan.outbound)
        )
    }

    fn direction_cells(
        &self,
        columns: &[Column],
        direction: Direction,
        sample: &RowSample,
    ) -> String {
        columns
            .iter()
            .map(|c| self.cell(c, direction, sample))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn cell(&self, column: &Column, direction: Direction, sample: &RowSample) -> String {
        let width = column.width;
        let delta = &sample.delta;
        let vj = &delta.vj;
        let ch = channel(&sample.comp_delta, direction);
        match column.kind {
            ColumnKind::Bytes => {
                let bytes = pick(direction, delta.in_bytes, delta.out_bytes);
                self.bytes_cell(bytes, width, sample.rate_active)
            }
            ColumnKind::Packets => {
                count_cell(pick(direction, delta.in_packets, delta.out_packets), width)
            }
            ColumnKind::VjCompressed => {
                count_cell(pick(direction, vj.compressed_in, vj.compressed), width)
            }
            ColumnKind::VjUncompressed => count_cell(
                pick(
                    direction,
                    vj.uncompressed_in,
                    vj.offered.saturating_sub(vj.compressed),
                ),
                width,
            ),
            ColumnKind::VjErrors => count_cell(vj.error_in, width),
            ColumnKind::NonVj => count_cell(
                match direction {
                    Direction::Inbound => delta
                        .in_packets
                        .saturating_sub(vj.compressed_in)
                        .saturating_sub(vj.uncompressed_in)
                        .saturating_sub(vj.error_in),
                    Direction::Outbound => delta.out_packets.saturating_sub(vj.offered),
                },
                width,
            ),
            ColumnKind::VjTossed => count_cell(vj.tossed, width),
            ColumnKind::VjSearches => count_cell(vj.searches, width),
            ColumnKind::VjMisses => count_cell(vj.misses, width),
            ColumnKind::CompressionRate => {
                let rate = stats::compression_rate(
                    ch.compressed_bytes,
                    ch.incompressible_bytes,
                    ch.uncompressed_bytes,
                );
                format!("{rate:>width$.2}")
            }
            ColumnKind::UncompressedBytes => {
                self.bytes_cell(ch.uncompressed_bytes, width, sample.rate_active)
            }
            ColumnKind::CompressedBytes => {
                self.bytes_cell(ch.compressed_bytes, width, sample.rate_active)
            }
            ColumnKind::CompressedPackets => count_cell(ch.compressed_packets, width),
            ColumnKind::IncompressibleBytes => {
                self.bytes_cell(ch.incompressible_bytes, width, sample.rate_active)
            }
            ColumnKind::IncompressiblePackets => count_cell(ch.incompressible_packets, width),
            ColumnKind::TotalRatio => {
                let ratio = channel(&sample.comp, direction).ratio();
                format!("{ratio:>width$.2}")
            }
        }
    }

    fn bytes_cell(&self, bytes: u64, width: usize, rate_active: bool) -> String {
        if rate_active {
            let rate = stats::kbps(bytes, self.interval_secs);
            format!("{rate:>width$.3}")
        } else {
            format!("{bytes:>width$}")
        }
    }
}

fn count_cell(value: u64, width: usize) -> String {
    format!("{value:>width$}")
}

fn pick(direction: Direction, inbound: u64, outbound: u64) -> u64 {
    match direction {
        Direction::Inbound => inbound,
        Direction::Outbound => outbound,
    }
}

fn channel(comp: &CompressionCounters, direction: Direction) -> &CompChannel {
    match direction {
        Direction::Inbound => &comp.inbound,
        Direction::Outbound => &comp.outbound,
    }
}

/// Heading line for the compression table: the direction tag, then group
/// labels right-aligned over the byte/packet column pairs they describe.
fn group_heading(tag: &str, columns: &[Column]) -> String {
    let pair = |a: &Column, b: &Column| a.width + 1 + b.width;
    let first = pair(&columns[0], &columns[1]);
    let second = pair(&columns[2], &columns[3]);
    let ratio = columns[4].width;
    format!(
        "{tag}{:>first_pad$} {:>second$} {:>ratio$}",
        "COMPRESSED",
        "INCOMPRESSIBLE",
        "COMP",
        first_pad = first - tag.len(),
    )
}

fn label_row(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("{:>width$}", c.label, width = c.width))
        .collect::<Vec<_>>()
        .join(" ")
}
