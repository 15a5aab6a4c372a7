// Command-line surface

use clap::Parser;

use crate::version;

/// Print link-layer statistics for one or more network interfaces.
///
/// Without options a single cumulative report is printed. With `-w` and/or
/// `-c` the report repeats, showing counters collected over each interval.
#[derive(Parser, Debug)]
#[command(name = version::NAME, version = version::VERSION)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Show absolute counter values rather than per-interval deltas
    #[arg(short = 'a')]
    pub absolute: bool,

    /// Show data rates (kB/s) rather than byte counts
    #[arg(short = 'd')]
    pub rate: bool,

    /// Show extended VJ compression detail (tossed/non-VJ, cache searches/misses)
    #[arg(short = 'v', conflicts_with_all = ["ratio", "suppress", "compression_table"])]
    pub extended: bool,

    /// Show compression ratio and uncompressed-equivalent byte columns
    #[arg(short = 'r', conflicts_with_all = ["suppress", "compression_table"])]
    pub ratio: bool,

    /// Show no VJ compression columns
    #[arg(short = 's', conflicts_with = "compression_table")]
    pub suppress: bool,

    /// Show the compression-statistics table instead of the default display
    #[arg(short = 'z')]
    pub compression_table: bool,

    /// Stop after this many reports
    #[arg(short = 'c', value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Seconds between reports
    #[arg(short = 'w', value_name = "INTERVAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Interfaces to sample, in display order
    #[arg(required = true, num_args = 1..=16, value_name = "INTERFACE")]
    pub interfaces: Vec<String>,
}
