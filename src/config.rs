// Run configuration assembled from command-line flags

use anyhow::ensure;

use crate::cli::Cli;

/// Hard cap on interfaces per run; the display grows sideways per interface.
pub const MAX_INTERFACES: usize = 16;

/// Interval used when `-c` is given without `-w`, and for single-shot runs.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// How much VJ header-compression detail the default table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VjDetail {
    /// Compressed/uncompressed/error packet columns.
    #[default]
    Full,
    /// No VJ columns at all.
    Suppressed,
    /// Tossed/non-VJ and cache search/miss columns.
    Extended,
}

/// Display-mode selection, fixed for the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayConfig {
    /// Render raw counter values; baselines are never advanced.
    pub absolute: bool,
    /// Render byte columns as kB/s over the interval.
    pub rate: bool,
    pub vj_detail: VjDetail,
    /// Replace VJ detail columns with compression ratio / uncompressed bytes.
    pub ratio_only: bool,
    /// Entirely separate layout focused on compression byte/packet counts.
    pub compression_table: bool,
}

impl DisplayConfig {
    /// Whether any selected column reads header-compression counters.
    pub fn wants_compression(&self) -> bool {
        self.compression_table || self.ratio_only
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !(self.compression_table
                && (self.ratio_only || self.vj_detail != VjDetail::Full)),
            "-z cannot be combined with -v, -r or -s"
        );
        ensure!(
            !(self.ratio_only && self.vj_detail != VjDetail::Full),
            "-r cannot be combined with -v or -s"
        );
        Ok(())
    }
}

/// Everything the sampling loop needs, resolved and validated once.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub display: DisplayConfig,
    pub interval_secs: u64,
    /// Remaining report count; `None` runs until interrupted.
    pub ticks: Option<u64>,
    /// Display order; never reordered.
    pub interfaces: Vec<String>,
}

impl RunConfig {
    /// Apply the historical flag defaults and validate.
    ///
    /// `-c` without `-w` samples every 5 seconds; `-w` without `-c` runs
    /// forever; neither produces exactly one report. `-a` silently wins
    /// over `-d`.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let display = DisplayConfig {
            absolute: cli.absolute,
            rate: cli.rate && !cli.absolute,
            vj_detail: if cli.suppress {
                VjDetail::Suppressed
            } else if cli.extended {
                VjDetail::Extended
            } else {
                VjDetail::Full
            },
            ratio_only: cli.ratio,
            compression_table: cli.compression_table,
        };

        let (interval_secs, ticks) = match (cli.interval, cli.count) {
            (Some(w), Some(c)) => (w, Some(c)),
            (Some(w), None) => (w, None),
            (None, Some(c)) => (DEFAULT_INTERVAL_SECS, Some(c)),
            (None, None) => (DEFAULT_INTERVAL_SECS, Some(1)),
        };

        let config = RunConfig {
            display,
            interval_secs,
            ticks,
            interfaces: cli.interfaces,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.display.validate()?;
        ensure!(
            self.interval_secs > 0,
            "interval must be positive, got {}",
            self.interval_secs
        );
        ensure!(
            self.ticks != Some(0),
            "report count must be positive, got 0"
        );
        ensure!(
            !self.interfaces.is_empty(),
            "at least one interface must be named"
        );
        ensure!(
            self.interfaces.len() <= MAX_INTERFACES,
            "at most {} interfaces per run, got {}",
            MAX_INTERFACES,
            self.interfaces.len()
        );
        Ok(())
    }
}
