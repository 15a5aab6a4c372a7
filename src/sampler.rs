// The sampling loop: fixed-deadline ticks, sequential per-interface fetch,
// baseline bookkeeping, table emission.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::{DisplayConfig, RunConfig};
use crate::models::{CompressionCounters, LinkCounters};
use crate::provider::{LinkStatsSource, SourceError};
use crate::render::{RowSample, TableRenderer};

/// Counter source and output sink for one run.
pub struct SamplerDeps<S, W> {
    pub source: S,
    pub out: W,
}

/// Per-interface differencing state. Zeroed at startup and again after any
/// fetch failure, so the next successful row reads as a delta from zero.
#[derive(Default)]
struct InterfaceState {
    baseline: LinkCounters,
    comp_baseline: CompressionCounters,
    /// Set once the baseline has been seeded from a real snapshot; rate
    /// cells are only rendered for rows with an established baseline.
    has_baseline: bool,
}

/// Run the sampling loop to completion. Returns when the configured report
/// count is exhausted; with no count it only returns on a write error.
pub async fn run<S, W>(deps: SamplerDeps<S, W>, config: RunConfig) -> anyhow::Result<()>
where
    S: LinkStatsSource,
    W: Write,
{
    let SamplerDeps {
        mut source,
        mut out,
    } = deps;

    let display = probe_compression(&mut source, &config)?;
    let mut renderer = TableRenderer::new(&display, &config.interfaces, config.interval_secs);
    let mut states: Vec<InterfaceState> = config
        .interfaces
        .iter()
        .map(|_| InterfaceState::default())
        .collect();
    let mut remaining = config.ticks;

    // Absolute deadlines (start + n * interval), so per-tick processing
    // latency never accumulates drift.
    let mut tick = interval_at(
        Instant::now(),
        Duration::from_secs(config.interval_secs),
    );
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::debug!(
        interval_secs = config.interval_secs,
        interfaces = config.interfaces.len(),
        "sampler started"
    );

    loop {
        tick.tick().await;

        let mut rows: Vec<Option<RowSample>> = Vec::with_capacity(states.len());
        let mut fetched: Vec<Option<(LinkCounters, CompressionCounters)>> =
            Vec::with_capacity(states.len());
        for (name, state) in config.interfaces.iter().zip(states.iter_mut()) {
            match fetch_interface(&mut source, name, &display) {
                Ok((counters, comp)) => {
                    rows.push(Some(RowSample {
                        delta: counters.delta(&state.baseline),
                        comp,
                        comp_delta: comp.delta(&state.comp_baseline),
                        rate_active: display.rate && state.has_baseline,
                    }));
                    fetched.push(Some((counters, comp)));
                }
                Err(e) => {
                    tracing::warn!(
                        interface = %name,
                        error = %e,
                        operation = "fetch_counters",
                        "counter fetch failed; row unavailable this tick"
                    );
                    *state = InterfaceState::default();
                    rows.push(None);
                    fetched.push(None);
                }
            }
        }

        renderer
            .write_tick(&mut out, &rows)
            .context("writing report")?;

        if !display.absolute {
            for (state, current) in states.iter_mut().zip(fetched) {
                if let Some((counters, comp)) = current {
                    state.baseline = counters;
                    state.comp_baseline = comp;
                    state.has_baseline = true;
                }
            }
        }

        if let Some(n) = remaining.as_mut() {
            *n -= 1;
            if *n == 0 {
                break;
            }
        }
    }

    tracing::debug!("sampler finished");
    Ok(())
}

fn fetch_interface<S: LinkStatsSource>(
    source: &mut S,
    interface: &str,
    display: &DisplayConfig,
) -> Result<(LinkCounters, CompressionCounters), SourceError> {
    let counters = source.link_counters(interface)?;
    let comp = if display.wants_compression() {
        source.compression_counters(interface)?
    } else {
        CompressionCounters::default()
    };
    Ok((counters, comp))
}

/// Check compression-statistics support once, before anything is printed.
/// Requesting the compression table on a platform without support is fatal;
/// ratio columns degrade to the plain display with a warning. Doing this up
/// front keeps the column plan fixed for the whole run.
fn probe_compression<S: LinkStatsSource>(
    source: &mut S,
    config: &RunConfig,
) -> anyhow::Result<DisplayConfig> {
    let mut display = config.display;
    if display.wants_compression()
        && let Err(SourceError::Unsupported) = source.compression_counters(&config.interfaces[0])
    {
        if display.compression_table {
            anyhow::bail!("no kernel compression statistics support");
        }
        tracing::warn!(
            operation = "probe_compression",
            "compression statistics unsupported; ratio columns disabled"
        );
        display.ratio_only = false;
    }
    Ok(display)
}
