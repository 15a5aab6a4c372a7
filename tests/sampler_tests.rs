// Sampling loop tests against a scripted counter source

use std::collections::{HashMap, VecDeque};
use std::io;

use linkmon::config::{DisplayConfig, RunConfig};
use linkmon::models::{CompChannel, CompressionCounters, LinkCounters};
use linkmon::provider::{LinkStatsSource, SourceError};
use linkmon::sampler::{SamplerDeps, run};

#[derive(Default)]
struct ScriptedSource {
    counters: HashMap<String, VecDeque<Result<LinkCounters, SourceError>>>,
    comp: HashMap<String, CompressionCounters>,
    compression_unsupported: bool,
}

impl ScriptedSource {
    fn push_bytes(&mut self, interface: &str, in_bytes: u64, out_bytes: u64) {
        self.counters
            .entry(interface.into())
            .or_default()
            .push_back(Ok(LinkCounters {
                in_bytes,
                out_bytes,
                ..LinkCounters::default()
            }));
    }

    fn push_failure(&mut self, interface: &str) {
        self.counters
            .entry(interface.into())
            .or_default()
            .push_back(Err(SourceError::Fetch(io::Error::other("link down"))));
    }
}

impl LinkStatsSource for ScriptedSource {
    fn link_counters(&mut self, interface: &str) -> Result<LinkCounters, SourceError> {
        self.counters
            .get_mut(interface)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(SourceError::Fetch(io::Error::other("script exhausted"))))
    }

    fn compression_counters(
        &mut self,
        interface: &str,
    ) -> Result<CompressionCounters, SourceError> {
        if self.compression_unsupported {
            Err(SourceError::Unsupported)
        } else {
            Ok(self.comp.get(interface).copied().unwrap_or_default())
        }
    }
}

fn config(display: DisplayConfig, interval: u64, ticks: u64, interfaces: &[&str]) -> RunConfig {
    RunConfig {
        display,
        interval_secs: interval,
        ticks: Some(ticks),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
    }
}

async fn run_to_lines(source: ScriptedSource, config: RunConfig) -> Vec<String> {
    let mut out = Vec::new();
    run(
        SamplerDeps {
            source,
            out: &mut out,
        },
        config,
    )
    .await
    .expect("sampler should finish");
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn first_row_is_delta_from_zero_then_per_interval() {
    let mut source = ScriptedSource::default();
    source.push_bytes("ppp0", 1000, 2000);
    source.push_bytes("ppp0", 1500, 2600);
    let lines = run_to_lines(source, config(DisplayConfig::default(), 5, 2, &["ppp0"])).await;

    // Two header lines, then one data row per tick.
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("     1000"));
    assert!(lines[2].contains("     2000"));
    assert!(lines[3].starts_with("      500"));
    assert!(lines[3].contains("      600"));
}

#[tokio::test(start_paused = true)]
async fn fetch_failure_dashes_row_and_resets_baseline() {
    let mut source = ScriptedSource::default();
    for bytes in [10, 20, 30, 40] {
        source.push_bytes("ppp0", bytes, 0);
    }
    source.push_bytes("ppp1", 100, 0);
    source.push_bytes("ppp1", 200, 0);
    source.push_failure("ppp1");
    source.push_bytes("ppp1", 250, 0);
    let lines = run_to_lines(
        source,
        config(DisplayConfig::default(), 1, 4, &["ppp0", "ppp1"]),
    )
    .await;

    let second = |line: &str| line.split(" ⏐ ").nth(1).unwrap().to_string();
    assert!(second(&lines[2]).starts_with("      100"));
    assert!(second(&lines[3]).starts_with("      100"));
    assert!(
        second(&lines[4])
            .chars()
            .all(|c| c == '-' || c == ' ' || c == '⎸')
    );
    // Delta restarts from zero, not from the last good snapshot.
    assert!(second(&lines[5]).starts_with("      250"));
    // The healthy interface is untouched throughout.
    assert!(lines[4].starts_with("       10"));
}

#[tokio::test(start_paused = true)]
async fn absolute_mode_repeats_raw_values() {
    let mut source = ScriptedSource::default();
    source.push_bytes("ppp0", 1500, 2600);
    source.push_bytes("ppp0", 1500, 2600);
    let display = DisplayConfig {
        absolute: true,
        ..DisplayConfig::default()
    };
    let lines = run_to_lines(source, config(display, 5, 2, &["ppp0"])).await;

    assert_eq!(lines[2], lines[3]);
    assert!(lines[2].starts_with("     1500"));
}

#[tokio::test(start_paused = true)]
async fn compression_table_without_support_fails_before_output() {
    let source = ScriptedSource {
        compression_unsupported: true,
        ..ScriptedSource::default()
    };
    let display = DisplayConfig {
        compression_table: true,
        ..DisplayConfig::default()
    };
    let mut out = Vec::new();
    let result = run(
        SamplerDeps {
            source,
            out: &mut out,
        },
        config(display, 1, 1, &["ppp0"]),
    )
    .await;

    assert!(result.is_err());
    assert!(out.is_empty(), "nothing may be printed before the failure");
}

#[tokio::test(start_paused = true)]
async fn ratio_mode_without_support_downgrades_silently() {
    let mut source = ScriptedSource {
        compression_unsupported: true,
        ..ScriptedSource::default()
    };
    source.push_bytes("ppp0", 10, 10);
    let display = DisplayConfig {
        ratio_only: true,
        ..DisplayConfig::default()
    };
    let lines = run_to_lines(source, config(display, 1, 1, &["ppp0"])).await;

    assert!(!lines[1].contains("RATIO"));
    assert!(lines[1].contains("VJUNC"));
    assert_eq!(lines.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn ratio_mode_renders_per_tick_compression_rate() {
    let mut source = ScriptedSource::default();
    source.push_bytes("ppp0", 10, 10);
    source.comp.insert(
        "ppp0".into(),
        CompressionCounters {
            outbound: CompChannel {
                compressed_bytes: 10,
                incompressible_bytes: 5,
                uncompressed_bytes: 30,
                ..CompChannel::default()
            },
            inbound: CompChannel::default(),
        },
    );
    let display = DisplayConfig {
        ratio_only: true,
        ..DisplayConfig::default()
    };
    let lines = run_to_lines(source, config(display, 1, 1, &["ppp0"])).await;

    assert!(lines[1].contains("RATIO"));
    let outbound = lines[2].split(" ⎸ ").nth(1).unwrap();
    // 30 uncompressed-equivalent bytes emitted as 15 this interval.
    assert!(outbound.contains("2.00"));
    assert!(outbound.contains("      30"));
}

#[tokio::test(start_paused = true)]
async fn rate_cells_start_on_the_second_successful_tick() {
    let mut source = ScriptedSource::default();
    source.push_bytes("ppp0", 5120, 0);
    source.push_bytes("ppp0", 10240, 0);
    let display = DisplayConfig {
        rate: true,
        ..DisplayConfig::default()
    };
    let lines = run_to_lines(source, config(display, 5, 2, &["ppp0"])).await;

    assert!(lines[2].starts_with("     5120"), "first row is a count");
    assert!(lines[3].starts_with("    1.000"), "second row is a rate");
}

#[tokio::test(start_paused = true)]
async fn rate_reverts_to_count_after_a_failure() {
    let mut source = ScriptedSource::default();
    source.push_bytes("ppp0", 5120, 0);
    source.push_failure("ppp0");
    source.push_bytes("ppp0", 10240, 0);
    let display = DisplayConfig {
        rate: true,
        ..DisplayConfig::default()
    };
    let lines = run_to_lines(source, config(display, 5, 3, &["ppp0"])).await;

    assert!(lines[2].starts_with("     5120"));
    assert!(lines[3].starts_with("        -"));
    assert!(
        lines[4].starts_with("    10240"),
        "no baseline yet, so a count again"
    );
}

#[tokio::test(start_paused = true)]
async fn finite_count_stops_the_loop() {
    let mut source = ScriptedSource::default();
    for i in 0..7 {
        source.push_bytes("ppp0", i * 100, 0);
    }
    let lines = run_to_lines(source, config(DisplayConfig::default(), 1, 7, &["ppp0"])).await;
    // One header block and exactly seven data rows.
    assert_eq!(lines.len(), 2 + 7);
}
