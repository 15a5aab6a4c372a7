use anyhow::Result;
use clap::Parser;
use linkmon::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Parse arguments, keeping the historical exit-code contract: usage errors
/// exit 1, --help/--version exit 0.
fn parse_args() -> cli::Cli {
    match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the table.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::RunConfig::from_cli(parse_args())?;

    #[cfg(target_os = "linux")]
    let source = provider::PppIoctlSource::new()
        .map_err(|e| anyhow::anyhow!("couldn't create IP socket: {e}"))?;
    #[cfg(not(target_os = "linux"))]
    let source = provider::GenericSource::new();

    sampler::run(
        sampler::SamplerDeps {
            source,
            out: std::io::stdout(),
        },
        config,
    )
    .await
}
