// Counter acquisition behind a capability trait; one implementation per
// platform, selected in main. The sampling loop never branches on platform.

#[cfg(not(target_os = "linux"))]
mod generic;
#[cfg(target_os = "linux")]
mod ppp;

#[cfg(not(target_os = "linux"))]
pub use generic::GenericSource;
#[cfg(target_os = "linux")]
pub use ppp::PppIoctlSource;

use thiserror::Error;

use crate::models::{CompressionCounters, LinkCounters};

/// Why a per-interface fetch failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The platform cannot report header-compression statistics at all.
    #[error("no kernel compression statistics support")]
    Unsupported,
    /// This fetch failed; the interface may be down or gone. Transient and
    /// scoped to one interface and one tick.
    #[error(transparent)]
    Fetch(#[from] std::io::Error),
}

/// Per-interface counter snapshots for the sampling loop.
///
/// Fetch failures are reported, never panicked on; constructors are the
/// place for unrecoverable setup errors.
pub trait LinkStatsSource {
    fn link_counters(&mut self, interface: &str) -> Result<LinkCounters, SourceError>;

    fn compression_counters(
        &mut self,
        interface: &str,
    ) -> Result<CompressionCounters, SourceError>;
}
