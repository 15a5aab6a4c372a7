// Build-time identity from Cargo.toml, surfaced through the CLI

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Program name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");
