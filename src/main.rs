//! polar: a live synthetic temperature dashboard for the terminal.
//!
//! Run with:  `RUST_LOG=info polar`
//! Config:    `$POLAR_CONFIG` or `~/.config/polar/polar.toml`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging on stderr; stdout carries the panel output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("polar v{} starting", env!("CARGO_PKG_VERSION"));

    polar_runtime::run().map_err(Into::into)
}
