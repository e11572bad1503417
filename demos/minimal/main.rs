//! Minimal example: runs the dashboard using the default config lookup.
//!
//! ```
//! cargo run --example minimal
//! ```

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    polar_runtime::run().map_err(Into::into)
}
