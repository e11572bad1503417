pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, HistoryConfig, OutputFormat, PolarConfig, RefreshConfig, SamplerConfig,
    MAX_INTERVAL_SECS, MAX_PRECISION,
};
pub use watcher::ConfigWatcher;

use polar_core::{PolarError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "POLAR_CONFIG";

/// Load and validate configuration from a TOML file.  Returns
/// `PolarConfig::default()` if the file doesn't exist so the dashboard always
/// has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PolarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PolarConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PolarError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate configuration from TOML text.
pub fn parse(raw: &str) -> Result<PolarConfig> {
    let config: PolarConfig =
        toml::from_str(raw).map_err(|e| PolarError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the config path: `$POLAR_CONFIG` if set, otherwise
/// `polar/polar.toml` under `$XDG_CONFIG_HOME` (or `~/.config`).
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("polar").join("polar.toml")
}
