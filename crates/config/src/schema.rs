use polar_core::{grid_span, PolarError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest number of decimal digits a reading may keep.
pub const MAX_PRECISION: u32 = 6;

/// Longest refresh interval accepted, in seconds (one day).
pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

/// Root configuration structure parsed from `polar.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolarConfig {
    /// Synthetic reading generator settings.
    pub sampler: SamplerConfig,
    /// Refresh timer settings.
    pub refresh: RefreshConfig,
    /// Bounded history settings.
    pub history: HistoryConfig,
    /// Display consumer settings.
    pub display: DisplayConfig,
}

impl PolarConfig {
    /// Reject settings the sampler or driver cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        self.refresh.validate()?;
        Ok(())
    }
}

/// Reading generator: uniform draw in `[min, max]`, rounded to `precision` digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Lower bound of the closed value interval.
    pub min: f64,
    /// Upper bound of the closed value interval.
    pub max: f64,
    /// Decimal digits kept after rounding.
    pub precision: u32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            min: -18.0,
            max: -16.0,
            precision: 1,
            seed: None,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PolarError::Config(format!(
                "sampler range must be finite (got [{}, {}])",
                self.min, self.max
            )));
        }
        if !(self.max - self.min).is_finite() {
            return Err(PolarError::Config(format!(
                "sampler range [{}, {}] is too wide",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(PolarError::Config(format!(
                "sampler.min ({}) is greater than sampler.max ({})",
                self.min, self.max
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(PolarError::Config(format!(
                "sampler.precision must be at most {MAX_PRECISION} (got {})",
                self.precision
            )));
        }
        if grid_span(self.min, self.max, self.precision).is_none() {
            return Err(PolarError::Config(format!(
                "sampler range [{}, {}] holds no value with {} decimal digit(s)",
                self.min, self.max, self.precision
            )));
        }
        Ok(())
    }
}

/// Periodic refresh driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles; fractional values allowed.
    pub interval_secs: f64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 1.0 }
    }
}

impl RefreshConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(PolarError::Config(format!(
                "refresh.interval_secs must be a positive number (got {})",
                self.interval_secs
            )));
        }
        if self.interval_secs > MAX_INTERVAL_SECS
            || Duration::try_from_secs_f64(self.interval_secs).is_err()
        {
            return Err(PolarError::Config(format!(
                "refresh.interval_secs must be at most {MAX_INTERVAL_SECS} (got {})",
                self.interval_secs
            )));
        }
        Ok(())
    }

    /// Interval as a [`Duration`].
    ///
    /// Values [`Self::validate`] would reject are clamped into
    /// `(0, MAX_INTERVAL_SECS]`; NaN falls back to the default.
    pub fn interval(&self) -> Duration {
        let secs = self.interval_secs.clamp(0.0, MAX_INTERVAL_SECS);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::from_secs(1))
    }
}

/// Bounded history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of most recent readings kept.  `0` keeps nothing.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}

/// How panel output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per panel.
    #[default]
    Text,
    /// One JSON object per refresh.
    Json,
}

/// Display consumer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Heading printed above each text refresh.
    pub title: String,
    /// Unit suffix shown after temperature values.
    pub unit: String,
    /// `strftime` format string for reading timestamps.
    pub timestamp_format: String,
    /// Output format.
    pub format: OutputFormat,
    /// Panels to render, in order.
    pub panels: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title:            "Antarctic Explorer".to_string(),
            unit:             "C".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            format:           OutputFormat::Text,
            panels: ["temperature", "clock", "trend", "table"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
