use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

/// Slope magnitude (units per second) below which a trend counts as steady.
pub const STEADY_BAND: f64 = 0.01;

/// One generated temperature reading.  Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature value, already rounded by the generator.
    pub value: f64,
    /// Wall-clock time the reading was taken (whole seconds).
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn new(value: f64, timestamp: DateTime<Local>) -> Self {
        Self { value, timestamp }
    }

    /// Seconds elapsed between `origin` and this reading (negative if earlier).
    #[must_use]
    pub fn elapsed_since(&self, origin: DateTime<Local>) -> f64 {
        (self.timestamp - origin).num_milliseconds() as f64 / 1000.0
    }
}

/// Immutable, cheaply clonable view of the history buffer at one instant.
///
/// Cloning shares the underlying slice, so every display consumer can hold
/// its own handle without copying readings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySnapshot(Arc<[Reading]>);

impl Deref for HistorySnapshot {
    type Target = [Reading];

    fn deref(&self) -> &[Reading] {
        &self.0
    }
}

impl From<Vec<Reading>> for HistorySnapshot {
    fn from(readings: Vec<Reading>) -> Self {
        Self(readings.into())
    }
}

impl Serialize for HistorySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Ordinary-least-squares fit of value against elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Change in value per second.
    pub slope: f64,
    /// Fitted value at the earliest buffered reading (elapsed = 0).
    pub intercept: f64,
}

impl TrendLine {
    /// Evaluate the line at `elapsed_secs` after the earliest reading.
    #[must_use]
    pub fn predict(&self, elapsed_secs: f64) -> f64 {
        self.intercept + self.slope * elapsed_secs
    }

    /// `(elapsed, fitted)` pairs for every reading, in input order.
    ///
    /// Elapsed time is measured from the earliest timestamp in `readings`,
    /// matching the origin the estimator uses.
    pub fn fitted(&self, readings: &[Reading]) -> Vec<(f64, f64)> {
        let Some(origin) = readings.iter().map(|r| r.timestamp).min() else {
            return Vec::new();
        };
        readings
            .iter()
            .map(|r| {
                let x = r.elapsed_since(origin);
                (x, self.predict(x))
            })
            .collect()
    }

    /// Classify the slope using [`STEADY_BAND`].
    #[must_use]
    pub fn direction(&self) -> Trend {
        if self.slope > STEADY_BAND {
            Trend::Warming
        } else if self.slope < -STEADY_BAND {
            Trend::Cooling
        } else {
            Trend::Steady
        }
    }
}

/// Coarse direction of the trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Warming,
    Cooling,
    Steady,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warming => write!(f, "warming"),
            Self::Cooling => write!(f, "cooling"),
            Self::Steady  => write!(f, "steady"),
        }
    }
}

/// Output of one refresh cycle, handed to every display consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Refresh {
    /// History contents after the latest append.
    pub history: HistorySnapshot,
    /// The reading generated in this cycle.
    pub latest: Reading,
    /// `None` only when the history is empty (capacity 0).
    pub trend: Option<TrendLine>,
}

/// Central dashboard state. All panels read from this.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Most recent refresh result, `None` until the first cycle completes.
    pub refresh: Option<Refresh>,
    /// Number of refresh cycles received.
    pub cycles: u64,
    /// Local time the state was last updated.
    pub updated: DateTime<Local>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            refresh: None,
            cycles: 0,
            updated: Local::now(),
        }
    }
}

impl DashboardState {
    /// Replace the current refresh with `refresh`.
    pub fn apply(&mut self, refresh: Refresh) {
        self.refresh = Some(refresh);
        self.cycles += 1;
        self.updated = Local::now();
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.refresh.as_ref().map(|r| &r.latest)
    }

    pub fn history(&self) -> &[Reading] {
        match &self.refresh {
            Some(r) => &r.history[..],
            None    => &[],
        }
    }

    pub fn trend(&self) -> Option<TrendLine> {
        self.refresh.as_ref().and_then(|r| r.trend)
    }
}
