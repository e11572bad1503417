use chrono::{DateTime, Local, SubsecRound};
use polar_config::{SamplerConfig, MAX_PRECISION};
use polar_core::{grid_span, grid_value, PolarError, Reading, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Closed interval `[lo, hi]` that generated values are drawn from, together
/// with the number of decimal digits each value keeps.
///
/// Values are multiples of `10^-precision`; only the multiples that lie in
/// `[lo, hi]` can be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    lo:        f64,
    hi:        f64,
    precision: u32,
    first:     i64,
    steps:     u64,
}

impl ValueRange {
    /// Both bounds must be finite, `lo <= hi`, `precision <= MAX_PRECISION`,
    /// and at least one `precision`-digit value must lie in `[lo, hi]`.
    /// `lo == hi` on that grid yields a constant generator.
    pub fn new(lo: f64, hi: f64, precision: u32) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() {
            return Err(PolarError::Sampler(format!("invalid value range [{lo}, {hi}]")));
        }
        if lo > hi {
            return Err(PolarError::Sampler(format!("empty value range [{lo}, {hi}]")));
        }
        if precision > MAX_PRECISION {
            return Err(PolarError::Sampler(format!(
                "precision {precision} exceeds {MAX_PRECISION} digits"
            )));
        }
        let (first, last) = grid_span(lo, hi, precision).ok_or_else(|| {
            PolarError::Sampler(format!(
                "value range [{lo}, {hi}] holds no value with {precision} decimal digit(s)"
            ))
        })?;
        Ok(Self {
            lo,
            hi,
            precision,
            first,
            steps: last.abs_diff(first),
        })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    /// Value `step` grid steps above the smallest drawable value.
    fn point(&self, step: u64) -> f64 {
        grid_value(self.first + step as i64, self.precision)
    }
}

/// Round `value` to `precision` decimal digits (half away from zero).
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

/// Produces synthetic temperature readings.
///
/// Each call picks one of the range's grid values uniformly and stamps the
/// reading with the current time truncated to whole seconds.
#[derive(Debug)]
pub struct ReadingGenerator<R = StdRng> {
    range: ValueRange,
    rng:   R,
}

impl ReadingGenerator<StdRng> {
    /// Build a generator from the `[sampler]` config section.  A configured
    /// seed makes the value sequence reproducible.
    pub fn from_config(cfg: &SamplerConfig) -> Result<Self> {
        cfg.validate()?;
        let range = ValueRange::new(cfg.min, cfg.max, cfg.precision)?;
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(range, rng))
    }
}

impl<R: Rng> ReadingGenerator<R> {
    pub fn with_rng(range: ValueRange, rng: R) -> Self {
        Self { range, rng }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Swap the range, keeping the random stream.
    pub fn configure(&mut self, range: ValueRange) {
        self.range = range;
    }

    /// Generate a reading stamped with the current local time.
    pub fn generate(&mut self) -> Reading {
        self.generate_at(Local::now())
    }

    /// Generate a reading stamped with `now` (truncated to whole seconds).
    pub fn generate_at(&mut self, now: DateTime<Local>) -> Reading {
        Reading::new(self.draw(), now.trunc_subsecs(0))
    }

    fn draw(&mut self) -> f64 {
        let step = self.rng.gen_range(0..=self.range.steps);
        self.range.point(step)
    }
}
