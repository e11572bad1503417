use crate::generator::{ReadingGenerator, ValueRange};
use crate::history::HistoryBuffer;
use crate::trend;
use chrono::{DateTime, Local};
use polar_config::{PolarConfig, SamplerConfig};
use polar_core::{Reading, Refresh, Result};
use rand::{rngs::StdRng, Rng};

/// One refresh cycle: generate → append → estimate.
///
/// Owns the only [`HistoryBuffer`], so whoever owns the pipeline is the sole
/// writer.  Every method is synchronous and CPU-only.
#[derive(Debug)]
pub struct Pipeline<R = StdRng> {
    generator: ReadingGenerator<R>,
    history:   HistoryBuffer,
}

impl Pipeline<StdRng> {
    pub fn from_config(cfg: &PolarConfig) -> Result<Self> {
        Ok(Self::new(
            ReadingGenerator::from_config(&cfg.sampler)?,
            HistoryBuffer::new(cfg.history.capacity),
        ))
    }
}

impl<R: Rng> Pipeline<R> {
    pub fn new(generator: ReadingGenerator<R>, history: HistoryBuffer) -> Self {
        Self { generator, history }
    }

    /// Run one refresh cycle stamped with the current time.
    pub fn tick(&mut self) -> Refresh {
        let reading = self.generator.generate();
        self.record(reading)
    }

    /// Run one refresh cycle stamped with `now`.
    pub fn tick_at(&mut self, now: DateTime<Local>) -> Refresh {
        let reading = self.generator.generate_at(now);
        self.record(reading)
    }

    /// Append an externally produced reading and recompute the trend.
    pub fn record(&mut self, reading: Reading) -> Refresh {
        self.history.append(reading);
        let history = self.history.snapshot();
        let trend = trend::estimate(&history);
        Refresh {
            history,
            latest: reading,
            trend,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn generator(&self) -> &ReadingGenerator<R> {
        &self.generator
    }

    /// Apply new sampler and history settings between cycles.
    ///
    /// The random stream is kept; a changed `seed` only takes effect on the
    /// next start.  On error nothing is changed.
    pub fn reconfigure(&mut self, sampler: &SamplerConfig, capacity: usize) -> Result<()> {
        sampler.validate()?;
        let range = ValueRange::new(sampler.min, sampler.max, sampler.precision)?;
        self.generator.configure(range);
        self.history.resize(capacity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn pipeline(capacity: usize) -> Pipeline {
        let generator = ReadingGenerator::with_rng(
            ValueRange::new(-18.0, -16.0, 1).unwrap(),
            StdRng::seed_from_u64(3),
        );
        Pipeline::new(generator, HistoryBuffer::new(capacity))
    }

    fn t(secs: i64) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 2, 2, 9, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    #[test]
    fn tick_returns_history_latest_and_trend() {
        let mut p = pipeline(5);
        let first = p.tick_at(t(0));
        assert_eq!(first.history.len(), 1);
        assert_eq!(first.history[0], first.latest);
        let trend = first.trend.unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.intercept, first.latest.value);

        let second = p.tick_at(t(1));
        assert_eq!(second.history.len(), 2);
        assert_eq!(second.history[1], second.latest);
    }

    #[test]
    fn history_is_bounded_across_ticks() {
        let mut p = pipeline(5);
        let mut last = None;
        for i in 0..12 {
            last = Some(p.tick_at(t(i)));
        }
        let last = last.unwrap();
        assert_eq!(last.history.len(), 5);
        assert_eq!(last.history[0].timestamp, t(7));
        assert_eq!(last.history[4].timestamp, t(11));
    }

    #[test]
    fn zero_capacity_has_no_trend() {
        let mut p = pipeline(0);
        let refresh = p.tick_at(t(0));
        assert!(refresh.history.is_empty());
        assert!(refresh.trend.is_none());
        assert!((-18.0..=-16.0).contains(&refresh.latest.value));
    }

    #[test]
    fn record_fits_supplied_readings() {
        let mut p = pipeline(3);
        p.record(Reading::new(5.0, t(0)));
        p.record(Reading::new(7.0, t(1)));
        let refresh = p.record(Reading::new(9.0, t(2)));
        let line = refresh.trend.unwrap();
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 5.0).abs() < 1e-9);
    }

    #[test]
    fn reconfigure_changes_range_and_capacity() {
        let mut p = pipeline(5);
        for i in 0..5 {
            p.tick_at(t(i));
        }

        let sampler = SamplerConfig { min: -19.0, max: -14.0, ..Default::default() };
        p.reconfigure(&sampler, 2).unwrap();
        assert_eq!(p.history().len(), 2);
        assert_eq!(p.generator().range(), ValueRange::new(-19.0, -14.0, 1).unwrap());

        let refresh = p.tick_at(t(5));
        assert_eq!(refresh.history.len(), 2);
    }

    #[test]
    fn reconfigure_rejects_bad_range_without_changes() {
        let mut p = pipeline(5);
        let sampler = SamplerConfig { min: 1.0, max: 0.0, ..Default::default() };
        assert!(p.reconfigure(&sampler, 1).is_err());
        assert_eq!(p.history().capacity(), 5);
        assert_eq!(p.generator().range(), ValueRange::new(-18.0, -16.0, 1).unwrap());

        let between = SamplerConfig { min: -17.96, max: -17.94, ..Default::default() };
        assert!(p.reconfigure(&between, 1).is_err());
        assert_eq!(p.history().capacity(), 5);
    }

    #[test]
    fn reconfigure_applies_precision() {
        let mut p = pipeline(5);
        let sampler = SamplerConfig { min: 0.0, max: 1.0, precision: 2, seed: None };
        p.reconfigure(&sampler, 5).unwrap();
        assert_eq!(p.generator().range().precision(), 2);

        for i in 0..200 {
            let v = p.tick_at(t(i)).latest.value;
            assert!((0.0..=1.0).contains(&v));
            assert_eq!(crate::round_to(v, 2), v);
        }
    }
}
