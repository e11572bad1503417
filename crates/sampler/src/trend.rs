use polar_core::{Reading, TrendLine};

/// Ordinary-least-squares fit of value against seconds elapsed since the
/// earliest reading.
///
/// Returns `None` for an empty slice.  When every reading shares the same
/// timestamp (including the single-reading case) the slope is undefined;
/// the fit is then flat: `slope = 0`, `intercept = mean(value)`.
pub fn estimate(readings: &[Reading]) -> Option<TrendLine> {
    let origin = readings.iter().map(|r| r.timestamp).min()?;
    let n = readings.len() as f64;

    let xs: Vec<f64> = readings.iter().map(|r| r.elapsed_since(origin)).collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = readings.iter().map(|r| r.value).sum::<f64>() / n;

    let (sxx, sxy) = xs
        .iter()
        .zip(readings)
        .fold((0.0, 0.0), |(sxx, sxy), (x, r)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (r.value - mean_y))
        });

    // Elapsed times are whole milliseconds at worst, so any real spread
    // puts sxx far above epsilon.
    if sxx <= f64::EPSILON {
        return Some(TrendLine { slope: 0.0, intercept: mean_y });
    }

    let slope = sxy / sxx;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    const TOL: f64 = 1e-9;

    fn at(secs: i64, value: f64) -> Reading {
        let base = Local.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        Reading::new(value, base + chrono::Duration::seconds(secs))
    }

    #[test]
    fn perfect_line() {
        let line = estimate(&[at(0, 5.0), at(1, 7.0), at(2, 9.0)]).unwrap();
        assert!((line.slope - 2.0).abs() < TOL, "slope {}", line.slope);
        assert!((line.intercept - 5.0).abs() < TOL, "intercept {}", line.intercept);
    }

    #[test]
    fn origin_is_earliest_reading() {
        // Same line shifted 100 s later: intercept is still measured at the first reading.
        let line = estimate(&[at(100, 5.0), at(101, 7.0), at(102, 9.0)]).unwrap();
        assert!((line.slope - 2.0).abs() < TOL);
        assert!((line.intercept - 5.0).abs() < TOL);
    }

    #[test]
    fn single_reading_is_flat() {
        let line = estimate(&[at(0, 3.0)]).unwrap();
        assert_eq!(line, TrendLine { slope: 0.0, intercept: 3.0 });
        assert!(!line.slope.is_nan());
    }

    #[test]
    fn coincident_timestamps_are_flat() {
        let line = estimate(&[at(4, -17.0), at(4, -16.0), at(4, -18.0)]).unwrap();
        assert_eq!(line.slope, 0.0);
        assert!((line.intercept + 17.0).abs() < TOL);
    }

    #[test]
    fn empty_is_unavailable() {
        assert!(estimate(&[]).is_none());
    }

    #[test]
    fn noisy_fit_matches_closed_form() {
        // x = 0,1,2,3 ; y = 1,3,2,5 → slope 1.1, intercept 1.1
        let line = estimate(&[at(0, 1.0), at(1, 3.0), at(2, 2.0), at(3, 5.0)]).unwrap();
        assert!((line.slope - 1.1).abs() < TOL, "slope {}", line.slope);
        assert!((line.intercept - 1.1).abs() < TOL, "intercept {}", line.intercept);
    }

    #[test]
    fn uneven_spacing() {
        // Readings 3 s apart still fit in seconds, not in sample index.
        let line = estimate(&[at(0, -18.0), at(3, -17.4), at(6, -16.8)]).unwrap();
        assert!((line.slope - 0.2).abs() < TOL);
        assert!((line.intercept + 18.0).abs() < TOL);
    }
}
