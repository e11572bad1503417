/// Largest grid index whose value `index / 10^p` still rounds back to itself.
const MAX_INDEX: f64 = 1e15;

/// Inclusive span of grid indices `i` with `lo <= i / 10^precision <= hi`.
///
/// Readings are multiples of `10^-precision`; this finds the first and last
/// such multiple inside `[lo, hi]`.  Returns `None` when the interval holds no
/// grid point, or when the bounds are too large for exact indices.
pub fn grid_span(lo: f64, hi: f64, precision: u32) -> Option<(i64, i64)> {
    let scale = 10f64.powi(precision as i32);
    let first = lower_index(lo, scale);
    let last = upper_index(hi, scale);

    if !(first.abs() <= MAX_INDEX && last.abs() <= MAX_INDEX) || first > last {
        return None;
    }
    Some((first as i64, last as i64))
}

/// Value of grid index `index` at `precision` decimal digits.
pub fn grid_value(index: i64, precision: u32) -> f64 {
    index as f64 / 10f64.powi(precision as i32)
}

// `lo * scale` can land a hair off an integer (1.1 * 10 = 11.000000000000002),
// so the candidate is checked against the bound it was derived from.
fn lower_index(lo: f64, scale: f64) -> f64 {
    let i = (lo * scale).ceil();
    if (i - 1.0) / scale >= lo {
        i - 1.0
    } else if i / scale < lo {
        i + 1.0
    } else {
        i
    }
}

fn upper_index(hi: f64, scale: f64) -> f64 {
    let i = (hi * scale).floor();
    if (i + 1.0) / scale <= hi {
        i + 1.0
    } else if i / scale > hi {
        i - 1.0
    } else {
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_bounds_are_kept() {
        assert_eq!(grid_span(-18.0, -16.0, 1), Some((-180, -160)));
        assert_eq!(grid_span(1.1, 2.3, 1), Some((11, 23)));
        assert_eq!(grid_value(11, 1), 1.1);
    }

    #[test]
    fn off_grid_bounds_snap_inward() {
        assert_eq!(grid_span(-17.96, -17.84, 1), Some((-179, -179)));
        assert_eq!(grid_span(0.05, 0.95, 1), Some((1, 9)));
    }

    #[test]
    fn interval_between_grid_points_is_empty() {
        assert_eq!(grid_span(-17.96, -17.94, 1), None);
        assert_eq!(grid_span(0.2, 0.8, 0), None);
    }

    #[test]
    fn degenerate_on_grid_interval_has_one_point() {
        assert_eq!(grid_span(-17.0, -17.0, 1), Some((-170, -170)));
    }

    #[test]
    fn oversized_or_non_finite_bounds_are_rejected() {
        assert_eq!(grid_span(-1e20, 0.0, 1), None);
        assert_eq!(grid_span(f64::NAN, 0.0, 1), None);
        assert_eq!(grid_span(0.0, f64::INFINITY, 1), None);
    }
}
