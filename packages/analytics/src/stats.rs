//! Order-statistic helpers shared by the scatter legend and the box plots.

/// Sorts values ascending using IEEE total ordering.
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// Linear-interpolation quantile of an ascending slice.
///
/// The `p`-quantile sits at position `(n - 1) * p`; fractional positions
/// interpolate between the neighbouring order statistics. `p` is clamped to
/// `[0, 1]`. Returns `None` for an empty slice.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;

    #[allow(clippy::cast_precision_loss)]
    let pos = last as f64 * p.clamp(0.0, 1.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(last);

    #[allow(clippy::cast_precision_loss)]
    let frac = pos - lo as f64;

    Some((sorted[hi] - sorted[lo]).mul_add(frac, sorted[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn even_length_quartiles_interpolate() {
        let v = [10.0, 20.0, 30.0, 40.0];
        assert!(approx(quantile_sorted(&v, 0.25).unwrap(), 17.5));
        assert!(approx(quantile_sorted(&v, 0.5).unwrap(), 25.0));
        assert!(approx(quantile_sorted(&v, 0.75).unwrap(), 32.5));
    }

    #[test]
    fn odd_length_median_is_middle_element() {
        let v = [1.0, 3.0, 9.0, 10.0, 12.0];
        assert!(approx(quantile_sorted(&v, 0.5).unwrap(), 9.0));
        assert!(approx(quantile_sorted(&v, 0.25).unwrap(), 3.0));
        assert!(approx(quantile_sorted(&v, 0.75).unwrap(), 10.0));
    }

    #[test]
    fn extremes_and_degenerate_inputs() {
        let v = [2.0, 4.0, 8.0];
        assert!(approx(quantile_sorted(&v, 0.0).unwrap(), 2.0));
        assert!(approx(quantile_sorted(&v, 1.0).unwrap(), 8.0));
        assert!(approx(quantile_sorted(&v, 1.5).unwrap(), 8.0));
        assert!(approx(quantile_sorted(&[5.0], 0.3).unwrap(), 5.0));
        assert!(quantile_sorted(&[], 0.5).is_none());
    }

    #[test]
    fn sorts_ascending() {
        let mut v = vec![3.0, -1.0, 2.5, 0.0];
        sort_ascending(&mut v);
        assert_eq!(v, vec![-1.0, 0.0, 2.5, 3.0]);
    }
}
