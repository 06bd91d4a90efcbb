//! Utility functions for working with data slices

/// Whether a value counts as missing.
///
/// Nulls never reach this point; NaN is the in-band missing marker.
#[inline]
pub fn is_missing(value: Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use drift_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sort_in_place(&mut sorted);
    sorted
}

/// Sort a slice ascending, NaN last.
pub fn sort_in_place(data: &mut [f64]) {
    data.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
}

/// Type-7 quantile of an already sorted slice
///
/// Linear interpolation between the order statistics at `(n - 1) p`.
/// Returns NaN for an empty slice.
///
/// # Examples
///
/// ```rust
/// use drift_core::utils::quantile_sorted;
///
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert!((quantile_sorted(&data, 0.25) - 3.25).abs() < 1e-12);
/// ```
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    interpolate(sorted[lo], sorted[hi], h - lo as f64)
}

/// `a + frac (b - a)`, exact at `frac == 0`.
#[inline]
pub(crate) fn interpolate(a: f64, b: f64, frac: f64) -> f64 {
    if frac == 0.0 {
        a
    } else {
        a + frac * (b - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_basic() {
        let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
        assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_sorted_with_nan() {
        let data = vec![3.0, f64::NAN, 1.0, 2.0];
        let sorted_data = sorted(&data);

        assert_eq!(&sorted_data[..3], &[1.0, 2.0, 3.0]);
        assert!(sorted_data[3].is_nan());
    }

    #[test]
    fn test_sorted_preserves_original() {
        let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
        let original = data.clone();
        let _ = sorted(&data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_quantile_sorted_matches_type7() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let expected = [(0.01, 1.09), (0.25, 3.25), (0.5, 5.5), (0.75, 7.75), (0.99, 9.91)];
        for (p, q) in expected {
            assert!((quantile_sorted(&data, p) - q).abs() < 1e-12, "p = {p}");
        }
        assert_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_eq!(quantile_sorted(&data, 1.0), 10.0);
    }

    #[test]
    fn test_quantile_sorted_edges() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
        assert_eq!(quantile_sorted(&[42.0], 0.99), 42.0);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some(f64::NAN)));
        assert!(!is_missing(Some(0.0)));
        assert!(!is_missing(Some(f64::INFINITY)));
    }
}
