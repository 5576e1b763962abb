//! Corrective passes applied ahead of renormalization.
//!
//! Each pass is a pure function over the value slice; key association is
//! positional and handled by the runner. All passes assume a non-empty
//! slice (the runner rejects empty input up front).

/// Tolerance for floating-point comparisons throughout the pipeline.
pub(crate) const EPSILON: f64 = 1e-9;

/// Rounds to one decimal place, half away from zero.
pub(crate) fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub(crate) fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Index of the maximum value, first occurrence on ties.
pub(crate) fn max_index(values: &[f64]) -> usize {
    let mut idx = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[idx] {
            idx = i;
        }
    }
    idx
}

/// Floor correction: if the minimum `ω` is non-positive, shift every weight
/// up by `|ω|` so the minimum lands at exactly 0.
///
/// Returns whether the correction fired.
pub(crate) fn apply_floor(values: &mut [f64]) -> bool {
    let omega = min_value(values);
    if omega <= 0.0 {
        for v in values.iter_mut() {
            *v -= omega;
        }
        true
    } else {
        false
    }
}

/// Ceiling correction: caps a maximum that dominates the runner-up by more
/// than the minimum.
///
/// With `α` the maximum, `β` the second-highest (ties make `β = α`) and `ω`
/// the minimum, a single dominant `α` is replaced by `β + ω`. Only the
/// first-encountered maximum is touched. Sets with fewer than two entries
/// have no runner-up and are left alone.
///
/// Returns whether the correction fired.
pub(crate) fn apply_ceiling(values: &mut [f64]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let idx = max_index(values);
    let alpha = values[idx];
    let beta = values
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != idx)
        .map(|(_, &v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    let omega = min_value(values);
    if alpha - beta > omega + EPSILON {
        values[idx] = beta + omega;
        true
    } else {
        false
    }
}

/// Median of the values: middle element for odd counts, mean of the two
/// middle elements for even counts.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Second-smallest value in sorted order (duplicates count).
pub(crate) fn second_smallest(values: &[f64]) -> f64 {
    debug_assert!(values.len() >= 2);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[1]
}

/// Proportional rescale toward `target`: each weight becomes
/// `round(target / sum * w, 1 dp)`.
///
/// Returns the pre-rescale sum, or `None` when it is zero (the caller must
/// surface that as an error rather than divide).
pub(crate) fn rescale(values: &mut [f64], target: f64) -> Option<f64> {
    let sum: f64 = values.iter().sum();
    if sum.abs() <= EPSILON {
        return None;
    }
    let factor = target / sum;
    for v in values.iter_mut() {
        *v = round_tenth(*v * factor);
    }
    Some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {e}, got {a}");
        }
    }

    #[test]
    fn test_round_tenth() {
        assert!((round_tenth(3.333) - 3.3).abs() < 1e-12);
        assert!((round_tenth(3.35) - 3.4).abs() < 1e-12);
        assert!((round_tenth(-0.25) + 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_floor_negative_min() {
        let mut values = vec![1.0, 2.0, -3.0];
        assert!(apply_floor(&mut values));
        assert_close(&values, &[4.0, 5.0, 0.0]);
    }

    #[test]
    fn test_floor_zero_min_fires_without_change() {
        let mut values = vec![0.0, 2.0];
        assert!(apply_floor(&mut values));
        assert_close(&values, &[0.0, 2.0]);
    }

    #[test]
    fn test_floor_positive_min_noop() {
        let mut values = vec![1.0, 2.0];
        assert!(!apply_floor(&mut values));
        assert_close(&values, &[1.0, 2.0]);
    }

    #[test]
    fn test_floor_all_equal_negative_zeroes_out() {
        let mut values = vec![-5.0, -5.0, -5.0];
        assert!(apply_floor(&mut values));
        assert_close(&values, &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ceiling_caps_dominant_max() {
        // alpha=5, beta=4, omega=0: 5-4 > 0, so 5 becomes 4+0
        let mut values = vec![4.0, 5.0, 0.0];
        assert!(apply_ceiling(&mut values));
        assert_close(&values, &[4.0, 4.0, 0.0]);
    }

    #[test]
    fn test_ceiling_within_bound_noop() {
        // 5-3 == 2 == omega: not strictly greater, unchanged
        let mut values = vec![2.0, 3.0, 5.0];
        assert!(!apply_ceiling(&mut values));
        assert_close(&values, &[2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_ceiling_tied_maxima_noop() {
        // beta equals alpha on ties, so the gap is 0
        let mut values = vec![5.0, 5.0, 1.0];
        assert!(!apply_ceiling(&mut values));
        assert_close(&values, &[5.0, 5.0, 1.0]);
    }

    #[test]
    fn test_ceiling_single_entry_noop() {
        let mut values = vec![7.0];
        assert!(!apply_ceiling(&mut values));
    }

    #[test]
    fn test_ceiling_first_occurrence_on_equal_max_after_gap() {
        // alpha at index 1 dominates; only that occurrence is corrected
        let mut values = vec![1.0, 9.0, 2.0];
        assert!(apply_ceiling(&mut values));
        assert_close(&values, &[1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_median_odd() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_even() {
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_second_smallest_with_duplicates() {
        assert!((second_smallest(&[0.0, 0.0, 5.0]) - 0.0).abs() < 1e-12);
        assert!((second_smallest(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rescale_rounds_to_tenth() {
        let mut values = vec![1.0, 1.0, 1.0];
        let sum = rescale(&mut values, 10.0);
        assert!(sum.is_some());
        assert_close(&values, &[3.3, 3.3, 3.3]);
    }

    #[test]
    fn test_rescale_zero_sum() {
        let mut values = vec![0.0, 0.0];
        assert!(rescale(&mut values, 10.0).is_none());
    }

    #[test]
    fn test_rescale_negative_target() {
        let mut values = vec![1.0, 2.0, 3.0];
        assert!(rescale(&mut values, -6.0).is_some());
        assert_close(&values, &[-1.0, -2.0, -3.0]);
    }
}
