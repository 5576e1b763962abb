//! Equalization pipeline execution.
//!
//! # Algorithm
//!
//! 1. **Floor correction**: shift all weights up by `|min|` when the
//!    minimum is non-positive.
//! 2. **Ceiling correction**: cap a maximum that dominates the runner-up
//!    by more than the minimum.
//! 3. **Median**: reference scalar `η` for redistribution.
//! 4. **Rescale + reconcile**: scale proportionally onto the target sum,
//!    round to one decimal place, then absorb the residual rounding drift
//!    so the sum is exact.

use crate::config::{EqualizerConfig, ReconcilePolicy};
use crate::error::EqualizeError;
use crate::stages::{self, round_tenth, EPSILON};
use crate::types::WeightSet;

/// Outcome of an equalization run.
#[derive(Debug, Clone)]
pub struct EqualizeResult<K> {
    /// The adjusted set: same keys in the same order, values at one
    /// decimal place, summing to the target.
    pub weights: WeightSet<K>,

    /// Whether the floor correction fired (non-positive minimum).
    pub floor_applied: bool,

    /// Whether the ceiling correction fired (dominant maximum).
    pub ceiling_applied: bool,

    /// Median of the corrected weights, before rescaling.
    pub median: f64,

    /// Rounding drift between the target and the rescaled sum (at one
    /// decimal place), before reconciliation.
    pub residual: f64,

    /// Single-weight adjustments made during reconciliation.
    pub reconcile_steps: usize,
}

/// Executes the equalization pipeline.
pub struct EqualizerRunner;

impl EqualizerRunner {
    /// Runs the pipeline on `weights`, producing a new set that sums to
    /// `target_sum`.
    ///
    /// The input is never mutated; on error the caller's data is untouched.
    ///
    /// # Errors
    ///
    /// - [`EqualizeError::EmptyInput`] when the set has no entries.
    /// - [`EqualizeError::ZeroSum`] when the corrected weights sum to zero
    ///   and proportional rescaling is undefined.
    /// - [`EqualizeError::NonConvergence`] under
    ///   [`ReconcilePolicy::Redistribute`] when the residual cannot be
    ///   walked off.
    pub fn run<K: Clone>(
        weights: &WeightSet<K>,
        target_sum: f64,
        config: &EqualizerConfig,
    ) -> Result<EqualizeResult<K>, EqualizeError> {
        if weights.is_empty() {
            return Err(EqualizeError::EmptyInput);
        }

        // A single weight takes the whole budget; there is no runner-up to
        // cap against and nothing to redistribute.
        if weights.len() == 1 {
            let value = round_tenth(target_sum);
            return Ok(EqualizeResult {
                weights: weights.with_values(vec![value]),
                floor_applied: false,
                ceiling_applied: false,
                median: value,
                residual: 0.0,
                reconcile_steps: 0,
            });
        }

        let mut values = weights.values_vec();
        let floor_applied = stages::apply_floor(&mut values);
        let ceiling_applied = stages::apply_ceiling(&mut values);
        let eta = stages::median(&values);

        if stages::rescale(&mut values, target_sum).is_none() {
            return Err(EqualizeError::ZeroSum);
        }

        let sum1: f64 = values.iter().sum();
        let residual = round_tenth(target_sum - sum1);

        let reconcile_steps = match config.policy {
            ReconcilePolicy::SingleKey => reconcile_single_key(&mut values, residual),
            ReconcilePolicy::Redistribute => reconcile_redistribute(
                &mut values,
                target_sum,
                eta,
                config.max_reconcile_steps,
            )?,
        };

        Ok(EqualizeResult {
            weights: weights.with_values(values),
            floor_applied,
            ceiling_applied,
            median: eta,
            residual,
            reconcile_steps,
        })
    }
}

/// Equalizes `weights` onto `target_sum` with the default configuration.
///
/// # Examples
///
/// ```
/// use weight_equalizer::{equalize, WeightSet};
///
/// let set: WeightSet<&str> = [("a", 1.0), ("b", 2.0), ("c", -3.0)]
///     .into_iter()
///     .collect();
/// let out = equalize(&set, 10.0)?;
///
/// assert_eq!(out.get(&"a"), Some(5.0));
/// assert_eq!(out.get(&"b"), Some(5.0));
/// assert_eq!(out.get(&"c"), Some(0.0));
/// # Ok::<(), weight_equalizer::EqualizeError>(())
/// ```
pub fn equalize<K: Clone>(
    weights: &WeightSet<K>,
    target_sum: f64,
) -> Result<WeightSet<K>, EqualizeError> {
    EqualizerRunner::run(weights, target_sum, &EqualizerConfig::default()).map(|r| r.weights)
}

/// Policy A: the first maximum-holding weight absorbs the whole residual.
fn reconcile_single_key(values: &mut [f64], residual: f64) -> usize {
    if residual.abs() <= EPSILON {
        return 0;
    }
    let idx = stages::max_index(values);
    values[idx] = round_tenth(values[idx] + residual);
    1
}

/// Policy B: walk the residual off in 0.1 steps, re-checking the sum after
/// every single adjustment so the target is never overshot.
///
/// Overshoot (sum above target) bleeds from weights at or above the median
/// `eta`; undershoot tops up weights strictly below the second-smallest
/// current value.
fn reconcile_redistribute(
    values: &mut [f64],
    target: f64,
    eta: f64,
    max_steps: usize,
) -> Result<usize, EqualizeError> {
    let mut sum: f64 = values.iter().sum();
    let gap = (sum - target).abs();
    if gap <= EPSILON {
        return Ok(0);
    }

    let cap = if max_steps > 0 {
        max_steps
    } else {
        (gap * 10.0).ceil() as usize + values.len()
    };
    let mut steps = 0usize;

    if sum > target + EPSILON {
        'bleed: while sum > target + EPSILON {
            let mut progressed = false;
            for i in 0..values.len() {
                if values[i] >= eta - EPSILON {
                    if steps >= cap {
                        break 'bleed;
                    }
                    values[i] = round_tenth(values[i] - 0.1);
                    sum = values.iter().sum();
                    steps += 1;
                    progressed = true;
                    if sum <= target + EPSILON {
                        break 'bleed;
                    }
                }
            }
            if !progressed {
                break;
            }
        }
    } else {
        'fill: while sum < target - EPSILON {
            let threshold = stages::second_smallest(values);
            let mut progressed = false;
            for i in 0..values.len() {
                if values[i] < threshold - EPSILON {
                    if steps >= cap {
                        break 'fill;
                    }
                    values[i] = round_tenth(values[i] + 0.1);
                    sum = values.iter().sum();
                    steps += 1;
                    progressed = true;
                    if sum >= target - EPSILON {
                        break 'fill;
                    }
                }
            }
            if !progressed {
                break;
            }
        }
    }

    let residual = sum - target;
    if residual.abs() > EPSILON {
        return Err(EqualizeError::NonConvergence { steps, residual });
    }
    Ok(steps)
}
