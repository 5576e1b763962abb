//! Equalizer configuration and reconciliation policies.

/// Strategy for absorbing residual rounding drift after the proportional
/// rescale.
///
/// Two variants of this algorithm exist historically; they produce different
/// (both valid) outputs for the same input. `SingleKey` is the documented
/// default: it is O(1) and exact for any target representable at one decimal
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Add the whole residual (rounded to 0.1) to the first weight holding
    /// the current maximum.
    SingleKey,

    /// Walk the residual off in 0.1 steps: when the sum overshoots the
    /// target, decrement weights at or above the pre-rescale median; when it
    /// undershoots, increment weights strictly below the second-smallest
    /// current value. The sum is re-checked after every single adjustment.
    ///
    /// Can fail with a convergence error when no weight is eligible (e.g.
    /// an all-equal set that undershoots) or when the target is not
    /// representable at one decimal place.
    Redistribute,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        ReconcilePolicy::SingleKey
    }
}

/// Configuration for an equalization run.
///
/// # Examples
///
/// ```
/// use weight_equalizer::{EqualizerConfig, ReconcilePolicy};
///
/// let config = EqualizerConfig::default()
///     .with_policy(ReconcilePolicy::Redistribute)
///     .with_max_reconcile_steps(1000);
/// ```
#[derive(Debug, Clone)]
pub struct EqualizerConfig {
    /// How residual rounding drift is reconciled.
    pub policy: ReconcilePolicy,

    /// Hard bound on redistribution steps. 0 derives the bound from the
    /// residual: `ceil(|residual| * 10) + n`. Ignored by `SingleKey`.
    pub max_reconcile_steps: usize,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            policy: ReconcilePolicy::default(),
            max_reconcile_steps: 0,
        }
    }
}

impl EqualizerConfig {
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_reconcile_steps(mut self, n: usize) -> Self {
        self.max_reconcile_steps = n;
        self
    }
}
