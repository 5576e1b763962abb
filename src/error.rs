//! Equalization failure modes.

use thiserror::Error;

/// Errors surfaced by the equalization pipeline.
///
/// The input set is never partially mutated: on error the caller's data is
/// untouched and no output set exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EqualizeError {
    /// The input set has no entries.
    #[error("weight set is empty")]
    EmptyInput,

    /// The corrected weights sum to zero, so proportional rescaling is
    /// undefined. Reachable only for sets of two or more entries, e.g. when
    /// all weights are equal and non-positive.
    #[error("corrected weights sum to zero; proportional rescale is undefined")]
    ZeroSum,

    /// Iterative redistribution stopped without reaching the target sum,
    /// either because the step bound was exhausted or because no weight was
    /// eligible for adjustment.
    #[error("redistribution left residual {residual} after {steps} steps")]
    NonConvergence {
        /// Adjustments performed before giving up.
        steps: usize,
        /// Remaining gap between the running sum and the target.
        residual: f64,
    },
}
