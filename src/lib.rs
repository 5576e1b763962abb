//! Outlier-damping weight equalization.
//!
//! Renormalizes a keyed set of numeric weights onto an exact target sum,
//! damping extreme outliers first. Useful wherever proportional scores
//! (allocation percentages, priority weights) must fit a fixed budget:
//!
//! 1. **Floor correction**: a non-positive minimum shifts the whole set up
//!    so the smallest weight lands at 0.
//! 2. **Ceiling correction**: a maximum that dominates the runner-up by
//!    more than the minimum is capped at `runner_up + minimum`.
//! 3. **Median**: reference scalar for the redistribution policy.
//! 4. **Rescale + reconcile**: proportional scaling onto the target,
//!    rounded to one decimal place, with residual rounding drift absorbed
//!    so the sum is exact.
//!
//! The pipeline is a pure function: single-threaded, no shared state, and
//! the caller's input is never mutated. Independent sets can be equalized
//! concurrently without coordination.
//!
//! # Examples
//!
//! ```
//! use weight_equalizer::{equalize, WeightSet};
//!
//! let scores: WeightSet<&str> = [("a", 1.0), ("b", 2.0), ("c", -3.0)]
//!     .into_iter()
//!     .collect();
//!
//! // Renormalize onto a budget of 10.
//! let adjusted = equalize(&scores, 10.0)?;
//! assert!((adjusted.sum() - 10.0).abs() < 1e-9);
//! # Ok::<(), weight_equalizer::EqualizeError>(())
//! ```
//!
//! Two reconciliation policies exist as historical variants of the
//! algorithm; [`ReconcilePolicy::SingleKey`] is the default and
//! [`EqualizerRunner`] exposes the choice along with per-run diagnostics.

mod config;
mod error;
mod runner;
mod stages;
mod types;

pub use config::{EqualizerConfig, ReconcilePolicy};
pub use error::EqualizeError;
pub use runner::{equalize, EqualizeResult, EqualizerRunner};
pub use types::WeightSet;
