// Pairwise significance testing between prover groups
//
// For every pair of groups with at least two successful runs each:
// - Welch's t-test (unequal variances) on total durations, two-sided p-value
// - Cohen's d with the average-variance pooled standard deviation
// - significance flags at alpha = 0.05 and alpha = 0.01
//
// No multiple-comparison correction is applied; with k groups there are
// k(k-1)/2 independent tests and readers must account for that themselves.

mod effect_size;
mod tester;
mod welch;

pub use effect_size::{cohens_d, EffectSize};
pub use tester::{run_pairwise_tests, SignificanceResult, MIN_SAMPLES_PER_GROUP};
pub use welch::{welch_t_test, WelchTest};
