//! Bounded, seedable row subsampling

use rand::seq::index;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Draw a seed from the thread RNG when none is configured
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| thread_rng().gen())
}

/// Row indices of a uniform sample without replacement.
///
/// Draws `min(total, bound)` distinct rows out of `total` and returns them in
/// ascending order, so the sample preserves the original row order. Without
/// a bound, or with a bound that covers every row, all rows are returned.
///
/// # Examples
///
/// ```rust
/// use drift_core::sample::subsample_indices;
///
/// let rows = subsample_indices(10_000, Some(100), 7);
/// assert_eq!(rows.len(), 100);
/// assert_eq!(rows, subsample_indices(10_000, Some(100), 7));
/// ```
pub fn subsample_indices(total: usize, bound: Option<usize>, seed: u64) -> Vec<usize> {
    match bound {
        Some(bound) if bound < total => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut rows = index::sample(&mut rng, total, bound).into_vec();
            rows.sort_unstable();
            debug!(total, sampled = rows.len(), seed, "subsampled rows");
            rows
        }
        _ => (0..total).collect(),
    }
}
