//! Rank-based soft assignment of data points to prototypes.
//!
//! Neural gas weights prototype `k` for point `i` by `exp(-r(k|i) / λ)`,
//! where `r(k|i)` counts the prototypes strictly closer to `i`. Ranks whose
//! weight falls below [`NEGLIGIBLE_WEIGHT`] are treated as zero, so only the
//! `max_rank` nearest prototypes per point have to be ranked at all. Late in
//! annealing `max_rank` collapses to 1 and ranking becomes a plain argmin.

use crate::check::check_distances_to_prototypes;
use crate::error::{Error, Result};
use crate::NEGLIGIBLE_WEIGHT;

/// Precomputed weights `exp(-r / λ)` for the ranks that matter.
///
/// Always holds at least rank 0 (weight 1), and at most one weight per
/// prototype.
#[derive(Clone, Debug, PartialEq)]
pub struct RankWeights {
    weights: Vec<f64>,
}

impl RankWeights {
    /// Weights for neighborhood range `lambda` and `n_prototypes` prototypes.
    ///
    /// Stops at the first rank `r` with `r / λ > -ln(1e-3)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `lambda` is finite and positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relgas::RankWeights;
    ///
    /// // λ = 0.01: every rank past 0 is negligible.
    /// assert_eq!(RankWeights::new(0.01, 10).unwrap().max_rank(), 1);
    ///
    /// // λ = K / 2: all ranks contribute.
    /// assert_eq!(RankWeights::new(5.0, 10).unwrap().max_rank(), 10);
    /// ```
    pub fn new(lambda: f64, n_prototypes: usize) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(Error::InvalidParameter {
                name: "lambda",
                message: "must be finite and > 0",
            });
        }
        let inv_lambda = 1.0 / lambda;
        let cutoff = -NEGLIGIBLE_WEIGHT.ln();
        let mut weights = vec![1.0];
        for rank in 1..n_prototypes {
            let exponent = inv_lambda * rank as f64;
            if exponent > cutoff {
                break;
            }
            weights.push((-exponent).exp());
        }
        Ok(Self { weights })
    }

    /// Number of ranks with non-negligible weight (at least 1).
    #[inline]
    pub fn max_rank(&self) -> usize {
        self.weights.len()
    }

    /// Weight for each retained rank, best rank first.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

/// Indices of the `window` nearest prototypes, nearest first.
///
/// Insertion sort restricted to a window: a prototype enters only if it beats
/// the current worst entry, pushing worse entries down and off the end. Cost
/// is `O(K · window)` instead of a full sort. Equal distances keep ascending
/// index order.
///
/// # Example
///
/// ```rust
/// use relgas::nearest_prototypes;
///
/// let distances = [4.0, 1.0, 3.0, 1.0, 0.5];
/// assert_eq!(nearest_prototypes(&distances, 3), vec![4, 1, 3]);
/// ```
pub fn nearest_prototypes(distances: &[f64], window: usize) -> Vec<usize> {
    let window = window.min(distances.len());
    if window == 0 {
        return Vec::new();
    }
    let mut ranking = vec![0usize; window];
    for (k, &d) in distances.iter().enumerate().skip(1) {
        if k >= window && d >= distances[ranking[window - 1]] {
            continue;
        }
        let mut rank = k.min(window - 1);
        while rank > 0 && d < distances[ranking[rank - 1]] {
            ranking[rank] = ranking[rank - 1];
            rank -= 1;
        }
        ranking[rank] = k;
    }
    ranking
}

/// Soft assignment matrix `H` (`K × m`) from data-to-prototype distances
/// `dp` (`m × K`).
///
/// `H[k][i]` is the weight of the rank prototype `k` holds for point `i`, or
/// exactly zero outside the retained ranks.
///
/// # Errors
///
/// Fails if `dp` is empty or its rows differ in length.
pub fn soft_assignments(dp: &[Vec<f64>], weights: &RankWeights) -> Result<Vec<Vec<f64>>> {
    check_distances_to_prototypes(dp)?;
    Ok(soft_assignments_unchecked(dp, weights))
}

pub(crate) fn soft_assignments_unchecked(
    dp: &[Vec<f64>],
    weights: &RankWeights,
) -> Vec<Vec<f64>> {
    let n_prototypes = dp.first().map_or(0, Vec::len);
    let mut h = vec![vec![0.0; dp.len()]; n_prototypes];
    for (i, row) in dp.iter().enumerate() {
        let ranking = nearest_prototypes(row, weights.max_rank());
        for (&k, &weight) in ranking.iter().zip(weights.as_slice()) {
            h[k][i] = weight;
        }
    }
    h
}
