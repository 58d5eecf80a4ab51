//! Relational distances: data-to-prototype distances from dissimilarities alone.
//!
//! A prototype is a convex combination `w_k = Σ_i α_ki x_i` of data points
//! that are only known through their pairwise dissimilarities `D`. Its squared
//! distance to any point `x` follows from the distances `d_i = d(x, x_i)`:
//!
//! ```text
//! d(x, w_k)² = Σ_i α_ki d_i²  +  z_k
//! z_k        = -½ α_k D² α_kᵀ          (D² entrywise)
//! ```
//!
//! When `D` is Euclidean this reproduces the true squared Euclidean distance
//! without ever building an embedding. The same two formulas serve training
//! (distances of training points) and inference (distances of new points).

use crate::check::{
    check_convex_coefficients, check_dissimilarity_matrix, check_distances_to_prototypes,
};
use crate::error::{Error, Result};

/// Weighted sum of squares: `Σ(w[i] * d[i]²)`.
///
/// Returns 0.0 for empty slices.
///
/// # Debug Assertions
///
/// In debug builds, panics if lengths differ. In release builds,
/// mismatched lengths silently use the shorter length.
///
/// # Example
///
/// ```rust
/// use relgas::weighted_square_sum;
///
/// let w = [0.5, 0.5];
/// let d = [2.0, 4.0];
/// assert!((weighted_square_sum(&w, &d) - 10.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn weighted_square_sum(w: &[f64], d: &[f64]) -> f64 {
    debug_assert_eq!(
        w.len(),
        d.len(),
        "weighted_square_sum: dimension mismatch ({} vs {})",
        w.len(),
        d.len()
    );
    w.iter().zip(d.iter()).map(|(a, x)| a * x * x).sum()
}

/// Normalization terms `z_k = -½ α_k D² α_kᵀ` for every prototype.
///
/// Validates `d` as a dissimilarity matrix and `alpha` as `K` convex
/// combinations over its `m` points.
///
/// # Example
///
/// ```rust
/// use relgas::normalization_terms;
///
/// let d = vec![vec![0.0, 2.0], vec![2.0, 0.0]];
/// // Midpoint of two points at distance 2: z = -0.5 * (2 * 0.25 * 4) = -1.
/// let z = normalization_terms(&d, &[vec![0.5, 0.5]]).unwrap();
/// assert!((z[0] + 1.0).abs() < 1e-12);
/// ```
pub fn normalization_terms(d: &[Vec<f64>], alpha: &[Vec<f64>]) -> Result<Vec<f64>> {
    check_dissimilarity_matrix(d)?;
    check_convex_coefficients(d.len(), alpha.len(), alpha)?;
    Ok(normalization_terms_unchecked(d, alpha))
}

/// Squared distances from each query row to each prototype.
///
/// `d` is `n × m`: row `j` holds the dissimilarities of query `j` to the `m`
/// training points. Returns an `n × K` matrix.
pub fn distances_to_prototypes(
    d: &[Vec<f64>],
    alpha: &[Vec<f64>],
    z: &[f64],
) -> Result<Vec<Vec<f64>>> {
    check_distances_to_prototypes(d)?;
    check_prototypes(d[0].len(), alpha, z)?;
    Ok(distances_unchecked(d, alpha, z))
}

/// Squared distances from a single query to each prototype.
///
/// `d` holds the dissimilarities of the query to the `m` training points.
pub fn distances_to_prototypes_row(d: &[f64], alpha: &[Vec<f64>], z: &[f64]) -> Result<Vec<f64>> {
    check_prototypes(d.len(), alpha, z)?;
    Ok(row_distances_unchecked(d, alpha, z))
}

fn check_prototypes(m: usize, alpha: &[Vec<f64>], z: &[f64]) -> Result<()> {
    if z.len() != alpha.len() {
        return Err(Error::DimensionMismatch {
            what: "normalization terms",
            expected: alpha.len(),
            found: z.len(),
        });
    }
    let Some(first) = alpha.first() else {
        return Err(Error::EmptyMatrix);
    };
    if first.len() != m {
        return Err(Error::DimensionMismatch {
            what: "dissimilarities to training points",
            expected: first.len(),
            found: m,
        });
    }
    check_convex_coefficients(m, alpha.len(), alpha)
}

/// Rows with `α_ki == 0` skip the whole inner pass over `j`, which matters
/// once annealing has made the coefficients sparse.
pub(crate) fn normalization_terms_unchecked(d: &[Vec<f64>], alpha: &[Vec<f64>]) -> Vec<f64> {
    alpha
        .iter()
        .map(|a| {
            let mut z = 0.0;
            for (i, &a_i) in a.iter().enumerate() {
                if a_i == 0.0 {
                    continue;
                }
                z += a_i * weighted_square_sum(a, &d[i]);
            }
            -0.5 * z
        })
        .collect()
}

pub(crate) fn distances_unchecked(d: &[Vec<f64>], alpha: &[Vec<f64>], z: &[f64]) -> Vec<Vec<f64>> {
    d.iter()
        .map(|row| row_distances_unchecked(row, alpha, z))
        .collect()
}

#[inline]
pub(crate) fn row_distances_unchecked(d: &[f64], alpha: &[Vec<f64>], z: &[f64]) -> Vec<f64> {
    alpha
        .iter()
        .zip(z.iter())
        .map(|(a, &z_k)| weighted_square_sum(a, d) + z_k)
        .collect()
}
