//! Input validation.
//!
//! Each check returns the first violation it finds. Public entry points run
//! the relevant checks eagerly, before touching any numbers.

use crate::error::{ConvexityViolation, Error, Result};
use crate::DOUBLE_TOLERANCE;

/// Check that `d` is a valid dissimilarity matrix.
///
/// Requires a non-empty square matrix of finite entries with zero diagonal
/// and symmetric entries. Both comparisons use a tolerance of `mean(d) * 1e-8`, so the
/// check is invariant to the scale of the dissimilarities.
///
/// # Example
///
/// ```rust
/// use relgas::check_dissimilarity_matrix;
///
/// let d = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
/// assert!(check_dissimilarity_matrix(&d).is_ok());
///
/// let asymmetric = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
/// assert!(check_dissimilarity_matrix(&asymmetric).is_err());
/// ```
pub fn check_dissimilarity_matrix(d: &[Vec<f64>]) -> Result<()> {
    let m = d.len();
    if m == 0 {
        return Err(Error::EmptyMatrix);
    }
    for (row, values) in d.iter().enumerate() {
        if values.len() != m {
            return Err(Error::NotSquare {
                row,
                found: values.len(),
                expected: m,
            });
        }
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite {
                row,
                col,
                value: values[col],
            });
        }
    }

    let sum: f64 = d.iter().flat_map(|row| row.iter()).sum();
    let tolerance = sum / (m * m) as f64 * DOUBLE_TOLERANCE;

    for (i, row) in d.iter().enumerate() {
        if row[i] > tolerance {
            return Err(Error::NotReflexive {
                index: i,
                value: row[i],
            });
        }
    }

    for i in 0..m {
        for j in (i + 1)..m {
            if (d[i][j] - d[j][i]).abs() > tolerance {
                return Err(Error::NotSymmetric {
                    i,
                    j,
                    upper: d[i][j],
                    lower: d[j][i],
                });
            }
        }
    }
    Ok(())
}

/// Check that `alpha` is a convex combination over `m` data points.
///
/// All entries must be non-negative and sum to 1 within `1e-8`.
pub fn check_convex_row(m: usize, alpha: &[f64]) -> std::result::Result<(), ConvexityViolation> {
    if alpha.len() != m {
        return Err(ConvexityViolation::Length {
            expected: m,
            found: alpha.len(),
        });
    }
    let mut sum = 0.0;
    for (index, &value) in alpha.iter().enumerate() {
        if value < 0.0 {
            return Err(ConvexityViolation::Negative { index, value });
        }
        sum += value;
    }
    if (sum - 1.0).abs() > DOUBLE_TOLERANCE {
        return Err(ConvexityViolation::Sum { sum });
    }
    Ok(())
}

/// Check that `alpha` holds one convex combination over `m` points for
/// each of `k` prototypes.
pub fn check_convex_coefficients(m: usize, k: usize, alpha: &[Vec<f64>]) -> Result<()> {
    if alpha.len() != k {
        return Err(Error::PrototypeCount {
            expected: k,
            found: alpha.len(),
        });
    }
    for (prototype, row) in alpha.iter().enumerate() {
        check_convex_row(m, row)
            .map_err(|source| Error::PrototypeNotConvex { prototype, source })?;
    }
    Ok(())
}

/// Check that `dp` is a non-empty matrix whose rows all have the same length.
///
/// Used for data-to-prototype distances and for query-to-training
/// dissimilarities, neither of which needs to be square.
pub fn check_distances_to_prototypes(dp: &[Vec<f64>]) -> Result<()> {
    let Some(first) = dp.first() else {
        return Err(Error::EmptyMatrix);
    };
    let expected = first.len();
    for (row, values) in dp.iter().enumerate().skip(1) {
        if values.len() != expected {
            return Err(Error::RaggedRows {
                row,
                found: values.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Check that `assignments` maps each of `n_points` points to one of
/// `n_clusters` clusters.
pub fn check_assignments(n_points: usize, n_clusters: usize, assignments: &[usize]) -> Result<()> {
    if assignments.len() != n_points {
        return Err(Error::DimensionMismatch {
            what: "assignments",
            expected: n_points,
            found: assignments.len(),
        });
    }
    for (point, &cluster) in assignments.iter().enumerate() {
        if cluster >= n_clusters {
            return Err(Error::InvalidAssignment {
                point,
                cluster,
                n_clusters,
            });
        }
    }
    Ok(())
}
