//! Building dissimilarity matrices from vector data.
//!
//! Training only ever sees dissimilarities. When the data does have
//! coordinates (tests, demos, or a metric computed upstream), these helpers
//! produce the `m × m` training matrix and the `n × m` query matrix.

/// A symmetric distance metric.
///
/// This is an interface only; implementations decide their own numeric behavior.
pub trait SymmetricMetric<T> {
    /// Compute the (symmetric) distance between `a` and `b`.
    fn distance(&self, a: &[T], b: &[T]) -> T;
}

/// Euclidean distance `sqrt(Σ(a[i] - b[i])²)`.
///
/// Relational distances built on this metric equal true squared Euclidean
/// distances to the prototype means.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

/// Squared Euclidean distance `Σ(a[i] - b[i])²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredEuclidean;

/// Manhattan distance `Σ|a[i] - b[i]|`; equals [`Euclidean`] in one dimension.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl SymmetricMetric<f64> for SquaredEuclidean {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }
}

impl SymmetricMetric<f64> for Euclidean {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        SquaredEuclidean.distance(a, b).sqrt()
    }
}

impl SymmetricMetric<f64> for Manhattan {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// Pairwise dissimilarity matrix of `points` under `metric`.
///
/// Only the upper triangle is computed; the result is exactly symmetric with
/// a zero diagonal.
///
/// # Example
///
/// ```rust
/// use relgas::{pairwise, Euclidean};
///
/// let points = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
/// let d = pairwise(&points, &Euclidean);
/// assert_eq!(d, vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
/// ```
pub fn pairwise<M: SymmetricMetric<f64>>(points: &[Vec<f64>], metric: &M) -> Vec<Vec<f64>> {
    let m = points.len();
    let mut d = vec![vec![0.0; m]; m];
    for i in 0..m {
        for j in (i + 1)..m {
            let value = metric.distance(&points[i], &points[j]);
            d[i][j] = value;
            d[j][i] = value;
        }
    }
    d
}

/// Dissimilarities from each query to each training point, `n × m`.
pub fn cross<M: SymmetricMetric<f64>>(
    queries: &[Vec<f64>],
    points: &[Vec<f64>],
    metric: &M,
) -> Vec<Vec<f64>> {
    queries
        .iter()
        .map(|q| points.iter().map(|p| metric.distance(q, p)).collect())
        .collect()
}
