//! Trained relational neural gas model and queries on it.

use crate::check::{check_assignments, check_convex_coefficients, check_distances_to_prototypes};
use crate::error::{Error, Result};
use crate::relational::{distances_to_prototypes, distances_to_prototypes_row};

/// Per-epoch quantization errors recorded during training.
///
/// Entry `t < T` is the soft error `Σ_ki H[k][i] · Dp[i][k]` of epoch `t`,
/// measured with the coefficients from before that epoch's update. The last
/// entry is the crisp error `Σ_i min_k Dp[i][k]` of the final model, so it is
/// not on the same scale as the soft entries.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingHistory {
    errors: Vec<f64>,
}

impl TrainingHistory {
    pub(crate) fn new(errors: Vec<f64>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// Number of training epochs `T`.
    pub fn n_epochs(&self) -> usize {
        self.errors.len() - 1
    }

    /// All `T + 1` recorded errors.
    pub fn quantization_errors(&self) -> &[f64] {
        &self.errors
    }

    /// Crisp quantization error of the final model.
    pub fn final_error(&self) -> f64 {
        self.errors[self.errors.len() - 1]
    }
}

/// Prototypes as convex combinations of the training data, plus the derived
/// distances needed to query them.
///
/// Immutable once built. Obtain one from [`crate::NeuralGas::fit`] or, from
/// precomputed parts, [`Model::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    alpha: Vec<Vec<f64>>,
    dp: Vec<Vec<f64>>,
    z: Vec<f64>,
    history: Option<TrainingHistory>,
}

impl Model {
    /// Build a model from convex coefficients `alpha` (`K × m`),
    /// data-to-prototype distances `dp` (`m × K`) and normalization terms `z`
    /// (`K`).
    ///
    /// The model carries no training history.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relgas::{Model, distances_to_prototypes, normalization_terms};
    ///
    /// let d = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    /// let alpha = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    /// let z = normalization_terms(&d, &alpha).unwrap();
    /// let dp = distances_to_prototypes(&d, &alpha, &z).unwrap();
    ///
    /// let model = Model::new(alpha, dp, z).unwrap();
    /// assert_eq!(model.assignments(), vec![0, 1]);
    /// assert!(model.history().is_none());
    /// ```
    pub fn new(alpha: Vec<Vec<f64>>, dp: Vec<Vec<f64>>, z: Vec<f64>) -> Result<Self> {
        check_distances_to_prototypes(&dp)?;
        let m = dp.len();
        let k = dp[0].len();
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "n_prototypes",
                message: "must be > 0",
            });
        }
        check_convex_coefficients(m, k, &alpha)?;
        if z.len() != k {
            return Err(Error::DimensionMismatch {
                what: "normalization terms",
                expected: k,
                found: z.len(),
            });
        }
        Ok(Self {
            alpha,
            dp,
            z,
            history: None,
        })
    }

    pub(crate) fn trained(
        alpha: Vec<Vec<f64>>,
        dp: Vec<Vec<f64>>,
        z: Vec<f64>,
        history: TrainingHistory,
    ) -> Self {
        Self {
            alpha,
            dp,
            z,
            history: Some(history),
        }
    }

    /// Number of training data points `m`.
    pub fn n_points(&self) -> usize {
        self.dp.len()
    }

    /// Number of prototypes `K`.
    pub fn n_prototypes(&self) -> usize {
        self.alpha.len()
    }

    /// Convex coefficients, `K × m`.
    pub fn convex_coefficients(&self) -> &[Vec<f64>] {
        &self.alpha
    }

    /// Squared distances of the training points to the prototypes, `m × K`.
    pub fn distances_to_prototypes(&self) -> &[Vec<f64>] {
        &self.dp
    }

    /// Normalization terms `z_k = -½ α_k D² α_kᵀ`, one per prototype.
    pub fn normalization_terms(&self) -> &[f64] {
        &self.z
    }

    /// Training history, present only for models produced by training.
    pub fn history(&self) -> Option<&TrainingHistory> {
        self.history.as_ref()
    }

    /// Squared distances from new points to the prototypes.
    ///
    /// `d` is `n × m`: dissimilarities of each new point to the training data.
    pub fn distances_to(&self, d: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        distances_to_prototypes(d, &self.alpha, &self.z)
    }

    /// Squared distances from one new point to the prototypes.
    pub fn distances_to_row(&self, d: &[f64]) -> Result<Vec<f64>> {
        distances_to_prototypes_row(d, &self.alpha, &self.z)
    }

    /// Nearest prototype of every training point. Ties go to the lower index.
    pub fn assignments(&self) -> Vec<usize> {
        self.dp.iter().map(|row| argmin(row).unwrap_or(0)).collect()
    }

    /// Nearest prototype for each new point given its dissimilarities to the
    /// training data (`n × m`).
    pub fn classify(&self, d: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self
            .distances_to(d)?
            .iter()
            .map(|row| argmin(row).unwrap_or(0))
            .collect())
    }

    /// Nearest prototype for a single new point.
    pub fn classify_one(&self, d: &[f64]) -> Result<usize> {
        Ok(argmin(&self.distances_to_row(d)?).unwrap_or(0))
    }

    /// Training points assigned to prototype `k`, in ascending order.
    ///
    /// Empty if `k` is out of range.
    pub fn cluster_members(&self, k: usize) -> Vec<usize> {
        members_of(&self.assignments(), k)
    }

    /// Members of every cluster, indexed by prototype.
    pub fn all_cluster_members(&self) -> Vec<Vec<usize>> {
        let assignments = self.assignments();
        (0..self.n_prototypes())
            .map(|k| members_of(&assignments, k))
            .collect()
    }

    /// Members of cluster `k` under a caller-supplied assignment vector,
    /// e.g. one already computed by [`Model::assignments`].
    pub fn cluster_members_from(&self, k: usize, assignments: &[usize]) -> Result<Vec<usize>> {
        check_assignments(self.n_points(), self.n_prototypes(), assignments)?;
        Ok(members_of(assignments, k))
    }

    /// For each prototype, the training point closest to it.
    ///
    /// Ties go to the lower point index.
    pub fn exemplars(&self) -> Vec<usize> {
        (0..self.n_prototypes())
            .map(|k| {
                let mut best = 0;
                for (i, row) in self.dp.iter().enumerate().skip(1) {
                    if row[k] < self.dp[best][k] {
                        best = i;
                    }
                }
                best
            })
            .collect()
    }
}

fn members_of(assignments: &[usize], k: usize) -> Vec<usize> {
    assignments
        .iter()
        .enumerate()
        .filter(|(_, &a)| a == k)
        .map(|(i, _)| i)
        .collect()
}

/// Index of the smallest value; the first one wins on ties.
///
/// Returns `None` for an empty slice.
///
/// # Example
///
/// ```rust
/// use relgas::argmin;
///
/// assert_eq!(argmin(&[3.0, 1.0, 1.0]), Some(1));
/// assert_eq!(argmin(&[]), None);
/// ```
pub fn argmin(values: &[f64]) -> Option<usize> {
    let (first, rest) = values.split_first()?;
    let mut best = 0;
    let mut min = *first;
    for (i, &v) in rest.iter().enumerate() {
        if v < min {
            best = i + 1;
            min = v;
        }
    }
    Some(best)
}
