//! Batch relational neural gas training.
//!
//! # The Algorithm
//!
//! Each prototype starts as a random convex combination of the data. Every
//! epoch then:
//!
//! 1. computes λ from the annealing schedule,
//! 2. computes relational distances `Dp` from the current coefficients,
//! 3. ranks prototypes per point and turns ranks into soft weights `H`,
//! 4. replaces each prototype by the `H`-weighted mean of the data:
//!
//! ```text
//! α_ki = H[k][i] / Σ_j H[k][j]
//! ```
//!
//! With λ large every prototype is pulled toward every point, which avoids
//! the dead units of k-means; as λ shrinks to 0.01 the update becomes a
//! crisp k-means step.
//!
//! # Failure Modes
//!
//! - **Non-Euclidean D**: distances may come out negative; training still
//!   runs, but prototypes lose their geometric meaning.
//! - **Unreached prototype**: once `max_rank < K` a prototype can fall out of
//!   every point's window. Its coefficients are then left unchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::check::check_dissimilarity_matrix;
use crate::error::{Error, Result};
use crate::model::{argmin, Model, TrainingHistory};
use crate::ranking::{soft_assignments_unchecked, RankWeights};
use crate::relational::{distances_unchecked, normalization_terms_unchecked};
use crate::schedule::lambda;
use crate::DEFAULT_EPOCHS;

/// Relational neural gas configuration.
///
/// # Example
///
/// ```rust
/// use relgas::NeuralGas;
///
/// // Two groups on a line: {0, 0.1} and {5, 5.1}.
/// let x = [0.0_f64, 0.1, 5.0, 5.1];
/// let d: Vec<Vec<f64>> = x
///     .iter()
///     .map(|a| x.iter().map(|b| (a - b).abs()).collect())
///     .collect();
///
/// let model = NeuralGas::new(2).with_seed(7).fit(&d).unwrap();
/// let labels = model.assignments();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct NeuralGas {
    /// Number of prototypes K.
    n_prototypes: usize,
    /// Number of epochs T.
    n_epochs: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl NeuralGas {
    /// Create a configuration with `n_prototypes` prototypes and
    /// [`DEFAULT_EPOCHS`] epochs.
    pub fn new(n_prototypes: usize) -> Self {
        Self {
            n_prototypes,
            n_epochs: DEFAULT_EPOCHS,
            seed: None,
        }
    }

    /// Set number of epochs.
    pub fn with_epochs(mut self, n_epochs: usize) -> Self {
        self.n_epochs = n_epochs;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of prototypes.
    pub fn n_prototypes(&self) -> usize {
        self.n_prototypes
    }

    /// Number of epochs.
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    /// Train on dissimilarity matrix `d`.
    ///
    /// Uses the configured seed, or the thread-local generator when none is set.
    pub fn fit(&self, d: &[Vec<f64>]) -> Result<Model> {
        match self.seed {
            Some(seed) => self.fit_with_rng(d, &mut StdRng::seed_from_u64(seed)),
            None => self.fit_with_rng(d, &mut rand::rng()),
        }
    }

    /// Train and return the nearest prototype of every training point.
    pub fn fit_predict(&self, d: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self.fit(d)?.assignments())
    }

    /// Train on dissimilarity matrix `d`, drawing the initial coefficients
    /// from `rng`.
    ///
    /// # Errors
    ///
    /// Fails before any numeric work if `d` is not a valid dissimilarity
    /// matrix or if K or T is zero.
    pub fn fit_with_rng<R: Rng + ?Sized>(&self, d: &[Vec<f64>], rng: &mut R) -> Result<Model> {
        check_dissimilarity_matrix(d)?;
        if self.n_prototypes == 0 {
            return Err(Error::InvalidParameter {
                name: "n_prototypes",
                message: "must be > 0",
            });
        }
        if self.n_epochs == 0 {
            return Err(Error::InvalidParameter {
                name: "n_epochs",
                message: "must be > 0",
            });
        }

        let m = d.len();
        let k = self.n_prototypes;
        let t_max = self.n_epochs;
        tracing::debug!(
            n_points = m,
            n_prototypes = k,
            n_epochs = t_max,
            "starting relational neural gas"
        );

        let mut alpha = random_convex_coefficients(k, m, rng);
        let mut errors = vec![0.0; t_max + 1];

        for epoch in 0..t_max {
            let range = lambda(epoch, k, t_max)?;
            let weights = RankWeights::new(range, k)?;

            let z = normalization_terms_unchecked(d, &alpha);
            let dp = distances_unchecked(d, &alpha, &z);
            let h = soft_assignments_unchecked(&dp, &weights);
            errors[epoch] = update_prototypes(&mut alpha, &h, &dp);

            tracing::debug!(
                epoch,
                lambda = range,
                max_rank = weights.max_rank(),
                error = errors[epoch],
                "epoch complete"
            );
        }

        let z = normalization_terms_unchecked(d, &alpha);
        let dp = distances_unchecked(d, &alpha, &z);
        errors[t_max] = dp
            .iter()
            .map(|row| argmin(row).map_or(0.0, |best| row[best]))
            .sum();

        tracing::info!(
            n_prototypes = k,
            n_epochs = t_max,
            quantization_error = errors[t_max],
            "relational neural gas trained"
        );

        Ok(Model::trained(alpha, dp, z, TrainingHistory::new(errors)))
    }
}

/// Train `n_prototypes` prototypes for `n_epochs` epochs on `d`, drawing the
/// initial coefficients from `rng`.
///
/// Shorthand for `NeuralGas::new(n_prototypes).with_epochs(n_epochs).fit_with_rng(d, rng)`.
pub fn train<R: Rng + ?Sized>(
    d: &[Vec<f64>],
    n_prototypes: usize,
    n_epochs: usize,
    rng: &mut R,
) -> Result<Model> {
    NeuralGas::new(n_prototypes)
        .with_epochs(n_epochs)
        .fit_with_rng(d, rng)
}

/// Uniform draws renormalized per row. Not uniform on the simplex, but
/// always a valid convex combination.
fn random_convex_coefficients<R: Rng + ?Sized>(k: usize, m: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..k)
        .map(|_| {
            let mut row: Vec<f64> = (0..m).map(|_| rng.random::<f64>()).collect();
            let total: f64 = row.iter().sum();
            for a in &mut row {
                *a /= total;
            }
            row
        })
        .collect()
}

/// Overwrite `alpha` with the `H`-weighted means and return the soft
/// quantization error `Σ_ki H[k][i] · Dp[i][k]`.
fn update_prototypes(alpha: &mut [Vec<f64>], h: &[Vec<f64>], dp: &[Vec<f64>]) -> f64 {
    let mut error = 0.0;
    for (k, (alpha_k, h_k)) in alpha.iter_mut().zip(h).enumerate() {
        let mut total = 0.0;
        for (i, &h_ki) in h_k.iter().enumerate() {
            if h_ki == 0.0 {
                continue;
            }
            total += h_ki;
            error += h_ki * dp[i][k];
        }
        if total == 0.0 {
            tracing::warn!(prototype = k, "prototype received no assignments, keeping it");
            continue;
        }
        for (a, &h_ki) in alpha_k.iter_mut().zip(h_k) {
            *a = h_ki / total;
        }
    }
    error
}
