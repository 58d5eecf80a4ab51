//! Relational neural gas: prototype clustering from pairwise dissimilarities.
//!
//! `relgas` clusters data that is known only through a matrix of pairwise
//! dissimilarities `D`. No coordinates are needed: each prototype is a convex
//! combination of the data points, and its distance to any point is recovered
//! from `D` alone.
//!
//! - **Training**: [`NeuralGas`] (batch neural gas with annealed ranks), [`train`]
//! - **Distances**: [`normalization_terms`], [`distances_to_prototypes`]
//! - **Queries**: [`Model::assignments`], [`Model::classify`],
//!   [`Model::cluster_members`], [`Model::exemplars`]
//! - **Validation**: [`check_dissimilarity_matrix`], [`check_convex_coefficients`]
//!
//! # Relational Distances
//!
//! For Euclidean data, the squared distance from point `x` to a prototype
//! `w = Σ_i α_i x_i` satisfies
//!
//! ```text
//! ‖x - w‖² = Σ_i α_i d(x, x_i)²  -  ½ Σ_ij α_i α_j d(x_i, x_j)²
//! ```
//!
//! which mentions only dissimilarities. Relational neural gas applies this
//! formula to arbitrary symmetric dissimilarities.
//!
//! # Historical Context
//!
//! Neural gas (Martinetz & Schulten, 1991) ranks all prototypes per data point
//! instead of updating only the winner, which makes it far less sensitive to
//! initialization than k-means. Hammer & Hasenfuss (2007) carried the batch
//! variant over to relational data via the convex-combination trick above.
//!
//! # Example
//!
//! ```rust
//! use relgas::{pairwise, Euclidean, NeuralGas};
//!
//! let points = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//! let d = pairwise(&points, &Euclidean);
//!
//! let model = NeuralGas::new(2).with_epochs(20).with_seed(42).fit(&d).unwrap();
//! let labels = model.assignments();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//! ```
//!
//! # References
//!
//! - Martinetz, T., Schulten, K. (1991). "A 'Neural-Gas' Network Learns Topologies"
//! - Cottrell, M., Hammer, B., Hasenfuss, A., Villmann, T. (2006). "Batch and median neural gas"
//! - Hammer, B., Hasenfuss, A. (2007). "Relational Neural Gas"

#![warn(missing_docs)]
#![warn(clippy::all)]

mod check;
mod error;
mod gas;
mod metric;
mod model;
mod ranking;
mod relational;
mod schedule;

pub use check::{
    check_assignments, check_convex_coefficients, check_convex_row, check_dissimilarity_matrix,
    check_distances_to_prototypes,
};
pub use error::{ConvexityViolation, Error, Result};
pub use gas::{train, NeuralGas};
pub use metric::{cross, pairwise, Euclidean, Manhattan, SquaredEuclidean, SymmetricMetric};
pub use model::{argmin, Model, TrainingHistory};
pub use ranking::{nearest_prototypes, soft_assignments, RankWeights};
pub use relational::{
    distances_to_prototypes, distances_to_prototypes_row, normalization_terms, weighted_square_sum,
};
pub use schedule::lambda;

/// Absolute tolerance for convex coefficient sums, and the relative tolerance
/// (scaled by the mean entry) for the diagonal and symmetry checks on `D`.
pub const DOUBLE_TOLERANCE: f64 = 1e-8;

/// Rank weights below this value are treated as exactly zero.
///
/// A rank `r` is dropped once `r / λ > -ln(NEGLIGIBLE_WEIGHT)`.
pub const NEGLIGIBLE_WEIGHT: f64 = 1e-3;

/// Neighborhood range λ of the last epoch.
pub const FINAL_LAMBDA: f64 = 0.01;

/// Number of epochs used by [`NeuralGas::new`].
pub const DEFAULT_EPOCHS: usize = 30;
