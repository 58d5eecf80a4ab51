//! Annealing schedule for the neighborhood range λ.
//!
//! λ starts at `K / 2`, so early epochs pull every prototype toward every
//! point, and decays geometrically to [`FINAL_LAMBDA`] in the last epoch,
//! where only the nearest prototype receives non-negligible weight.

use crate::error::{Error, Result};
use crate::FINAL_LAMBDA;

/// Neighborhood range λ for epoch `epoch` of `n_epochs`, with `n_prototypes`
/// prototypes.
///
/// ```text
/// λ(t) = λ₀ · (0.01 / λ₀)^(t / (T - 1)),   λ₀ = K / 2
/// ```
///
/// The endpoints are exact: the last epoch `T - 1` returns `0.01` (this wins
/// when `T == 1`), and epoch 0 returns `K / 2`.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `n_prototypes` or `n_epochs` is zero.
///
/// # Example
///
/// ```rust
/// use relgas::lambda;
///
/// assert_eq!(lambda(0, 4, 10).unwrap(), 2.0);
/// assert_eq!(lambda(9, 4, 10).unwrap(), 0.01);
/// assert!(lambda(5, 4, 10).unwrap() < lambda(4, 4, 10).unwrap());
/// ```
pub fn lambda(epoch: usize, n_prototypes: usize, n_epochs: usize) -> Result<f64> {
    if n_epochs == 0 {
        return Err(Error::InvalidParameter {
            name: "n_epochs",
            message: "must be > 0",
        });
    }
    if n_prototypes == 0 {
        return Err(Error::InvalidParameter {
            name: "n_prototypes",
            message: "must be > 0",
        });
    }
    if epoch == n_epochs - 1 {
        return Ok(FINAL_LAMBDA);
    }
    let lambda_0 = n_prototypes as f64 / 2.0;
    if epoch == 0 {
        return Ok(lambda_0);
    }
    let progress = epoch as f64 / (n_epochs - 1) as f64;
    Ok(lambda_0 * (FINAL_LAMBDA / lambda_0).powf(progress))
}
