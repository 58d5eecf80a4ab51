//! Error types for relational neural gas.
//!
//! Every error is a precondition failure detected before numeric work
//! starts. Once training has passed validation, no further errors occur.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single coefficient row is not a convex combination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvexityViolation {
    /// Row length differs from the number of data points.
    #[error("expected coefficients for {expected} data points, got {found}")]
    Length {
        /// Number of data points.
        expected: usize,
        /// Row length found.
        found: usize,
    },

    /// A coefficient is negative.
    #[error("entry {index} is negative ({value})")]
    Negative {
        /// Offending column.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Coefficients do not sum to one.
    #[error("coefficients sum to {sum}, not 1")]
    Sum {
        /// Actual sum.
        sum: f64,
    },
}

/// Errors raised by validation at public entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Matrix has no rows.
    #[error("matrix is empty")]
    EmptyMatrix,

    /// A row of a square matrix has the wrong number of columns.
    #[error("row {row} has {found} columns, expected {expected} (matrix must be square)")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Columns found.
        found: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },

    /// Rows of a rectangular matrix have inconsistent lengths.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        /// Offending row.
        row: usize,
        /// Columns found.
        found: usize,
        /// Columns of row 0.
        expected: usize,
    },

    /// An entry is NaN or infinite.
    #[error("entry ({row}, {col}) is not finite ({value})")]
    NonFinite {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// A diagonal entry is not (approximately) zero.
    #[error("matrix is not reflexive: entry ({index}, {index}) is {value}")]
    NotReflexive {
        /// Diagonal index.
        index: usize,
        /// Diagonal value.
        value: f64,
    },

    /// Entries `(i, j)` and `(j, i)` differ beyond tolerance.
    #[error("matrix is not symmetric: entry ({i}, {j}) = {upper} but ({j}, {i}) = {lower}")]
    NotSymmetric {
        /// Row of the upper-triangle entry.
        i: usize,
        /// Column of the upper-triangle entry.
        j: usize,
        /// Value at `(i, j)`.
        upper: f64,
        /// Value at `(j, i)`.
        lower: f64,
    },

    /// A single coefficient vector is invalid.
    #[error("not a convex combination: {0}")]
    NotConvex(#[from] ConvexityViolation),

    /// Row `prototype` of the coefficient matrix is invalid.
    #[error("coefficients of prototype {prototype} are not a convex combination")]
    PrototypeNotConvex {
        /// Offending prototype.
        prototype: usize,
        /// Per-row violation.
        #[source]
        source: ConvexityViolation,
    },

    /// Coefficient matrix has the wrong number of rows.
    #[error("expected coefficients for {expected} prototypes, got {found} rows")]
    PrototypeCount {
        /// Number of prototypes.
        expected: usize,
        /// Rows found.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Constraint that was violated.
        message: &'static str,
    },

    /// Vector or row length disagrees with the model.
    #[error("{what}: expected length {expected}, got {found}")]
    DimensionMismatch {
        /// Which input was checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// An assignment refers to a cluster that does not exist.
    #[error("data point {point} is assigned to cluster {cluster}, but there are {n_clusters} clusters")]
    InvalidAssignment {
        /// Data point index.
        point: usize,
        /// Assigned cluster.
        cluster: usize,
        /// Number of clusters.
        n_clusters: usize,
    },
}
