//! Error types for setup-time operations.
//!
//! Evaluating the right-hand side never returns an error: topology and
//! buffer shapes are fixed when the cache is built, and anything that could
//! go wrong is rejected here instead.

use thiserror::Error;

use crate::types::Direction;

/// Errors raised while building bases, meshes, caches and execution pools.
#[derive(Error, Debug)]
pub enum DGError {
    /// Polynomial degree outside the supported range.
    #[error("Invalid polynomial degree {degree}: must be between 1 and {max}")]
    InvalidPolynomialDegree { degree: usize, max: usize },

    /// A leaf neighbors a cell more than one refinement level away.
    #[error("Unbalanced refinement at element {element} ({direction}): only 2:1 faces are supported")]
    UnbalancedRefinement { element: usize, direction: Direction },

    /// Mesh description is inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// An element face is claimed by more than one interface, boundary or mortar.
    #[error("Element {element} face {direction} has more than one owner")]
    DuplicateFaceOwner { element: usize, direction: Direction },

    /// An element face is not covered by any interface, boundary or mortar.
    #[error("Element {element} face {direction} has no owner")]
    MissingFaceOwner { element: usize, direction: Direction },

    /// Dimension mismatch between a solution and the cache it is used with.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Invalid solver or indicator configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A matrix that must be invertible is singular.
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Worker pool could not be created.
    #[cfg(feature = "parallel")]
    #[error("Thread pool construction failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl DGError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DGError>;
