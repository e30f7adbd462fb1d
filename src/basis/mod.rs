//! Polynomial basis representations.
//!
//! This module provides:
//! - `LobattoLegendreBasis`, the nodal basis bundle consumed by the solver
//! - `Vandermonde` for nodal-modal transformations

mod lobatto_legendre;
mod vandermonde;

pub use lobatto_legendre::{LobattoLegendreBasis, MAX_POLYNOMIAL_DEGREE};
pub use vandermonde::Vandermonde;
