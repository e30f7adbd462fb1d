//! Polynomial evaluation, quadrature nodes and interpolation.
//!
//! This module provides:
//! - 1D Legendre polynomials and their derivatives
//! - Gauss-Lobatto-Legendre nodes and weights (solution nodes)
//! - Gauss-Legendre nodes and weights (exact mortar projection)
//! - Barycentric Lagrange interpolation between node sets

mod interpolation;
mod legendre;
mod nodes;

pub use interpolation::{barycentric_weights, interpolation_matrix, lagrange_basis};
pub use legendre::{legendre, legendre_and_derivative};
pub use nodes::{gauss_legendre_nodes_weights, gauss_lobatto_nodes, gauss_lobatto_weights};
