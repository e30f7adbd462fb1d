//! DG operators on Lobatto nodes.
//!
//! This module provides:
//! - Differentiation matrix and its weak-form and split-form variants
//! - L2 mortar forward/reverse operators for 2:1 nonconforming faces

mod differentiation;
mod mortar;

pub use differentiation::{differentiation_matrix, split_form_matrix, weak_form_matrix};
pub use mortar::MortarL2;
