//! Nodal Lobatto-Legendre basis with all operators the DG stages consume.

use faer::Mat;

use crate::error::{DGError, Result};
use crate::operators::{MortarL2, differentiation_matrix, split_form_matrix, weak_form_matrix};
use crate::polynomial::{gauss_lobatto_nodes, gauss_lobatto_weights};

use super::Vandermonde;

/// Highest supported polynomial degree.
pub const MAX_POLYNOMIAL_DEGREE: usize = 15;

/// Tensor-product nodal basis on Gauss-Lobatto-Legendre nodes.
///
/// One-dimensional operators are applied line by line in both directions,
/// so everything here is a `K × K` matrix or a length-`K` vector with
/// `K = degree + 1`.
#[derive(Clone)]
pub struct LobattoLegendreBasis {
    /// Polynomial degree
    pub degree: usize,
    /// Reference nodes in [-1, 1], ascending
    pub nodes: Vec<f64>,
    /// Quadrature weights
    pub weights: Vec<f64>,
    /// Reciprocal quadrature weights
    pub inverse_weights: Vec<f64>,
    /// Differentiation matrix D
    pub derivative_matrix: Mat<f64>,
    /// Weak-form operator D̂ = -M^{-1} D^T M
    pub derivative_dhat: Mat<f64>,
    /// Split-form operator 2D - M^{-1} B (zero diagonal)
    pub derivative_split: Mat<f64>,
    /// Surface weights `[1/w_0, 1/w_{K-1}]` for the "−" and "+" faces
    pub boundary_interpolation: [f64; 2],
    /// Nodal-modal transform
    pub vandermonde: Vandermonde,
    /// 2:1 mortar operators
    pub mortar: MortarL2,
}

impl LobattoLegendreBasis {
    /// Build the basis and its operators for `degree`.
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 || degree > MAX_POLYNOMIAL_DEGREE {
            return Err(DGError::InvalidPolynomialDegree {
                degree,
                max: MAX_POLYNOMIAL_DEGREE,
            });
        }

        let nodes = gauss_lobatto_nodes(degree);
        let weights = gauss_lobatto_weights(degree, &nodes);
        let inverse_weights: Vec<f64> = weights.iter().map(|w| 1.0 / w).collect();

        let vandermonde = Vandermonde::new(degree, &nodes)?;
        let derivative_matrix = differentiation_matrix(&vandermonde);
        let derivative_dhat = weak_form_matrix(&derivative_matrix, &weights);
        let derivative_split = split_form_matrix(&derivative_matrix, &weights);
        let boundary_interpolation = [inverse_weights[0], inverse_weights[degree]];
        let mortar = MortarL2::new(&nodes);

        Ok(Self {
            degree,
            nodes,
            weights,
            inverse_weights,
            derivative_matrix,
            derivative_dhat,
            derivative_split,
            boundary_interpolation,
            vandermonde,
            mortar,
        })
    }

    /// Number of nodes per direction, `K`.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.degree + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_bounds() {
        assert!(matches!(
            LobattoLegendreBasis::new(0),
            Err(DGError::InvalidPolynomialDegree { degree: 0, .. })
        ));
        assert!(LobattoLegendreBasis::new(MAX_POLYNOMIAL_DEGREE + 1).is_err());
        assert!(LobattoLegendreBasis::new(1).is_ok());
    }

    #[test]
    fn test_boundary_interpolation_matches_end_weights() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        assert_eq!(basis.n_nodes(), 4);
        // Symmetric nodes: both faces weigh 1/w_0 = 6
        assert!((basis.boundary_interpolation[0] - 6.0).abs() < 1e-12);
        assert!((basis.boundary_interpolation[1] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_weak_and_split_agree_on_constant_flux() {
        // For a constant flux f, Σ_source D̂[t,s] f = surface terms only,
        // and Σ_source D_split[t,s] f = boundary correction only.
        let basis = LobattoLegendreBasis::new(4).unwrap();
        let k = basis.n_nodes();
        for t in 1..k - 1 {
            let weak: f64 = (0..k).map(|s| basis.derivative_dhat[(t, s)]).sum();
            let split: f64 = (0..k).map(|s| basis.derivative_split[(t, s)]).sum();
            assert!(weak.abs() < 1e-11, "interior weak-form row {t} sums to {weak}");
            assert!(split.abs() < 1e-11, "interior split-form row {t} sums to {split}");
        }
    }
}
