//! Vandermonde matrix for nodal-modal transformations.
//!
//! The Vandermonde matrix V connects nodal and modal representations:
//! - V[i,j] = φ_j(r_i) where φ_j is the j-th basis polynomial and r_i is the i-th node
//! - nodal_values = V * modal_coeffs
//! - modal_coeffs = V^{-1} * nodal_values
//!
//! Legendre polynomials are normalized so that the modal mass matrix is the
//! identity; the squared modal coefficients then measure the energy in each
//! mode, which is what the shock indicator inspects.

use faer::{Mat, linalg::solvers::Solve};

use crate::error::{DGError, Result};
use crate::polynomial::legendre_and_derivative;

/// Vandermonde matrix and its inverse.
#[derive(Clone)]
pub struct Vandermonde {
    /// Vandermonde matrix: V[i,j] = P_j(r_i) (normalized)
    pub v: Mat<f64>,
    /// Inverse Vandermonde matrix
    pub v_inv: Mat<f64>,
    /// Derivative Vandermonde: Vr[i,j] = P'_j(r_i) (normalized)
    pub vr: Mat<f64>,
    /// Polynomial degree
    pub degree: usize,
}

impl Vandermonde {
    /// Create the Vandermonde matrix for `degree` on `nodes`.
    ///
    /// The basis polynomials are normalized Legendre polynomials:
    /// φ_j(x) = sqrt((2j+1)/2) * P_j(x)
    pub fn new(degree: usize, nodes: &[f64]) -> Result<Self> {
        let n = degree + 1;
        if nodes.len() != n {
            return Err(DGError::dimension_mismatch(
                format!("{n} nodes"),
                format!("{} nodes", nodes.len()),
            ));
        }

        let mut v = Mat::<f64>::zeros(n, n);
        let mut vr = Mat::<f64>::zeros(n, n);

        for (i, &r) in nodes.iter().enumerate() {
            for j in 0..n {
                let norm = ((2 * j + 1) as f64 / 2.0).sqrt();
                let (p, dp) = legendre_and_derivative(j, r);
                v[(i, j)] = norm * p;
                vr[(i, j)] = norm * dp;
            }
        }

        // Solve V * V_inv = I column by column
        let lu = v.as_ref().full_piv_lu();
        let mut v_inv = Mat::<f64>::zeros(n, n);
        for j in 0..n {
            let mut rhs = Mat::<f64>::zeros(n, 1);
            rhs[(j, 0)] = 1.0;
            let col = lu.solve(&rhs);
            for i in 0..n {
                v_inv[(i, j)] = col[(i, 0)];
            }
        }

        if (0..n).any(|i| (0..n).any(|j| !v_inv[(i, j)].is_finite())) {
            return Err(DGError::SingularMatrix(format!(
                "Vandermonde matrix of degree {degree} (repeated nodes?)"
            )));
        }

        Ok(Self {
            v,
            v_inv,
            vr,
            degree,
        })
    }

    /// Number of nodes (and modes).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.degree + 1
    }

    /// Transform nodal values to modal coefficients: `modal = V^{-1} nodal`.
    #[inline]
    pub fn to_modal(&self, nodal: &[f64], modal: &mut [f64]) {
        let n = self.n_nodes();
        for (i, m) in modal.iter_mut().enumerate().take(n) {
            *m = (0..n).map(|j| self.v_inv[(i, j)] * nodal[j]).sum();
        }
    }
}
