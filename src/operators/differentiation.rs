//! Differentiation matrices for nodal DG on Lobatto nodes.
//!
//! The differentiation matrix D maps nodal values to derivative values:
//! (du/dr)_i = Σ_j D[i,j] * u_j
//!
//! Computed as D = Vr * V^{-1} where:
//! - V[i,j] = φ_j(r_i) is the Vandermonde matrix
//! - Vr[i,j] = φ'_j(r_i) is the derivative Vandermonde matrix
//!
//! Two derived operators drive the volume integrals:
//! - weak form: D̂ = -M^{-1} * D^T * M
//! - split form: D_split = 2D - M^{-1} * B, with B = diag(-1, 0, ..., 0, 1)
//!
//! D_split has a zero diagonal, so flux differencing never evaluates a
//! two-point flux of a node with itself.

use faer::Mat;

use crate::basis::Vandermonde;

/// Compute the differentiation matrix D = Vr * V^{-1}.
pub fn differentiation_matrix(vander: &Vandermonde) -> Mat<f64> {
    let n = vander.n_nodes();
    let mut dr = Mat::zeros(n, n);

    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += vander.vr[(i, k)] * vander.v_inv[(k, j)];
            }
            dr[(i, j)] = sum;
        }
    }

    dr
}

/// Weak-form derivative operator D̂ = -M^{-1} * D^T * M.
///
/// For the diagonal mass matrix M = diag(w):
/// D̂[i,j] = -(w_j / w_i) * D[j,i]
pub fn weak_form_matrix(dr: &Mat<f64>, weights: &[f64]) -> Mat<f64> {
    let n = dr.nrows();
    let mut dhat = Mat::zeros(n, n);

    for i in 0..n {
        for j in 0..n {
            dhat[(i, j)] = -(weights[j] / weights[i]) * dr[(j, i)];
        }
    }

    dhat
}

/// Split-form derivative operator D_split = 2D - M^{-1} * B.
pub fn split_form_matrix(dr: &Mat<f64>, weights: &[f64]) -> Mat<f64> {
    let n = dr.nrows();
    let mut dsplit = Mat::zeros(n, n);

    for i in 0..n {
        for j in 0..n {
            dsplit[(i, j)] = 2.0 * dr[(i, j)];
        }
    }
    dsplit[(0, 0)] += 1.0 / weights[0];
    dsplit[(n - 1, n - 1)] -= 1.0 / weights[n - 1];

    dsplit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::{gauss_lobatto_nodes, gauss_lobatto_weights};

    fn setup(degree: usize) -> (Vec<f64>, Vec<f64>, Mat<f64>) {
        let nodes = gauss_lobatto_nodes(degree);
        let weights = gauss_lobatto_weights(degree, &nodes);
        let vander = Vandermonde::new(degree, &nodes).unwrap();
        let dr = differentiation_matrix(&vander);
        (nodes, weights, dr)
    }

    fn apply(m: &Mat<f64>, u: &[f64]) -> Vec<f64> {
        (0..m.nrows())
            .map(|i| (0..m.ncols()).map(|j| m[(i, j)] * u[j]).sum())
            .collect()
    }

    #[test]
    fn test_differentiation_polynomial_exactness() {
        // D should exactly differentiate polynomials up to degree N
        let degree = 4;
        let (nodes, _, dr) = setup(degree);

        for k in 0..=degree {
            let u: Vec<f64> = nodes.iter().map(|&x| x.powi(k as i32)).collect();
            let du = apply(&dr, &u);

            for (i, (&d, &x)) in du.iter().zip(&nodes).enumerate() {
                let expected = if k == 0 { 0.0 } else { k as f64 * x.powi(k as i32 - 1) };
                assert!(
                    (d - expected).abs() < 1e-11,
                    "Degree {k}: derivative at node {i} should be {expected}, got {d}"
                );
            }
        }
    }

    #[test]
    fn test_split_form_has_zero_diagonal() {
        for degree in 1..=7 {
            let (_, weights, dr) = setup(degree);
            let dsplit = split_form_matrix(&dr, &weights);
            for i in 0..=degree {
                assert!(
                    dsplit[(i, i)].abs() < 1e-11,
                    "degree {degree}: D_split[{i},{i}] = {}",
                    dsplit[(i, i)]
                );
            }
        }
    }

    #[test]
    fn test_split_form_summation_by_parts() {
        // M D_split is skew-symmetric: w_i S_ij = -w_j S_ji
        let degree = 5;
        let (_, weights, dr) = setup(degree);
        let dsplit = split_form_matrix(&dr, &weights);
        for i in 0..=degree {
            for j in 0..=degree {
                let lhs = weights[i] * dsplit[(i, j)];
                let rhs = -weights[j] * dsplit[(j, i)];
                assert!((lhs - rhs).abs() < 1e-11, "SBP violated at ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_weak_form_columns_sum_to_boundary_terms() {
        // Σ_i w_i D̂[i,j] = -Σ_i w_j D[j,i] = 0 for every column j (D annihilates constants)
        let degree = 3;
        let (_, weights, dr) = setup(degree);
        let dhat = weak_form_matrix(&dr, &weights);
        for j in 0..=degree {
            let sum: f64 = (0..=degree).map(|i| weights[i] * dhat[(i, j)]).sum();
            assert!(sum.abs() < 1e-12, "column {j} of M D̂ sums to {sum}");
        }
    }
}
