//! L2 mortar operators for 2:1 nonconforming faces.
//!
//! A large face `[-1, 1]` is split into a lower half `[-1, 0]` and an upper
//! half `[0, 1]`, each matching one small neighbor face. Forward operators
//! interpolate a large-face polynomial onto the Lobatto nodes of each half;
//! reverse operators L2-project the two half-face polynomials back onto the
//! large face. The projection is computed exactly on Gauss nodes and mapped
//! to Lobatto nodes by interpolation.

use faer::Mat;

use crate::polynomial::{
    barycentric_weights, gauss_legendre_nodes_weights, interpolation_matrix, lagrange_basis,
};

/// Which half of a large face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Half {
    Lower,
    Upper,
}

impl Half {
    /// Map a reference coordinate of the half face onto the large face.
    #[inline]
    fn to_large(self, xi: f64) -> f64 {
        match self {
            Half::Lower => 0.5 * (xi - 1.0),
            Half::Upper => 0.5 * (xi + 1.0),
        }
    }
}

/// Forward and reverse mortar operators shared by every mortar of a basis.
#[derive(Clone)]
pub struct MortarL2 {
    /// Large face → upper half: `P_u[i,j] = ℓ_j((ξ_i + 1)/2)`
    pub forward_upper: Mat<f64>,
    /// Large face → lower half: `P_l[i,j] = ℓ_j((ξ_i - 1)/2)`
    pub forward_lower: Mat<f64>,
    /// Upper half → large face (L2 projection)
    pub reverse_upper: Mat<f64>,
    /// Lower half → large face (L2 projection)
    pub reverse_lower: Mat<f64>,
}

impl MortarL2 {
    /// Build the operators for the Lobatto nodes `nodes`.
    pub fn new(nodes: &[f64]) -> Self {
        Self {
            forward_upper: forward_operator(nodes, Half::Upper),
            forward_lower: forward_operator(nodes, Half::Lower),
            reverse_upper: reverse_operator(nodes, Half::Upper),
            reverse_lower: reverse_operator(nodes, Half::Lower),
        }
    }

    /// Number of face nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.forward_upper.nrows()
    }
}

fn forward_operator(nodes: &[f64], half: Half) -> Mat<f64> {
    let targets: Vec<f64> = nodes.iter().map(|&xi| half.to_large(xi)).collect();
    interpolation_matrix(nodes, &targets)
}

/// `R = I_{G→L} · ½ M_G⁻¹ P_Gᵀ M_G · I_{L→G}`
fn reverse_operator(nodes: &[f64], half: Half) -> Mat<f64> {
    let n = nodes.len();
    let (gauss_nodes, gauss_weights) = gauss_legendre_nodes_weights(n);
    let gauss_barycentric = barycentric_weights(&gauss_nodes);

    // Projection in the Gauss basis: R_G[i,j] = ½ ℓ^G_i(half(ξ_j)) w_j / w_i
    let mut projection = Mat::<f64>::zeros(n, n);
    for j in 0..n {
        let basis = lagrange_basis(half.to_large(gauss_nodes[j]), &gauss_nodes, &gauss_barycentric);
        for i in 0..n {
            projection[(i, j)] = 0.5 * basis[i] * gauss_weights[j] / gauss_weights[i];
        }
    }

    let gauss_to_lobatto = interpolation_matrix(&gauss_nodes, nodes);
    let lobatto_to_gauss = interpolation_matrix(nodes, &gauss_nodes);
    &gauss_to_lobatto * &projection * &lobatto_to_gauss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::{gauss_lobatto_nodes, gauss_lobatto_weights};

    fn apply(m: &Mat<f64>, u: &[f64]) -> Vec<f64> {
        (0..m.nrows())
            .map(|i| (0..m.ncols()).map(|j| m[(i, j)] * u[j]).sum())
            .collect()
    }

    #[test]
    fn test_forward_interpolates_polynomials() {
        let degree = 3;
        let nodes = gauss_lobatto_nodes(degree);
        let mortar = MortarL2::new(&nodes);

        let f = |x: f64| x * x * x - 0.5 * x + 2.0;
        let u: Vec<f64> = nodes.iter().map(|&x| f(x)).collect();
        let upper = apply(&mortar.forward_upper, &u);
        let lower = apply(&mortar.forward_lower, &u);

        for (i, &xi) in nodes.iter().enumerate() {
            assert!((upper[i] - f(0.5 * (xi + 1.0))).abs() < 1e-13);
            assert!((lower[i] - f(0.5 * (xi - 1.0))).abs() < 1e-13);
        }
        // Shared endpoint of the two halves
        assert!((upper[0] - lower[degree]).abs() < 1e-13);
    }

    #[test]
    fn test_reverse_after_forward_is_identity() {
        for degree in 1..=6 {
            let nodes = gauss_lobatto_nodes(degree);
            let mortar = MortarL2::new(&nodes);
            let n = degree + 1;

            let roundtrip = &mortar.reverse_upper * &mortar.forward_upper
                + &mortar.reverse_lower * &mortar.forward_lower;
            for i in 0..n {
                for j in 0..n {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (roundtrip[(i, j)] - expected).abs() < 1e-12,
                        "degree {degree}: (R_u P_u + R_l P_l)[{i},{j}] = {}",
                        roundtrip[(i, j)]
                    );
                }
            }
        }
    }

    #[test]
    fn test_reverse_preserves_weighted_integral() {
        // wᵀ R = ½ wᵀ: each half contributes half of the large-face measure
        for degree in 1..=6 {
            let nodes = gauss_lobatto_nodes(degree);
            let weights = gauss_lobatto_weights(degree, &nodes);
            let mortar = MortarL2::new(&nodes);

            for reverse in [&mortar.reverse_upper, &mortar.reverse_lower] {
                for j in 0..=degree {
                    let lhs: f64 = (0..=degree).map(|i| weights[i] * reverse[(i, j)]).sum();
                    assert!(
                        (lhs - 0.5 * weights[j]).abs() < 1e-12,
                        "degree {degree}, column {j}: {lhs} vs {}",
                        0.5 * weights[j]
                    );
                }
            }
        }
    }
}
