//! Barycentric Lagrange interpolation.
//!
//! Nodal polynomials are evaluated with the second (true) barycentric form,
//! which is stable for any distinct node set and exact at the nodes.

use faer::Mat;

/// Barycentric weights `λ_j = 1 / Π_{k≠j} (x_j - x_k)`.
pub fn barycentric_weights(nodes: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    let mut weights = vec![1.0; n];
    for j in 1..n {
        for k in 0..j {
            weights[k] *= nodes[k] - nodes[j];
            weights[j] *= nodes[j] - nodes[k];
        }
    }
    weights.iter().map(|w| 1.0 / w).collect()
}

/// Values of all Lagrange basis polynomials `ℓ_j(x)` of `nodes` at `x`.
pub fn lagrange_basis(x: f64, nodes: &[f64], barycentric: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    let mut values = vec![0.0; n];

    // Exactly on a node: Kronecker delta
    if let Some(j) = nodes.iter().position(|&xj| (x - xj).abs() < f64::EPSILON) {
        values[j] = 1.0;
        return values;
    }

    let mut total = 0.0;
    for j in 0..n {
        values[j] = barycentric[j] / (x - nodes[j]);
        total += values[j];
    }
    for v in &mut values {
        *v /= total;
    }
    values
}

/// Matrix `I[i, j] = ℓ_j(to[i])` interpolating nodal values on `from` onto
/// the points `to`.
pub fn interpolation_matrix(from: &[f64], to: &[f64]) -> Mat<f64> {
    let barycentric = barycentric_weights(from);
    let mut matrix = Mat::zeros(to.len(), from.len());
    for (i, &x) in to.iter().enumerate() {
        for (j, l) in lagrange_basis(x, from, &barycentric).into_iter().enumerate() {
            matrix[(i, j)] = l;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::{gauss_legendre_nodes_weights, gauss_lobatto_nodes};

    #[test]
    fn test_partition_of_unity() {
        let nodes = gauss_lobatto_nodes(4);
        let bary = barycentric_weights(&nodes);
        for &x in &[-0.93, -0.1, 0.35, 0.77] {
            let sum: f64 = lagrange_basis(x, &nodes, &bary).iter().sum();
            assert!((sum - 1.0).abs() < 1e-14, "basis must sum to one at {x}");
        }
    }

    #[test]
    fn test_kronecker_at_nodes() {
        let nodes = gauss_lobatto_nodes(3);
        let bary = barycentric_weights(&nodes);
        for (i, &x) in nodes.iter().enumerate() {
            let values = lagrange_basis(x, &nodes, &bary);
            for (j, v) in values.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(*v, expected);
            }
        }
    }

    #[test]
    fn test_interpolation_is_exact_for_polynomials() {
        let from = gauss_lobatto_nodes(4);
        let (to, _) = gauss_legendre_nodes_weights(5);
        let matrix = interpolation_matrix(&from, &to);

        let f = |x: f64| 2.0 * x.powi(4) - x.powi(3) + 0.5 * x - 1.0;
        for (i, &x) in to.iter().enumerate() {
            let interpolated: f64 = (0..from.len()).map(|j| matrix[(i, j)] * f(from[j])).sum();
            assert!((interpolated - f(x)).abs() < 1e-13);
        }
    }
}
