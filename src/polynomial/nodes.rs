//! Gauss-Lobatto-Legendre and Gauss-Legendre nodes and weights.
//!
//! The solution lives on Lobatto nodes (endpoints included, so face traces
//! are plain copies of boundary nodes). Gauss nodes are only needed to build
//! the exact L2 mortar projection.

use std::f64::consts::PI;

use super::legendre::{legendre, legendre_and_derivative};

const NEWTON_TOLERANCE: f64 = 1e-15;
const NEWTON_MAX_ITERATIONS: usize = 100;

/// Gauss-Lobatto-Legendre nodes for polynomial degree `degree`.
///
/// Returns `degree + 1` nodes in ascending order: ±1 and the roots of
/// `P'_degree`. Interior nodes come from Newton iteration on
/// `(1-x²) P'_N(x)`, started from Chebyshev-Lobatto points.
pub fn gauss_lobatto_nodes(degree: usize) -> Vec<f64> {
    let n = degree;
    match n {
        0 => return vec![0.0],
        1 => return vec![-1.0, 1.0],
        _ => {}
    }

    let mut nodes: Vec<f64> = (0..=n).map(|j| -(PI * j as f64 / n as f64).cos()).collect();
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    let scale = (n * (n + 1)) as f64;
    for node in nodes.iter_mut().take(n).skip(1) {
        let mut x = *node;
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let (p_n, dp_n) = legendre_and_derivative(n, x);
            // d/dx [(1-x²) P'_N] = -N(N+1) P_N
            let update = (1.0 - x * x) * dp_n / (scale * p_n);
            x += update;
            if update.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        *node = x;
    }

    nodes
}

/// Gauss-Lobatto-Legendre weights `w_j = 2 / (N(N+1) P_N(x_j)²)`.
pub fn gauss_lobatto_weights(degree: usize, nodes: &[f64]) -> Vec<f64> {
    if degree == 0 {
        return vec![2.0];
    }
    let denom = (degree * (degree + 1)) as f64;
    nodes
        .iter()
        .map(|&x| {
            let p_n = legendre(degree, x);
            2.0 / (denom * p_n * p_n)
        })
        .collect()
}

/// Gauss-Legendre nodes and weights with `n_nodes` points, ascending.
///
/// Exact for polynomials up to degree `2 n_nodes - 1`.
pub fn gauss_legendre_nodes_weights(n_nodes: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n_nodes;
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    for i in 0..n {
        // Tricomi initial guess, descending order
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..NEWTON_MAX_ITERATIONS {
            let (p_n, dp_n) = legendre_and_derivative(n, x);
            let update = p_n / dp_n;
            x -= update;
            if update.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        let (_, dp_n) = legendre_and_derivative(n, x);
        nodes[n - 1 - i] = x;
        weights[n - 1 - i] = 2.0 / ((1.0 - x * x) * dp_n * dp_n);
    }

    (nodes, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrate_monomial(nodes: &[f64], weights: &[f64], k: usize) -> f64 {
        nodes
            .iter()
            .zip(weights)
            .map(|(&x, &w)| w * x.powi(k as i32))
            .sum()
    }

    fn exact_monomial(k: usize) -> f64 {
        if k % 2 == 0 { 2.0 / (k + 1) as f64 } else { 0.0 }
    }

    #[test]
    fn test_lobatto_endpoints_and_symmetry() {
        for degree in 1..=7 {
            let nodes = gauss_lobatto_nodes(degree);
            assert_eq!(nodes.len(), degree + 1);
            assert_eq!(nodes[0], -1.0);
            assert_eq!(nodes[degree], 1.0);
            for i in 0..nodes.len() / 2 {
                assert!((nodes[i] + nodes[degree - i]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_lobatto_known_values() {
        let nodes = gauss_lobatto_nodes(2);
        let weights = gauss_lobatto_weights(2, &nodes);
        assert!(nodes[1].abs() < 1e-15);
        assert!((weights[0] - 1.0 / 3.0).abs() < 1e-14);
        assert!((weights[1] - 4.0 / 3.0).abs() < 1e-14);

        // Degree 3: interior nodes at ±1/sqrt(5), weights 1/6 and 5/6
        let nodes = gauss_lobatto_nodes(3);
        let weights = gauss_lobatto_weights(3, &nodes);
        assert!((nodes[2] - 1.0 / 5.0_f64.sqrt()).abs() < 1e-14);
        assert!((weights[0] - 1.0 / 6.0).abs() < 1e-14);
        assert!((weights[1] - 5.0 / 6.0).abs() < 1e-14);
    }

    #[test]
    fn test_lobatto_exactness() {
        for degree in 1..=6 {
            let nodes = gauss_lobatto_nodes(degree);
            let weights = gauss_lobatto_weights(degree, &nodes);
            for k in 0..=(2 * degree - 1) {
                let numerical = integrate_monomial(&nodes, &weights, k);
                assert!(
                    (numerical - exact_monomial(k)).abs() < 1e-12,
                    "degree {degree}, monomial x^{k}: got {numerical}"
                );
            }
        }
    }

    #[test]
    fn test_gauss_exactness() {
        for n in 1..=7 {
            let (nodes, weights) = gauss_legendre_nodes_weights(n);
            assert!(nodes.windows(2).all(|w| w[0] < w[1]), "nodes must ascend");
            for k in 0..=(2 * n - 1) {
                let numerical = integrate_monomial(&nodes, &weights, k);
                assert!(
                    (numerical - exact_monomial(k)).abs() < 1e-12,
                    "{n} Gauss points, monomial x^{k}: got {numerical}"
                );
            }
        }
    }
}
