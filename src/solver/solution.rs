//! Nodal solution storage for 2D systems of conservation laws.
//!
//! Stores nodal values element-major with interleaved variables:
//! `data[((k * K + j) * K + i) * N + var]` for element k, node (i, j),
//! variable var, where `i` runs along x and `j` along y.
//!
//! This layout gives every element one contiguous block, which is what
//! lets every element-indexed stage write its output without locking.

use crate::types::State;

/// Solution storage for a 2D system of `N` conservation laws on a
/// `K × K` tensor-product node grid per element.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution2D<const N: usize> {
    /// Nodal values in element-major, interleaved layout
    pub data: Vec<f64>,
    /// Number of elements
    pub n_elements: usize,
    /// Number of nodes per direction (K)
    pub n_nodes: usize,
}

impl<const N: usize> Solution2D<N> {
    /// Create a new solution storage initialized to zero.
    pub fn zeros(n_elements: usize, n_nodes: usize) -> Self {
        Self {
            data: vec![0.0; n_elements * n_nodes * n_nodes * N],
            n_elements,
            n_nodes,
        }
    }

    /// Number of values per element, `K² N`.
    #[inline]
    pub fn element_stride(&self) -> usize {
        self.n_nodes * self.n_nodes * N
    }

    /// Flat offset of node (i, j) in element k.
    #[inline]
    pub fn index(&self, k: usize, i: usize, j: usize) -> usize {
        ((k * self.n_nodes + j) * self.n_nodes + i) * N
    }

    /// Get the state at node (i, j) in element k.
    #[inline]
    pub fn get(&self, k: usize, i: usize, j: usize) -> State<N> {
        let base = self.index(k, i, j);
        let mut state = [0.0; N];
        state.copy_from_slice(&self.data[base..base + N]);
        state
    }

    /// Set the state at node (i, j) in element k.
    #[inline]
    pub fn set(&mut self, k: usize, i: usize, j: usize, state: State<N>) {
        let base = self.index(k, i, j);
        self.data[base..base + N].copy_from_slice(&state);
    }

    /// All values of element k.
    #[inline]
    pub fn element(&self, k: usize) -> &[f64] {
        let stride = self.element_stride();
        &self.data[k * stride..(k + 1) * stride]
    }

    /// Mutable values of element k.
    #[inline]
    pub fn element_mut(&mut self, k: usize) -> &mut [f64] {
        let stride = self.element_stride();
        &mut self.data[k * stride..(k + 1) * stride]
    }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &Self) {
        assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Get maximum absolute value across all variables.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Get maximum absolute value for a specific variable.
    pub fn max_abs_var(&self, var: usize) -> f64 {
        self.data
            .chunks_exact(N)
            .map(|node| node[var].abs())
            .fold(0.0, f64::max)
    }

    /// Largest absolute difference to another solution of the same shape.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        assert_eq!(self.data.len(), other.data.len());
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// Read the state at node (i, j) from an element block.
#[inline]
pub(crate) fn node_state<const N: usize>(block: &[f64], n_nodes: usize, i: usize, j: usize) -> State<N> {
    let base = (j * n_nodes + i) * N;
    let mut state = [0.0; N];
    state.copy_from_slice(&block[base..base + N]);
    state
}

/// Add `factor * values` to node (i, j) of an element block.
#[inline]
pub(crate) fn add_to_node<const N: usize>(
    block: &mut [f64],
    n_nodes: usize,
    i: usize,
    j: usize,
    factor: f64,
    values: &State<N>,
) {
    let base = (j * n_nodes + i) * N;
    for (d, v) in block[base..base + N].iter_mut().zip(values) {
        *d += factor * v;
    }
}
