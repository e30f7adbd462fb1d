//! Flat data containers for elements and their face couplings.
//!
//! Every container stores its topology as parallel arrays and owns the
//! buffers its stages write: interfaces, boundaries and mortars own their
//! traces and fluxes, elements own `surface_flux_values`. A stage therefore
//! always writes one contiguous block per unit of work.

mod boundaries;
mod elements;
mod interfaces;
mod mortars;

pub use boundaries::BoundaryContainer2D;
pub use elements::{ElementContainer2D, FaceSource, FluxBuffer};
pub use interfaces::InterfaceContainer2D;
pub use mortars::{MortarContainer2D, MortarRole};
pub(crate) use mortars::{face_directions, flux_offset, trace_offset};

use crate::types::{Direction, State};

/// Element node `(i, j)` at position `l` along the face `direction`.
///
/// Along x-faces `l` is the y-index `j`, along y-faces the x-index `i`.
#[inline]
pub(crate) fn face_node(direction: Direction, l: usize, n_nodes: usize) -> (usize, usize) {
    match direction {
        Direction::NegX => (0, l),
        Direction::PosX => (n_nodes - 1, l),
        Direction::NegY => (l, 0),
        Direction::PosY => (l, n_nodes - 1),
    }
}

/// Copy the trace of an element block on face `direction` into `out`
/// (`K × N` values, face-node major).
#[inline]
pub(crate) fn copy_face_trace<const N: usize>(
    element: &[f64],
    direction: Direction,
    n_nodes: usize,
    out: &mut [f64],
) {
    for l in 0..n_nodes {
        let (i, j) = face_node(direction, l, n_nodes);
        let base = (j * n_nodes + i) * N;
        out[l * N..(l + 1) * N].copy_from_slice(&element[base..base + N]);
    }
}

/// State at face node `l` of a `K × N` face block.
#[inline]
pub(crate) fn face_state<const N: usize>(face: &[f64], l: usize) -> State<N> {
    let mut state = [0.0; N];
    state.copy_from_slice(&face[l * N..(l + 1) * N]);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_nodes_lie_on_faces() {
        let k = 4;
        for l in 0..k {
            assert_eq!(face_node(Direction::NegX, l, k), (0, l));
            assert_eq!(face_node(Direction::PosX, l, k), (3, l));
            assert_eq!(face_node(Direction::NegY, l, k), (l, 0));
            assert_eq!(face_node(Direction::PosY, l, k), (l, 3));
        }
    }

    #[test]
    fn test_copy_face_trace() {
        // Element value = 10 * j + i, one variable
        let k = 3;
        let element: Vec<f64> = (0..k * k).map(|n| (10 * (n / k) + n % k) as f64).collect();
        let mut out = vec![0.0; k];
        copy_face_trace::<1>(&element, Direction::PosX, k, &mut out);
        assert_eq!(out, vec![2.0, 12.0, 22.0]);
        copy_face_trace::<1>(&element, Direction::NegY, k, &mut out);
        assert_eq!(out, vec![0.0, 1.0, 2.0]);
    }
}
