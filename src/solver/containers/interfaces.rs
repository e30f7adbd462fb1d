//! Conforming interface container.

use crate::mesh::InterfaceTopology;
use crate::types::Orientation;

/// Conforming interfaces with two-sided trace and flux buffers.
///
/// Both buffers use `((s * 2 + side) * K + l) * N + v`. In the flux buffer
/// the `Left` block is what the left element receives on its `+` face and
/// the `Right` block what the right element receives on its `-` face.
#[derive(Clone, Debug)]
pub struct InterfaceContainer2D {
    /// `[left, right]` element ids
    pub neighbor_ids: Vec<[usize; 2]>,
    /// Face normal axis
    pub orientations: Vec<Orientation>,
    /// Prolonged traces
    pub u: Vec<f64>,
    /// Face fluxes per side
    pub flux: Vec<f64>,
    n_nodes: usize,
    n_vars: usize,
}

impl InterfaceContainer2D {
    /// Allocate buffers for `records`.
    pub fn new(records: &[InterfaceTopology], n_nodes: usize, n_vars: usize) -> Self {
        let size = records.len() * 2 * n_nodes * n_vars;
        Self {
            neighbor_ids: records.iter().map(|r| [r.left, r.right]).collect(),
            orientations: records.iter().map(|r| r.orientation).collect(),
            u: vec![0.0; size],
            flux: vec![0.0; size],
            n_nodes,
            n_vars,
        }
    }

    /// Number of interfaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbor_ids.len()
    }

    /// Whether there are no interfaces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbor_ids.is_empty()
    }

    /// Values per interface in `u` and `flux`, `2 K N`.
    #[inline]
    pub fn stride(&self) -> usize {
        2 * self.n_nodes * self.n_vars
    }
}
