//! Element container.

use crate::mesh::MeshTopology2D;

/// Which face-coupling container owns a face flux.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FluxBuffer {
    /// Conforming interface flux buffer
    Interfaces,
    /// Boundary flux buffer
    Boundaries,
    /// Mortar flux buffer
    Mortars,
}

/// Location of the `K × N` flux block feeding one element face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceSource {
    /// Owning container
    pub buffer: FluxBuffer,
    /// Offset of the block in the owner's flux buffer
    pub offset: usize,
}

/// Per-element geometry and surface flux storage.
///
/// `surface_flux_values[((k * 4 + dir) * K + l) * N + v]` holds the flux on
/// face `dir` (in [`Direction`](crate::types::Direction) order) of element `k` at face node `l`.
#[derive(Clone, Debug)]
pub struct ElementContainer2D {
    /// Number of elements
    pub n_elements: usize,
    /// Nodes per direction (K)
    pub n_nodes: usize,
    /// Variables per node (N)
    pub n_vars: usize,
    /// Inverse Jacobian `2 / cell_length` of the affine map
    pub inverse_jacobian: Vec<f64>,
    /// Edge length per element
    pub cell_length: Vec<f64>,
    /// Node coordinates, indexed `(k * K + j) * K + i`
    pub node_coordinates: Vec<[f64; 2]>,
    /// Face fluxes gathered from interfaces, boundaries and mortars
    pub surface_flux_values: Vec<f64>,
    /// Owner of each element face, indexed `k * 4 + dir`
    pub face_sources: Vec<FaceSource>,
}

impl ElementContainer2D {
    /// Build geometry for all mesh elements on the reference `nodes`.
    pub fn new<M: MeshTopology2D + ?Sized>(mesh: &M, nodes: &[f64], n_vars: usize) -> Self {
        let n_elements = mesh.n_elements();
        let n_nodes = nodes.len();

        let mut inverse_jacobian = Vec::with_capacity(n_elements);
        let mut cell_length = Vec::with_capacity(n_elements);
        let mut node_coordinates = Vec::with_capacity(n_elements * n_nodes * n_nodes);

        for k in 0..n_elements {
            let center = mesh.element_center(k);
            let length = mesh.element_length(k);
            inverse_jacobian.push(2.0 / length);
            cell_length.push(length);
            for &eta in nodes {
                for &xi in nodes {
                    node_coordinates.push([
                        center[0] + 0.5 * length * xi,
                        center[1] + 0.5 * length * eta,
                    ]);
                }
            }
        }

        Self {
            n_elements,
            n_nodes,
            n_vars,
            inverse_jacobian,
            cell_length,
            node_coordinates,
            surface_flux_values: vec![0.0; n_elements * 4 * n_nodes * n_vars],
            face_sources: Vec::new(),
        }
    }

    /// Values of `surface_flux_values` per element, `4 K N`.
    #[inline]
    pub fn surface_flux_stride(&self) -> usize {
        4 * self.n_nodes * self.n_vars
    }

    /// Coordinates of node (i, j) of element k.
    #[inline]
    pub fn node_coordinate(&self, k: usize, i: usize, j: usize) -> [f64; 2] {
        self.node_coordinates[(k * self.n_nodes + j) * self.n_nodes + i]
    }
}
