//! Physical boundary container.

use std::ops::Range;

use crate::mesh::BoundaryTopology;
use crate::types::{Direction, DirectionMap, Orientation, Side};

use super::ElementContainer2D;
use super::face_node;

/// Boundary faces grouped by direction.
///
/// Boundaries are sorted by direction so that all faces sharing one
/// boundary condition form a contiguous range. `u` uses
/// `((b * 2 + side) * K + l) * N + v` with only the `neighbor_side` block
/// filled; `flux` uses `(b * K + l) * N + v`.
#[derive(Clone, Debug)]
pub struct BoundaryContainer2D {
    /// Owning element
    pub neighbor_ids: Vec<usize>,
    /// Face normal axis
    pub orientations: Vec<Orientation>,
    /// Side of the face the element occupies
    pub neighbor_sides: Vec<Side>,
    /// Element face on the boundary
    pub directions: Vec<Direction>,
    /// Face node coordinates, indexed `b * K + l`
    pub node_coordinates: Vec<[f64; 2]>,
    /// Number of boundaries per direction
    pub n_boundaries_per_direction: DirectionMap<usize>,
    /// Prolonged traces
    pub u: Vec<f64>,
    /// Boundary fluxes
    pub flux: Vec<f64>,
    ranges: [Range<usize>; 4],
    n_nodes: usize,
    n_vars: usize,
}

impl BoundaryContainer2D {
    /// Sort `records` by direction and allocate buffers.
    pub fn new(records: &[BoundaryTopology], elements: &ElementContainer2D) -> Self {
        let n_nodes = elements.n_nodes;
        let n_vars = elements.n_vars;

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|b| b.direction.index());

        // Prefix sums over per-direction counts
        let mut counts = [0usize; 4];
        for b in &sorted {
            counts[b.direction.index()] += 1;
        }
        let mut start = 0;
        let ranges = counts.map(|count| {
            let range = start..start + count;
            start += count;
            range
        });

        let node_coordinates = sorted
            .iter()
            .flat_map(|b| {
                (0..n_nodes).map(move |l| {
                    let (i, j) = face_node(b.direction, l, n_nodes);
                    elements.node_coordinate(b.element, i, j)
                })
            })
            .collect();

        Self {
            neighbor_ids: sorted.iter().map(|b| b.element).collect(),
            orientations: sorted.iter().map(|b| b.orientation()).collect(),
            neighbor_sides: sorted.iter().map(|b| b.neighbor_side()).collect(),
            directions: sorted.iter().map(|b| b.direction).collect(),
            node_coordinates,
            n_boundaries_per_direction: DirectionMap::from(counts),
            u: vec![0.0; sorted.len() * 2 * n_nodes * n_vars],
            flux: vec![0.0; sorted.len() * n_nodes * n_vars],
            ranges,
            n_nodes,
            n_vars,
        }
    }

    /// Number of boundaries.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbor_ids.len()
    }

    /// Whether there are no boundaries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbor_ids.is_empty()
    }

    /// Contiguous index range of the boundaries on faces of `direction`.
    #[inline]
    pub fn range(&self, direction: Direction) -> Range<usize> {
        self.ranges[direction.index()].clone()
    }

    /// Values per boundary in `u`, `2 K N`.
    #[inline]
    pub fn trace_stride(&self) -> usize {
        2 * self.n_nodes * self.n_vars
    }

    /// Values per boundary in `flux`, `K N`.
    #[inline]
    pub fn flux_stride(&self) -> usize {
        self.n_nodes * self.n_vars
    }
}
