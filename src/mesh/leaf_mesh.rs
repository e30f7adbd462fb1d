//! Quadtree leaf mesh.
//!
//! Leaves are square cells on a hierarchy of integer grids: a cell at level
//! `l` has edge length `root_length / 2^l` and integer coordinates in
//! `0..n_root * 2^l` per direction. This is enough to describe any
//! quadtree refinement of a rectangular block of root cells, and to derive
//! conforming, 2:1 nonconforming and boundary faces by hashing neighbor
//! coordinates.

use std::collections::HashMap;

use crate::error::{DGError, Result};
use crate::types::{Direction, Orientation, Side};

use super::traits::{
    BoundaryTopology, Connectivity2D, InterfaceTopology, MeshTopology2D, MortarTopology,
};

/// Deepest refinement level a leaf may reach.
pub const MAX_LEVEL: u32 = 30;

/// One leaf cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeafCell {
    /// Refinement level (0 = root cell)
    pub level: u32,
    /// Integer x coordinate at `level`
    pub ix: i64,
    /// Integer y coordinate at `level`
    pub iy: i64,
}

/// Leaf set of a quadtree over `n_root[0] × n_root[1]` root cells.
#[derive(Clone, Debug)]
pub struct QuadLeafMesh {
    /// Lower-left corner of the domain
    pub origin: [f64; 2],
    /// Edge length of a root cell
    pub root_length: f64,
    /// Number of root cells per direction
    pub n_root: [usize; 2],
    /// Periodicity in x and y
    pub periodic: [bool; 2],
    leaves: Vec<LeafCell>,
}

impl QuadLeafMesh {
    /// Uniform mesh of `nx × ny` root cells of edge length `cell_length`.
    ///
    /// Leaves are ordered with x fastest.
    pub fn uniform(
        origin: [f64; 2],
        cell_length: f64,
        nx: usize,
        ny: usize,
        periodic: [bool; 2],
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(DGError::InvalidMesh(format!(
                "need at least one cell per direction, got {nx} x {ny}"
            )));
        }
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return Err(DGError::InvalidMesh(format!(
                "cell length must be positive, got {cell_length}"
            )));
        }

        let leaves = (0..ny as i64)
            .flat_map(|iy| (0..nx as i64).map(move |ix| LeafCell { level: 0, ix, iy }))
            .collect();

        Ok(Self {
            origin,
            root_length: cell_length,
            n_root: [nx, ny],
            periodic,
            leaves,
        })
    }

    /// Replace leaf `element` by its four children.
    ///
    /// The children take positions `element..element + 4` (x fastest); leaves
    /// after `element` shift by three. Returns the children's indices.
    pub fn refine(&mut self, element: usize) -> Result<[usize; 4]> {
        let parent = *self.leaves.get(element).ok_or_else(|| {
            DGError::InvalidMesh(format!(
                "cannot refine element {element}: mesh has {} elements",
                self.leaves.len()
            ))
        })?;
        if parent.level >= MAX_LEVEL {
            return Err(DGError::InvalidMesh(format!(
                "element {element} is already at the maximum level {MAX_LEVEL}"
            )));
        }

        let level = parent.level + 1;
        let children = [(0, 0), (1, 0), (0, 1), (1, 1)].map(|(dx, dy)| LeafCell {
            level,
            ix: 2 * parent.ix + dx,
            iy: 2 * parent.iy + dy,
        });
        self.leaves.splice(element..=element, children);

        Ok([element, element + 1, element + 2, element + 3])
    }

    /// All leaves in element order.
    pub fn leaves(&self) -> &[LeafCell] {
        &self.leaves
    }

    /// Number of cells per direction at `level`.
    #[inline]
    fn extent(&self, level: u32) -> [i64; 2] {
        let scale = 1_i64 << level;
        [self.n_root[0] as i64 * scale, self.n_root[1] as i64 * scale]
    }

    /// Same-level neighbor coordinates across `direction`, wrapped on
    /// periodic axes; `None` across a physical boundary.
    fn neighbor_coords(&self, cell: LeafCell, direction: Direction) -> Option<(i64, i64)> {
        let (dx, dy) = match direction {
            Direction::NegX => (-1, 0),
            Direction::PosX => (1, 0),
            Direction::NegY => (0, -1),
            Direction::PosY => (0, 1),
        };
        let extent = self.extent(cell.level);
        let wrap = |c: i64, axis: usize| -> Option<i64> {
            if (0..extent[axis]).contains(&c) {
                Some(c)
            } else if self.periodic[axis] {
                Some(c.rem_euclid(extent[axis]))
            } else {
                None
            }
        };
        Some((wrap(cell.ix + dx, 0)?, wrap(cell.iy + dy, 1)?))
    }
}

impl MeshTopology2D for QuadLeafMesh {
    fn n_elements(&self) -> usize {
        self.leaves.len()
    }

    fn element_center(&self, element: usize) -> [f64; 2] {
        let cell = self.leaves[element];
        let length = self.element_length(element);
        [
            self.origin[0] + (cell.ix as f64 + 0.5) * length,
            self.origin[1] + (cell.iy as f64 + 0.5) * length,
        ]
    }

    fn element_length(&self, element: usize) -> f64 {
        self.root_length / (1_u64 << self.leaves[element].level) as f64
    }

    fn periodicity(&self) -> [bool; 2] {
        self.periodic
    }

    fn connectivity(&self) -> Result<Connectivity2D> {
        let lookup: HashMap<LeafCell, usize> = self
            .leaves
            .iter()
            .enumerate()
            .map(|(k, &cell)| (cell, k))
            .collect();
        if lookup.len() != self.leaves.len() {
            return Err(DGError::InvalidMesh("duplicate leaf cells".into()));
        }

        let mut connectivity = Connectivity2D::default();

        for (element, &cell) in self.leaves.iter().enumerate() {
            for direction in Direction::ALL {
                let Some((nx, ny)) = self.neighbor_coords(cell, direction) else {
                    connectivity.boundaries.push(BoundaryTopology { element, direction });
                    continue;
                };

                // Same level: conforming, recorded once from the left element
                let same = LeafCell { level: cell.level, ix: nx, iy: ny };
                if let Some(&neighbor) = lookup.get(&same) {
                    if direction.is_positive() {
                        connectivity.interfaces.push(InterfaceTopology {
                            left: element,
                            right: neighbor,
                            orientation: direction.orientation(),
                        });
                    }
                    continue;
                }

                // One level coarser: the mortar is recorded from the large element
                if cell.level > 0 {
                    let coarse = LeafCell { level: cell.level - 1, ix: nx >> 1, iy: ny >> 1 };
                    if lookup.contains_key(&coarse) {
                        continue;
                    }
                }

                // One level finer: the two children touching this face
                let level = cell.level + 1;
                let (lower, upper) = match direction {
                    Direction::PosX | Direction::NegX => {
                        let ix = 2 * nx + i64::from(direction == Direction::NegX);
                        (
                            LeafCell { level, ix, iy: 2 * ny },
                            LeafCell { level, ix, iy: 2 * ny + 1 },
                        )
                    }
                    Direction::PosY | Direction::NegY => {
                        let iy = 2 * ny + i64::from(direction == Direction::NegY);
                        (
                            LeafCell { level, ix: 2 * nx, iy },
                            LeafCell { level, ix: 2 * nx + 1, iy },
                        )
                    }
                };
                match (lookup.get(&lower), lookup.get(&upper)) {
                    (Some(&lower), Some(&upper)) => {
                        connectivity.mortars.push(MortarTopology {
                            lower,
                            upper,
                            large: element,
                            large_side: if direction.is_positive() { Side::Left } else { Side::Right },
                            orientation: direction.orientation(),
                        });
                    }
                    _ => return Err(DGError::UnbalancedRefinement { element, direction }),
                }
            }
        }

        log::debug!(
            "Derived connectivity for {} leaves: {} interfaces, {} boundaries, {} mortars",
            self.leaves.len(),
            connectivity.interfaces.len(),
            connectivity.boundaries.len(),
            connectivity.mortars.len()
        );

        Ok(connectivity)
    }
}

/// Count faces of each orientation (for logging and tests).
pub fn count_by_orientation(interfaces: &[InterfaceTopology]) -> [usize; 2] {
    let mut counts = [0; 2];
    for interface in interfaces {
        counts[interface.orientation.index()] += 1;
    }
    counts
}
