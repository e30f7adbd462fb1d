//! Mesh topology consumed by the DG solver.
//!
//! The solver only needs three things from a mesh: per-element geometry
//! (an axis-aligned square given by center and edge length), periodicity,
//! and flat connectivity records. Connectivity is returned as parallel
//! arrays of face records over the dense element arena; elements never
//! store back-references to their faces.

use crate::error::Result;
use crate::types::{Direction, Orientation, Side};

// =============================================================================
// Connectivity Records
// =============================================================================

/// A conforming face shared by two elements of equal size.
///
/// `left` lies on the negative side along `orientation`. On periodic
/// meshes that are one element wide, `left == right` is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceTopology {
    /// Element on the negative side
    pub left: usize,
    /// Element on the positive side
    pub right: usize,
    /// Face normal axis
    pub orientation: Orientation,
}

/// A physical boundary face of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryTopology {
    /// Owning element
    pub element: usize,
    /// Face of `element` on the domain boundary
    pub direction: Direction,
}

impl BoundaryTopology {
    /// Face normal axis.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.direction.orientation()
    }

    /// Side of the face the element occupies: `Left` on `+x`/`+y` faces.
    #[inline]
    pub fn neighbor_side(&self) -> Side {
        if self.direction.is_positive() {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// A 2:1 nonconforming face: one large element face against two small ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MortarTopology {
    /// Small element covering the lower half of the large face
    pub lower: usize,
    /// Small element covering the upper half of the large face
    pub upper: usize,
    /// Large element
    pub large: usize,
    /// Side of the face the large element occupies
    pub large_side: Side,
    /// Face normal axis
    pub orientation: Orientation,
}

/// Flat connectivity of a mesh.
#[derive(Clone, Debug, Default)]
pub struct Connectivity2D {
    /// Conforming interior faces
    pub interfaces: Vec<InterfaceTopology>,
    /// Physical boundary faces
    pub boundaries: Vec<BoundaryTopology>,
    /// 2:1 nonconforming faces
    pub mortars: Vec<MortarTopology>,
}

// =============================================================================
// MeshTopology2D Trait
// =============================================================================

/// A 2D mesh of axis-aligned square elements.
pub trait MeshTopology2D: Send + Sync {
    /// Number of elements.
    fn n_elements(&self) -> usize;

    /// Center of `element`.
    fn element_center(&self, element: usize) -> [f64; 2];

    /// Edge length of `element`.
    fn element_length(&self, element: usize) -> f64;

    /// Periodicity in x and y.
    fn periodicity(&self) -> [bool; 2];

    /// Whether the mesh is periodic in every direction.
    #[inline]
    fn is_periodic(&self) -> bool {
        self.periodicity().iter().all(|&p| p)
    }

    /// Derive interfaces, boundaries and mortars.
    fn connectivity(&self) -> Result<Connectivity2D>;
}
