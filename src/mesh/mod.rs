//! Mesh representation.
//!
//! Provides the topology the DG solver consumes:
//! - [`MeshTopology2D`]: element geometry, periodicity and flat connectivity
//! - [`QuadLeafMesh`]: leaves of a 2:1-balanced quadtree over a block of
//!   square root cells

mod leaf_mesh;
mod traits;

pub use leaf_mesh::{LeafCell, MAX_LEVEL, QuadLeafMesh, count_by_orientation};
pub use traits::{
    BoundaryTopology, Connectivity2D, InterfaceTopology, MeshTopology2D, MortarTopology,
};
