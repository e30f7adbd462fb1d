//! Strongly-typed face conventions shared by every stage.
//!
//! Named enums replace the integer direction codes a tree-mesh DG solver
//! would otherwise pass around:
//!
//! ```
//! use dg_tree::types::{Direction, DirectionMap, Orientation, Side};
//!
//! // The left element of an x-face sees it as its +x face
//! assert_eq!(Side::Left.element_face(Orientation::X), Direction::PosX);
//!
//! // Per-direction values with named fields
//! let counts = DirectionMap::new(4, 4, 0, 0);
//! assert_eq!(*counts.get(Direction::PosX), 4);
//! ```

mod direction_map;
mod faces;

pub use direction_map::DirectionMap;
pub use faces::{Direction, Orientation, Side};

/// Nodal state of an `N`-variable system at one point.
pub type State<const N: usize> = [f64; N];
