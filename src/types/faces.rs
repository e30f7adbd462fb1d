//! Face orientation, direction and side conventions.
//!
//! Every element of the quadtree mesh is an axis-aligned square with four
//! faces. Faces are addressed by [`Direction`] in the fixed order
//! `-x, +x, -y, +y`, which is also the slot order of the per-element surface
//! flux buffer.

use std::fmt;

/// Axis normal to a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Face normal points along x (face runs along y).
    X,
    /// Face normal points along y (face runs along x).
    Y,
}

impl Orientation {
    /// Both orientations in evaluation order.
    pub const ALL: [Orientation; 2] = [Orientation::X, Orientation::Y];

    /// Direction of the face on the negative side of an element.
    #[inline]
    pub const fn negative(self) -> Direction {
        match self {
            Orientation::X => Direction::NegX,
            Orientation::Y => Direction::NegY,
        }
    }

    /// Direction of the face on the positive side of an element.
    #[inline]
    pub const fn positive(self) -> Direction {
        match self {
            Orientation::X => Direction::PosX,
            Orientation::Y => Direction::PosY,
        }
    }

    /// Zero-based axis index (x = 0, y = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Orientation::X => 0,
            Orientation::Y => 1,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::X => write!(f, "x"),
            Orientation::Y => write!(f, "y"),
        }
    }
}

/// One of the four faces of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NegX,
    PosX,
    NegY,
    PosY,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::NegX,
        Direction::PosX,
        Direction::NegY,
        Direction::PosY,
    ];

    /// Slot index in `0..4`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::NegX => 0,
            Direction::PosX => 1,
            Direction::NegY => 2,
            Direction::PosY => 3,
        }
    }

    /// Direction for a slot index.
    #[inline]
    pub const fn from_index(index: usize) -> Direction {
        match index {
            0 => Direction::NegX,
            1 => Direction::PosX,
            2 => Direction::NegY,
            _ => Direction::PosY,
        }
    }

    /// Axis normal to this face.
    #[inline]
    pub const fn orientation(self) -> Orientation {
        match self {
            Direction::NegX | Direction::PosX => Orientation::X,
            Direction::NegY | Direction::PosY => Orientation::Y,
        }
    }

    /// Whether the outward normal points in the positive axis direction.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::PosX | Direction::PosY)
    }

    /// The face on the opposite side of the element.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NegX => Direction::PosX,
            Direction::PosX => Direction::NegX,
            Direction::NegY => Direction::PosY,
            Direction::PosY => Direction::NegY,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::NegX => "-x",
            Direction::PosX => "+x",
            Direction::NegY => "-y",
            Direction::PosY => "+y",
        };
        write!(f, "{label}")
    }
}

/// Side of a face along its normal axis.
///
/// `Left` is the negative side (smaller coordinate), `Right` the positive
/// side. An element on the left of a face sees that face as its `+` face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Zero-based index (left = 0, right = 1) into two-sided trace buffers.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// The other side.
    #[inline]
    pub const fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Face direction, as seen from an element on this side of a face with
    /// the given orientation.
    #[inline]
    pub const fn element_face(self, orientation: Orientation) -> Direction {
        match self {
            Side::Left => orientation.positive(),
            Side::Right => orientation.negative(),
        }
    }
}
