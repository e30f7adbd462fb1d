//! Per-direction values with named fields.
//!
//! Avoids remembering which array slot belongs to which face: boundary
//! conditions and per-direction counts are stored as `x_neg, x_pos, y_neg,
//! y_pos` and converted to the slot order of [`Direction`] on demand.

use std::fmt;

use super::Direction;

/// One value per element face / domain side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionMap<T> {
    /// Value at the `-x` side
    pub x_neg: T,
    /// Value at the `+x` side
    pub x_pos: T,
    /// Value at the `-y` side
    pub y_neg: T,
    /// Value at the `+y` side
    pub y_pos: T,
}

impl<T> DirectionMap<T> {
    /// Create with explicit named values.
    pub fn new(x_neg: T, x_pos: T, y_neg: T, y_pos: T) -> Self {
        Self {
            x_neg,
            x_pos,
            y_neg,
            y_pos,
        }
    }

    /// Same value on all four sides.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            x_neg: value.clone(),
            x_pos: value.clone(),
            y_neg: value.clone(),
            y_pos: value,
        }
    }

    /// Value for a direction.
    #[inline]
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::NegX => &self.x_neg,
            Direction::PosX => &self.x_pos,
            Direction::NegY => &self.y_neg,
            Direction::PosY => &self.y_pos,
        }
    }

    /// Mutable value for a direction.
    #[inline]
    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::NegX => &mut self.x_neg,
            Direction::PosX => &mut self.x_pos,
            Direction::NegY => &mut self.y_neg,
            Direction::PosY => &mut self.y_pos,
        }
    }

    /// Map a function over all sides.
    pub fn map<U, F>(self, mut f: F) -> DirectionMap<U>
    where
        F: FnMut(T) -> U,
    {
        DirectionMap {
            x_neg: f(self.x_neg),
            x_pos: f(self.x_pos),
            y_neg: f(self.y_neg),
            y_pos: f(self.y_pos),
        }
    }

    /// Convert to an array in [`Direction`] slot order.
    pub fn to_array(self) -> [T; 4] {
        [self.x_neg, self.x_pos, self.y_neg, self.y_pos]
    }

    /// Iterate as `(direction, value)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

impl<T: Default> Default for DirectionMap<T> {
    fn default() -> Self {
        Self {
            x_neg: T::default(),
            x_pos: T::default(),
            y_neg: T::default(),
            y_pos: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for DirectionMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-x:{} +x:{} -y:{} +y:{}",
            self.x_neg, self.x_pos, self.y_neg, self.y_pos
        )
    }
}

impl<T> From<[T; 4]> for DirectionMap<T> {
    fn from([x_neg, x_pos, y_neg, y_pos]: [T; 4]) -> Self {
        Self::new(x_neg, x_pos, y_neg, y_pos)
    }
}
