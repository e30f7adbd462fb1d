//! L2 mortar container for 2:1 nonconforming faces.

use crate::mesh::MortarTopology;
use crate::types::{Direction, Orientation, Side};

/// Role of an element at a mortar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MortarRole {
    /// Small element on the upper half of the large face
    Upper,
    /// Small element on the lower half of the large face
    Lower,
    /// Large element
    Large,
}

impl MortarRole {
    /// All roles in buffer order.
    pub const ALL: [MortarRole; 3] = [MortarRole::Upper, MortarRole::Lower, MortarRole::Large];

    /// Slot in the mortar buffers.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MortarRole::Upper => 0,
            MortarRole::Lower => 1,
            MortarRole::Large => 2,
        }
    }
}

/// Mortars with their two-sided upper/lower traces and per-role fluxes.
///
/// `u` uses `(((m * 2 + half) * 2 + side) * K + l) * N + v` with
/// `half` = `Upper`/`Lower`; one side of each half holds the small
/// element's trace, the other the large trace projected onto that half.
/// `flux` uses `((m * 3 + role) * K + l) * N + v`.
#[derive(Clone, Debug)]
pub struct MortarContainer2D {
    /// `[lower, upper, large]` element ids
    pub neighbor_ids: Vec<[usize; 3]>,
    /// Side of the face the large element occupies
    pub large_sides: Vec<Side>,
    /// Face normal axis
    pub orientations: Vec<Orientation>,
    /// Traces on both halves
    pub u: Vec<f64>,
    /// Fluxes for the upper, lower and large element
    pub flux: Vec<f64>,
    n_nodes: usize,
    n_vars: usize,
}

impl MortarContainer2D {
    /// Allocate buffers for `records`.
    pub fn new(records: &[MortarTopology], n_nodes: usize, n_vars: usize) -> Self {
        let block = n_nodes * n_vars;
        Self {
            neighbor_ids: records.iter().map(|m| [m.lower, m.upper, m.large]).collect(),
            large_sides: records.iter().map(|m| m.large_side).collect(),
            orientations: records.iter().map(|m| m.orientation).collect(),
            u: vec![0.0; records.len() * 4 * block],
            flux: vec![0.0; records.len() * 3 * block],
            n_nodes,
            n_vars,
        }
    }

    /// Number of mortars.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbor_ids.len()
    }

    /// Whether there are no mortars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbor_ids.is_empty()
    }

    /// Values per mortar in `u`, `4 K N`.
    #[inline]
    pub fn trace_stride(&self) -> usize {
        4 * self.n_nodes * self.n_vars
    }

    /// Values per mortar in `flux`, `3 K N`.
    #[inline]
    pub fn flux_stride(&self) -> usize {
        3 * self.n_nodes * self.n_vars
    }

    /// Element id for `role` at mortar `m`.
    #[inline]
    pub fn element(&self, m: usize, role: MortarRole) -> usize {
        let [lower, upper, large] = self.neighbor_ids[m];
        match role {
            MortarRole::Upper => upper,
            MortarRole::Lower => lower,
            MortarRole::Large => large,
        }
    }
}

/// Offset of the (`half`, `side`) trace within one mortar's trace block.
#[inline]
pub(crate) fn trace_offset(half: MortarRole, side: Side, face_len: usize) -> usize {
    debug_assert!(half != MortarRole::Large);
    (half.index() * 2 + side.index()) * face_len
}

/// Offset of the `role` flux within one mortar's flux block.
#[inline]
pub(crate) fn flux_offset(role: MortarRole, face_len: usize) -> usize {
    role.index() * face_len
}

/// Faces of the small elements and of the large element.
///
/// A large element on the left couples through its `+` face to the `-`
/// faces of the small elements, and vice versa.
#[inline]
pub(crate) fn face_directions(orientation: Orientation, large_side: Side) -> (Direction, Direction) {
    match large_side {
        Side::Left => (orientation.negative(), orientation.positive()),
        Side::Right => (orientation.positive(), orientation.negative()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_directions() {
        assert_eq!(
            face_directions(Orientation::X, Side::Left),
            (Direction::NegX, Direction::PosX)
        );
        assert_eq!(
            face_directions(Orientation::Y, Side::Right),
            (Direction::PosY, Direction::NegY)
        );
    }

    #[test]
    fn test_buffer_offsets_are_disjoint() {
        let face_len = 6;
        let mut offsets: Vec<usize> = [MortarRole::Upper, MortarRole::Lower]
            .into_iter()
            .flat_map(|half| [Side::Left, Side::Right].map(|side| trace_offset(half, side, face_len)))
            .collect();
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 6, 12, 18]);

        let flux: Vec<usize> = MortarRole::ALL.iter().map(|&r| flux_offset(r, face_len)).collect();
        assert_eq!(flux, vec![0, 6, 12]);
    }
}
