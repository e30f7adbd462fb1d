//! Evaluation cache: containers, face ownership, blending state and the
//! stage runner, built once per mesh.

use crate::basis::LobattoLegendreBasis;
use crate::error::{DGError, Result};
use crate::mesh::{MeshTopology2D, count_by_orientation};
use crate::types::Direction;

use super::containers::{
    BoundaryContainer2D, ElementContainer2D, FaceSource, FluxBuffer, InterfaceContainer2D,
    MortarContainer2D, MortarRole, face_directions, flux_offset,
};
use super::execution::{Execution, StageRunner};
use super::volume_integral::BlendingCache;

/// Everything the RHS pipeline needs besides the solution itself.
#[derive(Debug)]
pub struct DGCache2D {
    /// Element geometry and surface fluxes
    pub elements: ElementContainer2D,
    /// Conforming interfaces
    pub interfaces: InterfaceContainer2D,
    /// Physical boundaries
    pub boundaries: BoundaryContainer2D,
    /// 2:1 mortars
    pub mortars: MortarContainer2D,
    /// Shock-capturing coefficients
    pub blending: BlendingCache,
    pub(crate) runner: StageRunner,
    pub(crate) staged_u: Vec<f64>,
    pub(crate) staged_du: Vec<f64>,
}

impl DGCache2D {
    /// Build the cache of `mesh` for `n_vars` variables on `basis`.
    pub fn new<M: MeshTopology2D + ?Sized>(
        mesh: &M,
        basis: &LobattoLegendreBasis,
        n_vars: usize,
        execution: Execution,
    ) -> Result<Self> {
        let n_nodes = basis.n_nodes();
        let connectivity = mesh.connectivity()?;

        let mut elements = ElementContainer2D::new(mesh, &basis.nodes, n_vars);
        let interfaces = InterfaceContainer2D::new(&connectivity.interfaces, n_nodes, n_vars);
        let boundaries = BoundaryContainer2D::new(&connectivity.boundaries, &elements);
        let mortars = MortarContainer2D::new(&connectivity.mortars, n_nodes, n_vars);
        elements.face_sources = face_sources(&elements, &interfaces, &boundaries, &mortars)?;
        let blending = blending_cache(elements.n_elements, &interfaces, &mortars);

        let [n_x, n_y] = count_by_orientation(&connectivity.interfaces);
        log::debug!(
            "DG cache: {} elements, {} interfaces ({n_x} x, {n_y} y), {} boundaries, {} mortars",
            elements.n_elements,
            interfaces.len(),
            boundaries.len(),
            mortars.len()
        );
        log::debug!("boundaries per direction: {}", boundaries.n_boundaries_per_direction);
        log::debug!("execution: {} (width {})", execution.name(), execution.width());

        Ok(Self {
            elements,
            interfaces,
            boundaries,
            mortars,
            blending,
            runner: StageRunner::new(execution, n_nodes, n_vars),
            staged_u: Vec::new(),
            staged_du: Vec::new(),
        })
    }

    /// Number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.n_elements
    }

    /// Execution strategy of this cache.
    #[inline]
    pub fn execution(&self) -> &Execution {
        self.runner.execution()
    }
}

/// Owner of every element face, with exactly one owner per face.
fn face_sources(
    elements: &ElementContainer2D,
    interfaces: &InterfaceContainer2D,
    boundaries: &BoundaryContainer2D,
    mortars: &MortarContainer2D,
) -> Result<Vec<FaceSource>> {
    let face_len = elements.n_nodes * elements.n_vars;
    let mut owners: Vec<Option<FaceSource>> = vec![None; elements.n_elements * 4];

    let mut claim = |element: usize, direction: Direction, buffer: FluxBuffer, offset: usize| {
        let slot = &mut owners[element * 4 + direction.index()];
        if slot.is_some() {
            return Err(DGError::DuplicateFaceOwner { element, direction });
        }
        *slot = Some(FaceSource { buffer, offset });
        Ok(())
    };

    for (s, &[left, right]) in interfaces.neighbor_ids.iter().enumerate() {
        let orientation = interfaces.orientations[s];
        let base = s * interfaces.stride();
        claim(left, orientation.positive(), FluxBuffer::Interfaces, base)?;
        claim(right, orientation.negative(), FluxBuffer::Interfaces, base + face_len)?;
    }

    for (b, &element) in boundaries.neighbor_ids.iter().enumerate() {
        let offset = b * boundaries.flux_stride();
        claim(element, boundaries.directions[b], FluxBuffer::Boundaries, offset)?;
    }

    for m in 0..mortars.len() {
        let (small, large) = face_directions(mortars.orientations[m], mortars.large_sides[m]);
        let base = m * mortars.flux_stride();
        for role in MortarRole::ALL {
            let direction = if role == MortarRole::Large { large } else { small };
            let offset = base + flux_offset(role, face_len);
            claim(mortars.element(m, role), direction, FluxBuffer::Mortars, offset)?;
        }
    }

    owners
        .into_iter()
        .enumerate()
        .map(|(idx, owner)| {
            owner.ok_or(DGError::MissingFaceOwner {
                element: idx / 4,
                direction: Direction::from_index(idx % 4),
            })
        })
        .collect()
}

/// Zeroed coefficients and the element neighbor graph in CSR form.
fn blending_cache(
    n_elements: usize,
    interfaces: &InterfaceContainer2D,
    mortars: &MortarContainer2D,
) -> BlendingCache {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for &[left, right] in &interfaces.neighbor_ids {
        if left != right {
            pairs.push((left, right));
        }
    }
    for &[lower, upper, large] in &mortars.neighbor_ids {
        pairs.push((large, lower));
        pairs.push((large, upper));
    }

    let mut counts = vec![0usize; n_elements];
    for &(a, b) in &pairs {
        counts[a] += 1;
        counts[b] += 1;
    }
    let mut neighbor_offsets = Vec::with_capacity(n_elements + 1);
    neighbor_offsets.push(0);
    for count in &counts {
        let last = neighbor_offsets[neighbor_offsets.len() - 1];
        neighbor_offsets.push(last + count);
    }

    let mut cursor = neighbor_offsets[..n_elements].to_vec();
    let mut neighbors = vec![0usize; pairs.len() * 2];
    for &(a, b) in &pairs {
        neighbors[cursor[a]] = b;
        cursor[a] += 1;
        neighbors[cursor[b]] = a;
        cursor[b] += 1;
    }

    BlendingCache {
        alpha: vec![0.0; n_elements],
        alpha_tmp: vec![0.0; n_elements],
        neighbor_offsets,
        neighbors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Connectivity2D, QuadLeafMesh};

    #[test]
    fn test_every_face_has_one_owner() {
        let mut mesh = QuadLeafMesh::uniform([0.0, 0.0], 1.0, 2, 2, [false, true]).unwrap();
        mesh.refine(0).unwrap();
        let basis = LobattoLegendreBasis::new(2).unwrap();
        let cache = DGCache2D::new(&mesh, &basis, 1, Execution::Serial).unwrap();

        assert_eq!(cache.elements.face_sources.len(), 4 * cache.n_elements());
        assert!(!cache.mortars.is_empty());
        assert!(!cache.boundaries.is_empty());
    }

    #[test]
    fn test_smoothing_graph_is_symmetric() {
        let mesh = QuadLeafMesh::uniform([0.0, 0.0], 1.0, 3, 1, [true, true]).unwrap();
        let basis = LobattoLegendreBasis::new(1).unwrap();
        let cache = DGCache2D::new(&mesh, &basis, 1, Execution::Serial).unwrap();

        for k in 0..3 {
            let mut neighbors = cache.blending.neighbors_of(k).to_vec();
            neighbors.sort_unstable();
            let expected: Vec<usize> = (0..3).filter(|&other| other != k).collect();
            assert_eq!(neighbors, expected, "element {k}");
        }
    }

    /// Mesh stub returning a hand-written connectivity.
    struct FixedMesh(Connectivity2D);

    impl MeshTopology2D for FixedMesh {
        fn n_elements(&self) -> usize {
            2
        }
        fn element_center(&self, element: usize) -> [f64; 2] {
            [element as f64 + 0.5, 0.5]
        }
        fn element_length(&self, _element: usize) -> f64 {
            1.0
        }
        fn periodicity(&self) -> [bool; 2] {
            [false, false]
        }
        fn connectivity(&self) -> Result<Connectivity2D> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_face_ownership_errors() {
        use crate::mesh::{BoundaryTopology, InterfaceTopology};
        use crate::types::Orientation;

        let basis = LobattoLegendreBasis::new(1).unwrap();
        let interface = InterfaceTopology {
            left: 0,
            right: 1,
            orientation: Orientation::X,
        };

        // Only one interface: every other face is uncovered
        let missing = FixedMesh(Connectivity2D {
            interfaces: vec![interface],
            ..Default::default()
        });
        let err = DGCache2D::new(&missing, &basis, 1, Execution::Serial).unwrap_err();
        assert!(matches!(err, DGError::MissingFaceOwner { element: 0, direction: Direction::NegX }));

        // A boundary on a face that the interface already owns
        let duplicate = FixedMesh(Connectivity2D {
            interfaces: vec![interface],
            boundaries: vec![BoundaryTopology {
                element: 0,
                direction: Direction::PosX,
            }],
            ..Default::default()
        });
        let err = DGCache2D::new(&duplicate, &basis, 1, Execution::Serial).unwrap_err();
        assert!(matches!(err, DGError::DuplicateFaceOwner { element: 0, direction: Direction::PosX }));
    }
}
