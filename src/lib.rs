//! # dg-tree
//!
//! Discontinuous Galerkin spatial discretization of 2D hyperbolic
//! conservation laws on 2:1-balanced quadtree meshes.
//!
//! This crate provides:
//! - Polynomial basis functions and Gauss-Lobatto quadrature
//! - DG operators (differentiation, L2 mortars)
//! - Quadtree leaf meshes with conforming and 2:1 nonconforming faces
//! - Numerical fluxes, including entropy-conservative volume fluxes
//! - Weak-form, flux-differencing, shock-capturing and finite-volume
//!   volume integrals
//! - Serial, thread-parallel and device-style execution of every stage
//!
//! # Example
//! ```
//! use dg_tree::{DGSolver2D, Execution, FluxLaxFriedrichs, LinearAdvection2D, QuadLeafMesh};
//! use dg_tree::Solution2D;
//!
//! let mut mesh = QuadLeafMesh::uniform([0.0, 0.0], 0.5, 2, 2, [true, true]).unwrap();
//! mesh.refine(0).unwrap();
//!
//! let solver = DGSolver2D::<1, _>::new(LinearAdvection2D::new(1.0, 1.0), 3, FluxLaxFriedrichs)
//!     .unwrap();
//! let mut cache = solver.create_cache(&mesh, Execution::Serial).unwrap();
//!
//! // Constant states are steady
//! let u = solver.compute_coefficients(|_, _| [2.0], 0.0, &cache);
//! let mut du = Solution2D::zeros(u.n_elements, u.n_nodes);
//! solver.rhs(&mut du, &u, 0.0, &mut cache);
//! assert!(du.max_abs() < 1e-12);
//! ```

pub mod basis;
pub mod boundary;
pub mod equations;
pub mod error;
pub mod flux;
pub mod mesh;
pub mod operators;
pub mod polynomial;
pub mod solver;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use basis::LobattoLegendreBasis;
pub use boundary::{
    BCContext2D, BoundaryCondition2D, BoundaryConditionDirichlet, BoundaryConditionSlipWall,
    BoundaryConditions2D,
};
pub use equations::{ConservationLaw2D, InviscidBurgers2D, LinearAdvection2D, ShallowWater2D};
pub use error::{DGError, Result};
pub use flux::{
    FluxCentral, FluxEcBurgers, FluxLaxFriedrichs, FluxNonconservativeWintermeyerEtAl,
    FluxWintermeyerEtAl, NonconservativeFlux, TwoPointFlux,
};
pub use mesh::{MeshTopology2D, QuadLeafMesh};
pub use solver::{
    ConstantIndicator, DGCache2D, DGSolver2D, Execution, IndicatorHennemannGassner,
    ShockIndicator, Solution2D, VolumeIntegral,
};
pub use source::{CombinedSource2D, FnSource2D, SourceContext2D, SourceTerm2D};
pub use types::{Direction, DirectionMap, Orientation, Side, State};
