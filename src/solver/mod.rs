//! DG solver components.
//!
//! # Submodules
//!
//! - [`containers`]: per-face trace and flux storage (interfaces, boundaries, mortars)
//! - [`execution`]: serial, thread-parallel and device-style stage runners
//! - [`indicator`]: shock indicators for the blended volume integral
//!
//! The right-hand side is evaluated by [`DGSolver2D::rhs`] on a
//! [`DGCache2D`] built once per mesh.

mod boundary_flux;
mod cache;
pub mod containers;
mod dg2d;
pub mod execution;
pub mod indicator;
mod interface_flux;
mod mortar_flux;
mod pipeline;
mod solution;
mod surface_integral;
mod volume_integral;

pub use cache::DGCache2D;
pub use dg2d::DGSolver2D;
pub use execution::{Execution, Scratch, StageRunner};
pub use indicator::{
    ConstantIndicator, IndicatorHennemannGassner, IndicatorVariable, ShockIndicator,
};
pub use solution::Solution2D;
pub use volume_integral::{ALPHA_TOLERANCE, BlendingCache, VolumeIntegral};
