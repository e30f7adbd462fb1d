//! Numerical flux functions.
//!
//! Provides two-point fluxes for DG discretizations:
//! - Generic fluxes: central, local Lax-Friedrichs (Rusanov)
//! - Entropy-conservative volume fluxes for Burgers and shallow water
//! - The shallow water topography term as a nonconservative flux
//!
//! # Flux Traits
//!
//! [`TwoPointFlux`] covers surface, volume and finite-volume fluxes alike;
//! [`NonconservativeFlux`] covers asymmetric terms that cannot be written
//! as a flux difference.

mod burgers_2d;
mod standard;
mod swe_2d;
mod traits;

pub use burgers_2d::FluxEcBurgers;
pub use standard::{FluxCentral, FluxLaxFriedrichs};
pub use swe_2d::{FluxNonconservativeWintermeyerEtAl, FluxWintermeyerEtAl};
pub use traits::{NonconservativeFlux, TwoPointFlux};
