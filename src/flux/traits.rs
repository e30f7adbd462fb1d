//! Trait-based two-point flux abstraction.
//!
//! Numerical surface fluxes, volume fluxes for flux differencing and
//! finite-volume fluxes all share one signature: two states, an
//! orientation and the equation. Nonconservative terms get their own trait
//! because their argument order carries meaning.
//!
//! # Example
//! ```
//! use dg_tree::equations::LinearAdvection2D;
//! use dg_tree::flux::{FluxCentral, FluxLaxFriedrichs, TwoPointFlux};
//! use dg_tree::types::Orientation;
//!
//! let eq = LinearAdvection2D::new(1.0, 0.0);
//!
//! // Using concrete type
//! let central = FluxCentral.compute(&[1.0], &[3.0], Orientation::X, &eq);
//! assert_eq!(central, [2.0]);
//!
//! // Using trait object
//! let flux: &dyn TwoPointFlux<1, LinearAdvection2D> = &FluxLaxFriedrichs;
//! assert_eq!(flux.compute(&[1.0], &[3.0], Orientation::X, &eq), [1.0]);
//! ```

use crate::types::{Orientation, State};

/// A two-point flux `f*(u_ll, u_rr)` in the direction of `orientation`.
///
/// # Implementation Notes
///
/// - Fluxes should be consistent: f*(u, u) = f(u)
/// - Volume fluxes for flux differencing should also be symmetric:
///   f*(u_ll, u_rr) = f*(u_rr, u_ll)
/// - The `compute` method should not allocate memory
pub trait TwoPointFlux<const N: usize, E>: Send + Sync {
    /// Compute the flux between a left state and a right state.
    ///
    /// `u_ll` lies on the negative side of the face along `orientation`.
    fn compute(&self, u_ll: &State<N>, u_rr: &State<N>, orientation: Orientation, equation: &E)
    -> State<N>;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}

/// A nonconservative two-point term `n(u_own, u_other)`.
///
/// The first argument is always the state of the node (or face side)
/// receiving the contribution. Callers weight the result by `0.5`.
pub trait NonconservativeFlux<const N: usize, E>: Send + Sync {
    /// Compute the nonconservative term seen from `u_own`.
    fn compute(
        &self,
        u_own: &State<N>,
        u_other: &State<N>,
        orientation: Orientation,
        equation: &E,
    ) -> State<N>;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}
