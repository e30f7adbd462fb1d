//! Conservation law abstractions.
//!
//! Provides a trait-based interface for 2D hyperbolic conservation laws:
//!
//! ∂u/∂t + ∂f(u)/∂x + ∂g(u)/∂y = s(u, x, t)
//!
//! where u is the state vector of `N` variables, f and g are the physical
//! fluxes in x and y, and s is a source term.

mod advection_2d;
mod burgers_2d;
mod shallow_water_2d;

pub use advection_2d::LinearAdvection2D;
pub use burgers_2d::InviscidBurgers2D;
pub use shallow_water_2d::ShallowWater2D;

use crate::types::{Orientation, State};

/// A hyperbolic conservation law in 2D with `N` variables.
///
/// Implementations must be thread-safe (`Send + Sync`) since every stage
/// of the right-hand side may evaluate fluxes on several workers at once.
///
/// # Example
///
/// ```
/// use dg_tree::equations::{ConservationLaw2D, LinearAdvection2D};
/// use dg_tree::types::Orientation;
///
/// let advection = LinearAdvection2D::new(1.0, -2.0);
/// assert_eq!(advection.flux(&[3.0], Orientation::X), [3.0]);
/// assert_eq!(advection.flux(&[3.0], Orientation::Y), [-6.0]);
/// ```
pub trait ConservationLaw2D<const N: usize>: Send + Sync {
    /// Physical flux in the direction of `orientation`.
    fn flux(&self, u: &State<N>, orientation: Orientation) -> State<N>;

    /// Upper bound on the wave speed between two states, used by Rusanov
    /// dissipation.
    fn max_abs_speed_naive(&self, u_ll: &State<N>, u_rr: &State<N>, orientation: Orientation)
    -> f64;

    /// Largest wave speeds `(λx, λy)` at a state, used for the time step.
    fn max_abs_speeds(&self, u: &State<N>) -> [f64; 2];

    /// Local Lax-Friedrichs dissipation `-½ λ (u_rr - u_ll)`.
    ///
    /// Laws carrying auxiliary (non-evolving) variables override this to
    /// leave those variables untouched.
    #[inline]
    fn dissipation(&self, u_ll: &State<N>, u_rr: &State<N>, lambda: f64) -> State<N> {
        std::array::from_fn(|v| -0.5 * lambda * (u_rr[v] - u_ll[v]))
    }

    /// Names of the variables, for logging.
    fn variable_names(&self) -> [&'static str; N];

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}
