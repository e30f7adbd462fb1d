//! Dirichlet boundary condition.

use std::marker::PhantomData;

use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::types::State;

use super::{BCContext2D, BoundaryCondition2D};

/// Dirichlet boundary condition: the exterior state is a prescribed
/// function of position and time.
///
/// The flux is the numerical flux between interior and exterior state,
/// ordered by the side of the face the interior occupies.
///
/// # Example
/// ```
/// use dg_tree::boundary::BoundaryConditionDirichlet;
/// use dg_tree::equations::LinearAdvection2D;
///
/// // Inflow of a travelling sine wave
/// let bc = BoundaryConditionDirichlet::<1, LinearAdvection2D, _>::new(|x: [f64; 2], t: f64| {
///     [(x[0] + x[1] - 2.0 * t).sin()]
/// });
/// ```
pub struct BoundaryConditionDirichlet<const N: usize, E, F> {
    boundary_value: F,
    _equation: PhantomData<fn(&E)>,
}

impl<const N: usize, E, F> BoundaryConditionDirichlet<N, E, F>
where
    F: Fn([f64; 2], f64) -> State<N> + Send + Sync,
{
    /// Create from the exterior state function `(x, t) -> u`.
    pub fn new(boundary_value: F) -> Self {
        Self {
            boundary_value,
            _equation: PhantomData,
        }
    }

    /// Exterior state at a boundary node.
    #[inline]
    pub fn boundary_state(&self, ctx: &BCContext2D) -> State<N> {
        (self.boundary_value)(ctx.position, ctx.time)
    }
}

impl<const N: usize, E, F> BoundaryCondition2D<N, E> for BoundaryConditionDirichlet<N, E, F>
where
    F: Fn([f64; 2], f64) -> State<N> + Send + Sync,
{
    fn surface_flux(
        &self,
        u_inner: &State<N>,
        ctx: &BCContext2D,
        surface_flux: &dyn TwoPointFlux<N, E>,
        equation: &E,
    ) -> State<N> {
        let u_boundary = self.boundary_state(ctx);
        let (u_ll, u_rr) = ctx.ordered(u_inner, &u_boundary);
        surface_flux.compute(u_ll, u_rr, ctx.orientation, equation)
    }

    fn nonconservative_flux(
        &self,
        u_inner: &State<N>,
        ctx: &BCContext2D,
        nonconservative_flux: &dyn NonconservativeFlux<N, E>,
        equation: &E,
    ) -> State<N> {
        let u_boundary = self.boundary_state(ctx);
        nonconservative_flux.compute(u_inner, &u_boundary, ctx.orientation, equation)
    }

    fn name(&self) -> &'static str {
        "dirichlet"
    }
}
