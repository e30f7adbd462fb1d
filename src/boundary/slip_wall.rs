//! Slip wall for shallow water.

use crate::equations::ShallowWater2D;
use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::types::{Orientation, State};

use super::{BCContext2D, BoundaryCondition2D};

/// Reflective wall: the exterior state mirrors the interior with the
/// normal momentum negated, so the mass flux through the wall vanishes
/// for any consistent, symmetric numerical flux.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundaryConditionSlipWall;

impl BoundaryConditionSlipWall {
    /// Mirror state across a wall normal to `orientation`.
    #[inline]
    pub fn mirror(u_inner: &State<4>, orientation: Orientation) -> State<4> {
        let [h, hv1, hv2, b] = *u_inner;
        match orientation {
            Orientation::X => [h, -hv1, hv2, b],
            Orientation::Y => [h, hv1, -hv2, b],
        }
    }
}

impl BoundaryCondition2D<4, ShallowWater2D> for BoundaryConditionSlipWall {
    fn surface_flux(
        &self,
        u_inner: &State<4>,
        ctx: &BCContext2D,
        surface_flux: &dyn TwoPointFlux<4, ShallowWater2D>,
        equation: &ShallowWater2D,
    ) -> State<4> {
        let u_boundary = Self::mirror(u_inner, ctx.orientation);
        let (u_ll, u_rr) = ctx.ordered(u_inner, &u_boundary);
        surface_flux.compute(u_ll, u_rr, ctx.orientation, equation)
    }

    fn nonconservative_flux(
        &self,
        u_inner: &State<4>,
        ctx: &BCContext2D,
        nonconservative_flux: &dyn NonconservativeFlux<4, ShallowWater2D>,
        equation: &ShallowWater2D,
    ) -> State<4> {
        let u_boundary = Self::mirror(u_inner, ctx.orientation);
        nonconservative_flux.compute(u_inner, &u_boundary, ctx.orientation, equation)
    }

    fn name(&self) -> &'static str {
        "slip_wall"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{FluxLaxFriedrichs, FluxWintermeyerEtAl};
    use crate::types::Direction;

    #[test]
    fn test_no_mass_flux_through_wall() {
        let swe = ShallowWater2D::new(9.81);
        let inner = swe.from_primitives(1.5, 0.7, -0.2, 0.1);
        for direction in Direction::ALL {
            let ctx = BCContext2D::new(0.0, [0.0, 0.0], direction);
            let ec = BoundaryConditionSlipWall.surface_flux(&inner, &ctx, &FluxWintermeyerEtAl, &swe);
            assert!(ec[0].abs() < 1e-14, "{direction}: mass flux {}", ec[0]);
            let lf = BoundaryConditionSlipWall.surface_flux(&inner, &ctx, &FluxLaxFriedrichs, &swe);
            assert!(lf[0].abs() < 1e-14, "{direction}: mass flux {}", lf[0]);
        }
    }
}
