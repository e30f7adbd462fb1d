//! Equation-agnostic two-point fluxes.

use crate::equations::ConservationLaw2D;
use crate::types::{Orientation, State};

use super::TwoPointFlux;

/// Central flux: arithmetic mean of the physical fluxes.
///
/// Symmetric and consistent, so it is a valid volume flux for flux
/// differencing (which then reproduces the weak form for linear fluxes).
#[derive(Clone, Copy, Debug, Default)]
pub struct FluxCentral;

impl<const N: usize, E: ConservationLaw2D<N>> TwoPointFlux<N, E> for FluxCentral {
    #[inline]
    fn compute(&self, u_ll: &State<N>, u_rr: &State<N>, orientation: Orientation, equation: &E)
    -> State<N> {
        let f_ll = equation.flux(u_ll, orientation);
        let f_rr = equation.flux(u_rr, orientation);
        std::array::from_fn(|v| 0.5 * (f_ll[v] + f_rr[v]))
    }

    fn name(&self) -> &'static str {
        "central"
    }
}

/// Local Lax-Friedrichs (Rusanov) flux.
///
/// F* = ½(f(u_ll) + f(u_rr)) - ½ λ (u_rr - u_ll), with
/// λ = max wave speed of the two states.
#[derive(Clone, Copy, Debug, Default)]
pub struct FluxLaxFriedrichs;

impl<const N: usize, E: ConservationLaw2D<N>> TwoPointFlux<N, E> for FluxLaxFriedrichs {
    #[inline]
    fn compute(&self, u_ll: &State<N>, u_rr: &State<N>, orientation: Orientation, equation: &E)
    -> State<N> {
        let f_ll = equation.flux(u_ll, orientation);
        let f_rr = equation.flux(u_rr, orientation);
        let lambda = equation.max_abs_speed_naive(u_ll, u_rr, orientation);
        let diss = equation.dissipation(u_ll, u_rr, lambda);
        std::array::from_fn(|v| 0.5 * (f_ll[v] + f_rr[v]) + diss[v])
    }

    fn name(&self) -> &'static str {
        "lax_friedrichs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{InviscidBurgers2D, ShallowWater2D};

    #[test]
    fn test_consistency() {
        let swe = ShallowWater2D::standard();
        let u = swe.from_primitives(2.0, 0.5, -0.3, 0.1);
        for orientation in Orientation::ALL {
            let exact = swe.flux(&u, orientation);
            let central = FluxCentral.compute(&u, &u, orientation, &swe);
            let rusanov = FluxLaxFriedrichs.compute(&u, &u, orientation, &swe);
            for v in 0..4 {
                assert!((central[v] - exact[v]).abs() < 1e-13);
                assert!((rusanov[v] - exact[v]).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn test_lax_friedrichs_upwinds_burgers() {
        // Right-moving shock: flux is bounded by the upwind flux plus dissipation
        let eq = InviscidBurgers2D::new();
        let flux = FluxLaxFriedrichs.compute(&[2.0], &[0.0], Orientation::X, &eq);
        // ½(2 + 0) - ½·2·(0 - 2) = 3
        assert!((flux[0] - 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_lax_friedrichs_leaves_bottom_alone() {
        let swe = ShallowWater2D::standard();
        let u_ll = swe.from_primitives(1.0, 0.0, 0.0, 0.0);
        let u_rr = swe.from_primitives(1.0, 0.0, 0.0, 0.5);
        let flux = FluxLaxFriedrichs.compute(&u_ll, &u_rr, Orientation::Y, &swe);
        assert_eq!(flux[3], 0.0);
    }
}
