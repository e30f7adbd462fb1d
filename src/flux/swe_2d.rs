//! Entropy-conservative, well-balanced two-point fluxes for 2D shallow water.
//!
//! The pair below discretizes the flux divergence and the topography
//! gradient `gh ∇b` together. Used as volume flux for flux differencing
//! (and as surface flux) they keep the lake at rest `h + b = const, v = 0`
//! exactly steady on conforming meshes with a continuous bottom.
//!
//! Reference: Wintermeyer, Winters, Gassner, Kopriva (2017), "An entropy
//! stable nodal discontinuous Galerkin method for the two dimensional
//! shallow water equations on unstructured curvilinear meshes with
//! discontinuous bathymetry".

use crate::equations::ShallowWater2D;
use crate::types::{Orientation, State};

use super::{NonconservativeFlux, TwoPointFlux};

/// Entropy-conservative flux of Wintermeyer et al.
///
/// Arithmetic means of momenta and velocities, with the pressure replaced
/// by the product mean `½ g h_ll h_rr`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FluxWintermeyerEtAl;

impl TwoPointFlux<4, ShallowWater2D> for FluxWintermeyerEtAl {
    #[inline]
    fn compute(
        &self,
        u_ll: &State<4>,
        u_rr: &State<4>,
        orientation: Orientation,
        equation: &ShallowWater2D,
    ) -> State<4> {
        let (v1_ll, v2_ll) = equation.velocity(u_ll);
        let (v1_rr, v2_rr) = equation.velocity(u_rr);

        let hv1_avg = 0.5 * (u_ll[1] + u_rr[1]);
        let hv2_avg = 0.5 * (u_ll[2] + u_rr[2]);
        let v1_avg = 0.5 * (v1_ll + v1_rr);
        let v2_avg = 0.5 * (v2_ll + v2_rr);
        let p_avg = 0.5 * equation.gravity * u_ll[0] * u_rr[0];

        match orientation {
            Orientation::X => [hv1_avg, hv1_avg * v1_avg + p_avg, hv1_avg * v2_avg, 0.0],
            Orientation::Y => [hv2_avg, hv2_avg * v1_avg, hv2_avg * v2_avg + p_avg, 0.0],
        }
    }

    fn name(&self) -> &'static str {
        "wintermeyer_etal"
    }
}

/// Nonconservative topography term `g h_own (b_other - b_own)`.
///
/// Only the momentum component along `orientation` is nonzero.
#[derive(Clone, Copy, Debug, Default)]
pub struct FluxNonconservativeWintermeyerEtAl;

impl NonconservativeFlux<4, ShallowWater2D> for FluxNonconservativeWintermeyerEtAl {
    #[inline]
    fn compute(
        &self,
        u_own: &State<4>,
        u_other: &State<4>,
        orientation: Orientation,
        equation: &ShallowWater2D,
    ) -> State<4> {
        let jump = equation.gravity * u_own[0] * (u_other[3] - u_own[3]);
        match orientation {
            Orientation::X => [0.0, jump, 0.0, 0.0],
            Orientation::Y => [0.0, 0.0, jump, 0.0],
        }
    }

    fn name(&self) -> &'static str {
        "nonconservative_wintermeyer_etal"
    }
}
