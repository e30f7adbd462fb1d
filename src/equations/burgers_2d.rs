//! 2D inviscid Burgers' equation.
//!
//! ∂u/∂t + ∂(u²/2)/∂x + ∂(u²/2)/∂y = 0
//!
//! The simplest nonlinear scalar law; it develops shocks from smooth data
//! and is the usual test bed for shock capturing.

use crate::types::{Orientation, State};

use super::ConservationLaw2D;

/// 2D inviscid Burgers' equation with flux `u²/2` in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct InviscidBurgers2D;

impl InviscidBurgers2D {
    /// Create the equation.
    pub fn new() -> Self {
        Self
    }

    /// Square entropy `u²/2`.
    #[inline]
    pub fn entropy(&self, u: &State<1>) -> f64 {
        0.5 * u[0] * u[0]
    }
}

impl ConservationLaw2D<1> for InviscidBurgers2D {
    #[inline]
    fn flux(&self, u: &State<1>, _orientation: Orientation) -> State<1> {
        [0.5 * u[0] * u[0]]
    }

    #[inline]
    fn max_abs_speed_naive(&self, u_ll: &State<1>, u_rr: &State<1>, _orientation: Orientation) -> f64 {
        u_ll[0].abs().max(u_rr[0].abs())
    }

    fn max_abs_speeds(&self, u: &State<1>) -> [f64; 2] {
        [u[0].abs(), u[0].abs()]
    }

    fn variable_names(&self) -> [&'static str; 1] {
        ["scalar"]
    }

    fn name(&self) -> &'static str {
        "inviscid_burgers_2d"
    }
}
