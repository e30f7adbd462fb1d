//! 2D scalar advection equation.
//!
//! The 2D linear advection equation:
//!
//! ∂u/∂t + ∇ · (a u) = 0
//!
//! where a = (a_x, a_y) is the constant advection velocity vector.

use crate::types::{Orientation, State};

use super::ConservationLaw2D;

/// 2D linear advection equation.
///
/// du/dt + a_x * du/dx + a_y * du/dy = 0
///
/// With `a = (1, 1)` the flux is the identity in both directions.
#[derive(Clone, Debug)]
pub struct LinearAdvection2D {
    /// Advection velocity in x-direction
    pub velocity_x: f64,
    /// Advection velocity in y-direction
    pub velocity_y: f64,
}

impl LinearAdvection2D {
    /// Create a new 2D advection equation with given velocity components.
    pub fn new(velocity_x: f64, velocity_y: f64) -> Self {
        Self {
            velocity_x,
            velocity_y,
        }
    }

    /// Velocity component along `orientation`.
    #[inline]
    pub fn velocity(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::X => self.velocity_x,
            Orientation::Y => self.velocity_y,
        }
    }
}

impl ConservationLaw2D<1> for LinearAdvection2D {
    #[inline]
    fn flux(&self, u: &State<1>, orientation: Orientation) -> State<1> {
        [self.velocity(orientation) * u[0]]
    }

    #[inline]
    fn max_abs_speed_naive(&self, _u_ll: &State<1>, _u_rr: &State<1>, orientation: Orientation) -> f64 {
        self.velocity(orientation).abs()
    }

    fn max_abs_speeds(&self, _u: &State<1>) -> [f64; 2] {
        [self.velocity_x.abs(), self.velocity_y.abs()]
    }

    fn variable_names(&self) -> [&'static str; 1] {
        ["scalar"]
    }

    fn name(&self) -> &'static str {
        "linear_advection_2d"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_per_orientation() {
        let eq = LinearAdvection2D::new(2.0, -0.5);
        assert_eq!(eq.flux(&[4.0], Orientation::X), [8.0]);
        assert_eq!(eq.flux(&[4.0], Orientation::Y), [-2.0]);
        assert_eq!(eq.max_abs_speeds(&[4.0]), [2.0, 0.5]);
    }

    #[test]
    fn test_default_dissipation() {
        let eq = LinearAdvection2D::new(1.0, 1.0);
        let diss = eq.dissipation(&[1.0], &[3.0], 2.0);
        assert_eq!(diss, [-2.0]);
    }
}
