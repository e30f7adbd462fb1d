//! 2D Shallow Water Equations with bottom topography.
//!
//! ∂h/∂t + ∂(hv₁)/∂x + ∂(hv₂)/∂y = 0                                   (mass)
//! ∂(hv₁)/∂t + ∂(hv₁² + gh²/2)/∂x + ∂(hv₁v₂)/∂y = -gh ∂b/∂x            (x-momentum)
//! ∂(hv₂)/∂t + ∂(hv₁v₂)/∂x + ∂(hv₂² + gh²/2)/∂y = -gh ∂b/∂y            (y-momentum)
//!
//! where:
//! - h = water depth
//! - v₁, v₂ = depth-averaged velocities
//! - b = bottom topography
//! - g = gravitational acceleration
//!
//! The bottom `b` is carried as a fourth variable with zero flux so that the
//! topography gradient term can be discretized as a nonconservative
//! two-point term alongside the flux (see
//! [`FluxNonconservativeWintermeyerEtAl`](crate::flux::FluxNonconservativeWintermeyerEtAl)).
//!
//! # Flux formulation
//!
//! F(u) = [hv₁, hv₁² + gh²/2, hv₁v₂, 0]ᵀ  (x-direction flux)
//! G(u) = [hv₂, hv₁v₂, hv₂² + gh²/2, 0]ᵀ  (y-direction flux)

use crate::types::{Orientation, State};

use super::ConservationLaw2D;

/// 2D Shallow Water Equations, variables `(h, hv₁, hv₂, b)`.
///
/// # Example
///
/// ```
/// use dg_tree::equations::{ConservationLaw2D, ShallowWater2D};
/// use dg_tree::types::Orientation;
///
/// let swe = ShallowWater2D::new(9.81);
/// let u = swe.from_primitives(2.0, 1.0, 0.0, -1.0);
/// let f = swe.flux(&u, Orientation::X);
/// assert!((f[1] - (2.0 + 0.5 * 9.81 * 4.0)).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct ShallowWater2D {
    /// Gravitational acceleration
    pub gravity: f64,
}

impl ShallowWater2D {
    /// Create 2D shallow water equations with gravity `g`.
    pub fn new(gravity: f64) -> Self {
        Self { gravity }
    }

    /// Create with standard gravity (9.81 m/s²).
    pub fn standard() -> Self {
        Self::new(9.81)
    }

    /// Build a conservative state from depth, velocities and bottom.
    #[inline]
    pub fn from_primitives(&self, h: f64, v1: f64, v2: f64, b: f64) -> State<4> {
        [h, h * v1, h * v2, b]
    }

    /// Velocities `(v₁, v₂)`.
    #[inline]
    pub fn velocity(&self, u: &State<4>) -> (f64, f64) {
        (u[1] / u[0], u[2] / u[0])
    }

    /// Wave celerity c = sqrt(gh).
    #[inline]
    pub fn celerity(&self, h: f64) -> f64 {
        (self.gravity * h.max(0.0)).sqrt()
    }
}

impl ConservationLaw2D<4> for ShallowWater2D {
    #[inline]
    fn flux(&self, u: &State<4>, orientation: Orientation) -> State<4> {
        let [h, hv1, hv2, _] = *u;
        let (v1, v2) = self.velocity(u);
        let p = 0.5 * self.gravity * h * h;
        match orientation {
            Orientation::X => [hv1, hv1 * v1 + p, hv1 * v2, 0.0],
            Orientation::Y => [hv2, hv2 * v1, hv2 * v2 + p, 0.0],
        }
    }

    #[inline]
    fn max_abs_speed_naive(&self, u_ll: &State<4>, u_rr: &State<4>, orientation: Orientation) -> f64 {
        let normal_velocity = |u: &State<4>| match orientation {
            Orientation::X => u[1] / u[0],
            Orientation::Y => u[2] / u[0],
        };
        let speed_ll = normal_velocity(u_ll).abs() + self.celerity(u_ll[0]);
        let speed_rr = normal_velocity(u_rr).abs() + self.celerity(u_rr[0]);
        speed_ll.max(speed_rr)
    }

    fn max_abs_speeds(&self, u: &State<4>) -> [f64; 2] {
        let (v1, v2) = self.velocity(u);
        let c = self.celerity(u[0]);
        [v1.abs() + c, v2.abs() + c]
    }

    /// No dissipation on the bottom topography.
    #[inline]
    fn dissipation(&self, u_ll: &State<4>, u_rr: &State<4>, lambda: f64) -> State<4> {
        [
            -0.5 * lambda * (u_rr[0] - u_ll[0]),
            -0.5 * lambda * (u_rr[1] - u_ll[1]),
            -0.5 * lambda * (u_rr[2] - u_ll[2]),
            0.0,
        ]
    }

    fn variable_names(&self) -> [&'static str; 4] {
        ["h", "h_v1", "h_v2", "b"]
    }

    fn name(&self) -> &'static str {
        "shallow_water_2d"
    }
}
