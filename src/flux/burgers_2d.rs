//! Entropy-conservative flux for inviscid Burgers.

use crate::equations::InviscidBurgers2D;
use crate::types::{Orientation, State};

use super::TwoPointFlux;

/// Entropy-conservative flux `(u_ll² + u_ll u_rr + u_rr²) / 6` for the
/// square entropy, identical in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct FluxEcBurgers;

impl TwoPointFlux<1, InviscidBurgers2D> for FluxEcBurgers {
    #[inline]
    fn compute(
        &self,
        u_ll: &State<1>,
        u_rr: &State<1>,
        _orientation: Orientation,
        _equation: &InviscidBurgers2D,
    ) -> State<1> {
        let (a, b) = (u_ll[0], u_rr[0]);
        [(a * a + a * b + b * b) / 6.0]
    }

    fn name(&self) -> &'static str {
        "ec_burgers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_conservation_condition() {
        // (w_rr - w_ll) f* = ψ_rr - ψ_ll with w = u, ψ = u³/6
        let eq = InviscidBurgers2D::new();
        for &(a, b) in &[(1.0, 2.0), (-0.5, 0.7), (3.0, -1.0)] {
            let f = FluxEcBurgers.compute(&[a], &[b], Orientation::X, &eq)[0];
            let lhs = (b - a) * f;
            let rhs = (b * b * b - a * a * a) / 6.0;
            assert!((lhs - rhs).abs() < 1e-13, "{a}, {b}: {lhs} vs {rhs}");
        }
    }
}
