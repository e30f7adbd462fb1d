//! Shock indicators for the blended volume integral.
//!
//! An indicator assigns every element a blending coefficient α ∈ [0, 1]:
//! α = 0 keeps the high-order flux-differencing volume term, α = 1 replaces
//! it by the first-order finite-volume term.

use crate::basis::LobattoLegendreBasis;
use crate::error::{DGError, Result};
use crate::types::State;

use super::execution::Scratch;
use super::solution::node_state;

/// Blending coefficient per element.
pub trait ShockIndicator<const N: usize>: Send + Sync {
    /// α for one element block (`K² N` values in solution layout).
    fn element_alpha(
        &self,
        element: &[f64],
        basis: &LobattoLegendreBasis,
        scratch: &mut Scratch,
    ) -> f64;

    /// Whether α is smoothed across neighbors after evaluation.
    fn smoothing(&self) -> bool {
        false
    }

    /// Name for logging.
    fn name(&self) -> &'static str;
}

// ============================================================================
// Constant indicator
// ============================================================================

/// The same α on every element.
#[derive(Clone, Copy, Debug)]
pub struct ConstantIndicator {
    alpha: f64,
}

impl ConstantIndicator {
    /// Indicator returning `alpha` everywhere.
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(DGError::InvalidConfig(format!(
                "blending coefficient {alpha} outside [0, 1]"
            )));
        }
        Ok(Self { alpha })
    }

    /// The constant α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl<const N: usize> ShockIndicator<N> for ConstantIndicator {
    fn element_alpha(
        &self,
        _element: &[f64],
        _basis: &LobattoLegendreBasis,
        _scratch: &mut Scratch,
    ) -> f64 {
        self.alpha
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

// ============================================================================
// Hennemann-Gassner modal energy indicator
// ============================================================================

/// Scalar quantity the modal indicator inspects.
pub type IndicatorVariable<const N: usize> = Box<dyn Fn(&State<N>) -> f64 + Send + Sync>;

/// Modal energy indicator of Hennemann, Winters and Gassner (2021).
///
/// The indicator variable is expanded in normalized Legendre modes; the
/// share of energy in the highest one or two modes is mapped to α through
/// a logistic function centered at `0.5 · 10^(−1.8 K^0.25)`.
pub struct IndicatorHennemannGassner<const N: usize> {
    alpha_max: f64,
    alpha_min: f64,
    alpha_smooth: bool,
    variable: IndicatorVariable<N>,
}

impl<const N: usize> IndicatorHennemannGassner<N> {
    /// Indicator on `variable` with the default parameters
    /// (`alpha_max = 0.5`, `alpha_min = 0.001`, smoothing on).
    pub fn new<F>(variable: F) -> Self
    where
        F: Fn(&State<N>) -> f64 + Send + Sync + 'static,
    {
        Self {
            alpha_max: 0.5,
            alpha_min: 0.001,
            alpha_smooth: true,
            variable: Box::new(variable),
        }
    }

    /// Set the upper cap on α.
    pub fn with_alpha_max(mut self, alpha_max: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha_max) {
            return Err(DGError::InvalidConfig(format!(
                "alpha_max {alpha_max} outside [0, 1]"
            )));
        }
        self.alpha_max = alpha_max;
        Ok(self)
    }

    /// Set the cutoff below which α is zero.
    pub fn with_alpha_min(mut self, alpha_min: f64) -> Result<Self> {
        if !(0.0..0.5).contains(&alpha_min) {
            return Err(DGError::InvalidConfig(format!(
                "alpha_min {alpha_min} outside [0, 0.5)"
            )));
        }
        self.alpha_min = alpha_min;
        Ok(self)
    }

    /// Enable or disable neighbor smoothing.
    pub fn with_alpha_smooth(mut self, alpha_smooth: bool) -> Self {
        self.alpha_smooth = alpha_smooth;
        self
    }

    /// Energy threshold for `n_nodes` nodes per direction.
    pub fn threshold(n_nodes: usize) -> f64 {
        0.5 * 10f64.powf(-1.8 * (n_nodes as f64).powf(0.25))
    }

    /// Map a modal energy ratio to α.
    pub fn alpha_from_energy(&self, energy: f64, n_nodes: usize) -> f64 {
        let threshold = Self::threshold(n_nodes);
        let parameter_s = ((1.0 - 1e-4) / 1e-4_f64).ln();

        let mut alpha = 1.0 / (1.0 + (-parameter_s / threshold * (energy - threshold)).exp());
        if alpha < self.alpha_min {
            alpha = 0.0;
        } else if alpha > 1.0 - self.alpha_min {
            alpha = 1.0;
        }
        alpha.min(self.alpha_max)
    }
}

impl<const N: usize> ShockIndicator<N> for IndicatorHennemannGassner<N> {
    fn element_alpha(
        &self,
        element: &[f64],
        basis: &LobattoLegendreBasis,
        scratch: &mut Scratch,
    ) -> f64 {
        let n = basis.n_nodes();
        let v_inv = &basis.vandermonde.v_inv;

        for j in 0..n {
            for i in 0..n {
                scratch.indicator[j * n + i] = (self.variable)(&node_state::<N>(element, n, i, j));
            }
        }

        // Modal transform along x, then along y
        for j in 0..n {
            for i in 0..n {
                scratch.modal_tmp[j * n + i] =
                    (0..n).map(|ii| v_inv[(i, ii)] * scratch.indicator[j * n + ii]).sum();
            }
        }
        for j in 0..n {
            for i in 0..n {
                scratch.modal[j * n + i] =
                    (0..n).map(|jj| v_inv[(j, jj)] * scratch.modal_tmp[jj * n + i]).sum();
            }
        }

        let mut total_energy = 0.0;
        let mut total_energy_clip1 = 0.0;
        let mut total_energy_clip2 = 0.0;
        for j in 0..n {
            for i in 0..n {
                let energy = scratch.modal[j * n + i].powi(2);
                total_energy += energy;
                if i + 1 < n && j + 1 < n {
                    total_energy_clip1 += energy;
                }
                if i + 2 < n && j + 2 < n {
                    total_energy_clip2 += energy;
                }
            }
        }

        let energy_frac_1 = if total_energy == 0.0 {
            0.0
        } else {
            (total_energy - total_energy_clip1) / total_energy
        };
        let energy_frac_2 = if total_energy_clip1 == 0.0 {
            0.0
        } else {
            (total_energy_clip1 - total_energy_clip2) / total_energy_clip1
        };

        self.alpha_from_energy(energy_frac_1.max(energy_frac_2), n)
    }

    fn smoothing(&self) -> bool {
        self.alpha_smooth
    }

    fn name(&self) -> &'static str {
        "hennemann_gassner"
    }
}

/// Smoothed α of one element: `max(α_k, ½ max α_neighbor)`.
#[inline]
pub(crate) fn smoothed_alpha(alpha_tmp: &[f64], element: usize, neighbors: &[usize]) -> f64 {
    neighbors
        .iter()
        .fold(alpha_tmp[element], |alpha, &nb| alpha.max(0.5 * alpha_tmp[nb]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_from<F: Fn(f64, f64) -> f64>(basis: &LobattoLegendreBasis, f: F) -> Vec<f64> {
        let n = basis.n_nodes();
        let mut element = vec![0.0; n * n];
        for j in 0..n {
            for i in 0..n {
                element[j * n + i] = f(basis.nodes[i], basis.nodes[j]);
            }
        }
        element
    }

    #[test]
    fn test_smooth_data_gives_zero_alpha() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let mut scratch = Scratch::new(4, 1);
        let indicator = IndicatorHennemannGassner::<1>::new(|u| u[0]);

        let constant = element_from(&basis, |_, _| 2.0);
        let linear = element_from(&basis, |x, y| 1.0 + 0.1 * x - 0.2 * y);
        for element in [constant, linear] {
            let alpha = indicator.element_alpha(&element, &basis, &mut scratch);
            assert_eq!(alpha, 0.0, "smooth data must not be flagged, got {alpha}");
        }
    }

    #[test]
    fn test_zero_data_gives_zero_alpha() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let mut scratch = Scratch::new(4, 1);
        let indicator = IndicatorHennemannGassner::<1>::new(|u| u[0]);
        let alpha = indicator.element_alpha(&[0.0; 16], &basis, &mut scratch);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_discontinuity_is_capped_at_alpha_max() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let mut scratch = Scratch::new(4, 1);
        let indicator = IndicatorHennemannGassner::<1>::new(|u| u[0]);

        let jump = element_from(&basis, |x, _| if x < 0.0 { 1.0 } else { 0.0 });
        let alpha = indicator.element_alpha(&jump, &basis, &mut scratch);
        assert!((alpha - 0.5).abs() < 1e-14, "jump should saturate at alpha_max, got {alpha}");

        let uncapped = IndicatorHennemannGassner::<1>::new(|u| u[0])
            .with_alpha_max(1.0)
            .unwrap();
        let alpha = uncapped.element_alpha(&jump, &basis, &mut scratch);
        assert!(alpha > 0.5 && alpha <= 1.0, "uncapped alpha {alpha}");
    }

    #[test]
    fn test_alpha_clipping() {
        let indicator = IndicatorHennemannGassner::<1>::new(|u| u[0]).with_alpha_max(1.0).unwrap();
        let threshold = IndicatorHennemannGassner::<1>::threshold(4);

        assert_eq!(indicator.alpha_from_energy(0.0, 4), 0.0);
        assert!((indicator.alpha_from_energy(threshold, 4) - 0.5).abs() < 1e-14);
        assert_eq!(indicator.alpha_from_energy(1.0, 4), 1.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(ConstantIndicator::new(1.5).is_err());
        assert!(ConstantIndicator::new(-0.1).is_err());
        assert!(IndicatorHennemannGassner::<1>::new(|u| u[0]).with_alpha_max(2.0).is_err());
        assert!(IndicatorHennemannGassner::<1>::new(|u| u[0]).with_alpha_min(0.5).is_err());
    }

    #[test]
    fn test_smoothing_flag() {
        let smoothed = IndicatorHennemannGassner::<1>::new(|u| u[0]);
        let raw = IndicatorHennemannGassner::<1>::new(|u| u[0]).with_alpha_smooth(false);
        assert!(ShockIndicator::<1>::smoothing(&smoothed));
        assert!(!ShockIndicator::<1>::smoothing(&raw));
        assert!(!ShockIndicator::<1>::smoothing(&ConstantIndicator::new(0.3).unwrap()));
    }

    #[test]
    fn test_smoothing_takes_half_of_neighbor() {
        let alpha_tmp = [0.0, 0.8, 0.5];
        assert_eq!(smoothed_alpha(&alpha_tmp, 0, &[1]), 0.4);
        assert_eq!(smoothed_alpha(&alpha_tmp, 2, &[0, 1]), 0.5);
        assert_eq!(smoothed_alpha(&alpha_tmp, 1, &[]), 0.8);
    }
}
