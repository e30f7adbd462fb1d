//! Volume integrals.
//!
//! All variants are per-element kernels over the solution block of one
//! element writing the element's `du` block. With `D̂` the weak-form matrix,
//! `D_s` the split-form matrix and `w` the quadrature weights:
//!
//! - weak form: `du_i += Σ_j D̂[i,j] f(u_j)` along every line
//! - flux differencing: `du_i += Σ_j D_s[i,j] f*(u_i, u_j)`, evaluated once
//!   per unordered pair since `f*` is symmetric
//! - finite volume: `du_i += (f*_{i+1/2} − f*_{i−1/2}) / w_i` with zero
//!   flux on the element faces
//!
//! Nonconservative terms are added with weight `0.5` and the receiving node
//! as first argument.

use std::sync::Arc;

use crate::basis::LobattoLegendreBasis;
use crate::equations::ConservationLaw2D;
use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::types::{Orientation, State};

use super::execution::{Scratch, StageRunner};
use super::indicator::{ShockIndicator, smoothed_alpha};
use super::solution::{add_to_node, node_state};

/// Blending coefficients below this are treated as pure DG.
pub const ALPHA_TOLERANCE: f64 = 1e-12;

/// Volume integral variants.
pub enum VolumeIntegral<const N: usize, E> {
    /// Weak form with the physical flux
    WeakForm,
    /// Split form with a symmetric two-point volume flux
    FluxDifferencing {
        /// Symmetric, consistent two-point flux
        volume_flux: Arc<dyn TwoPointFlux<N, E>>,
    },
    /// Flux differencing blended with first-order finite volumes
    ShockCapturing {
        /// Volume flux of the high-order part
        volume_flux_dg: Arc<dyn TwoPointFlux<N, E>>,
        /// Inner flux of the finite-volume part
        volume_flux_fv: Arc<dyn TwoPointFlux<N, E>>,
        /// Blending coefficient per element
        indicator: Arc<dyn ShockIndicator<N>>,
    },
    /// First-order finite volumes on the subcell grid
    PureFiniteVolume {
        /// Inner two-point flux
        volume_flux_fv: Arc<dyn TwoPointFlux<N, E>>,
    },
}

impl<const N: usize, E> VolumeIntegral<N, E> {
    /// Flux differencing with `volume_flux`.
    pub fn flux_differencing<F>(volume_flux: F) -> Self
    where
        F: TwoPointFlux<N, E> + 'static,
    {
        Self::FluxDifferencing {
            volume_flux: Arc::new(volume_flux),
        }
    }

    /// Blended flux differencing / finite volume.
    pub fn shock_capturing<D, V, I>(volume_flux_dg: D, volume_flux_fv: V, indicator: I) -> Self
    where
        D: TwoPointFlux<N, E> + 'static,
        V: TwoPointFlux<N, E> + 'static,
        I: ShockIndicator<N> + 'static,
    {
        Self::ShockCapturing {
            volume_flux_dg: Arc::new(volume_flux_dg),
            volume_flux_fv: Arc::new(volume_flux_fv),
            indicator: Arc::new(indicator),
        }
    }

    /// Pure finite volume with `volume_flux_fv`.
    pub fn pure_finite_volume<V>(volume_flux_fv: V) -> Self
    where
        V: TwoPointFlux<N, E> + 'static,
    {
        Self::PureFiniteVolume {
            volume_flux_fv: Arc::new(volume_flux_fv),
        }
    }

    /// Variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeakForm => "weak_form",
            Self::FluxDifferencing { .. } => "flux_differencing",
            Self::ShockCapturing { .. } => "shock_capturing",
            Self::PureFiniteVolume { .. } => "pure_finite_volume",
        }
    }
}

impl<const N: usize, E> Clone for VolumeIntegral<N, E> {
    fn clone(&self) -> Self {
        match self {
            Self::WeakForm => Self::WeakForm,
            Self::FluxDifferencing { volume_flux } => Self::FluxDifferencing {
                volume_flux: Arc::clone(volume_flux),
            },
            Self::ShockCapturing {
                volume_flux_dg,
                volume_flux_fv,
                indicator,
            } => Self::ShockCapturing {
                volume_flux_dg: Arc::clone(volume_flux_dg),
                volume_flux_fv: Arc::clone(volume_flux_fv),
                indicator: Arc::clone(indicator),
            },
            Self::PureFiniteVolume { volume_flux_fv } => Self::PureFiniteVolume {
                volume_flux_fv: Arc::clone(volume_flux_fv),
            },
        }
    }
}

// ============================================================================
// Stage
// ============================================================================

/// Blending coefficients and the element neighbor graph used to smooth them.
#[derive(Clone, Debug)]
pub struct BlendingCache {
    /// Final α per element
    pub alpha: Vec<f64>,
    /// Unsmoothed α per element
    pub alpha_tmp: Vec<f64>,
    /// CSR offsets into `neighbors`
    pub neighbor_offsets: Vec<usize>,
    /// Face neighbors of every element
    pub neighbors: Vec<usize>,
}

impl BlendingCache {
    /// Neighbors of `element`.
    #[inline]
    pub fn neighbors_of(&self, element: usize) -> &[usize] {
        &self.neighbors[self.neighbor_offsets[element]..self.neighbor_offsets[element + 1]]
    }
}

/// Inputs shared by every volume kernel.
pub(crate) struct VolumeContext<'a, const N: usize, E> {
    pub equation: &'a E,
    pub basis: &'a LobattoLegendreBasis,
    pub nonconservative: Option<&'a dyn NonconservativeFlux<N, E>>,
}

/// Zero `du` and add the volume integral of every element.
pub(crate) fn calc_volume_integral<const N: usize, E: ConservationLaw2D<N>>(
    du: &mut [f64],
    u: &[f64],
    volume_integral: &VolumeIntegral<N, E>,
    ctx: &VolumeContext<'_, N, E>,
    blending: &mut BlendingCache,
    runner: &mut StageRunner,
) {
    let n = ctx.basis.n_nodes();
    let stride = n * n * N;

    if let VolumeIntegral::ShockCapturing { indicator, .. } = volume_integral {
        calc_blending_coefficients(u, indicator.as_ref(), ctx.basis, blending, runner);
    }
    let alpha = &blending.alpha;

    runner.for_each_unit(du, stride, |k, du_k, scratch| {
        du_k.fill(0.0);
        let u_k = &u[k * stride..(k + 1) * stride];
        match volume_integral {
            VolumeIntegral::WeakForm => weak_form_kernel(du_k, u_k, ctx, 1.0),
            VolumeIntegral::FluxDifferencing { volume_flux } => {
                flux_differencing_kernel(du_k, u_k, volume_flux.as_ref(), ctx, 1.0)
            }
            VolumeIntegral::ShockCapturing {
                volume_flux_dg,
                volume_flux_fv,
                ..
            } => {
                let alpha_k = alpha[k];
                if alpha_k.abs() < ALPHA_TOLERANCE {
                    flux_differencing_kernel(du_k, u_k, volume_flux_dg.as_ref(), ctx, 1.0);
                } else {
                    flux_differencing_kernel(du_k, u_k, volume_flux_dg.as_ref(), ctx, 1.0 - alpha_k);
                    fv_kernel(du_k, u_k, volume_flux_fv.as_ref(), ctx, alpha_k, scratch);
                }
            }
            VolumeIntegral::PureFiniteVolume { volume_flux_fv } => {
                fv_kernel(du_k, u_k, volume_flux_fv.as_ref(), ctx, 1.0, scratch)
            }
        }
    });
}

/// Evaluate the indicator on every element and smooth across neighbors.
fn calc_blending_coefficients<const N: usize>(
    u: &[f64],
    indicator: &dyn ShockIndicator<N>,
    basis: &LobattoLegendreBasis,
    blending: &mut BlendingCache,
    runner: &mut StageRunner,
) {
    let stride = basis.n_nodes() * basis.n_nodes() * N;
    runner.for_each_unit(&mut blending.alpha_tmp, 1, |k, alpha_k, scratch| {
        alpha_k[0] = indicator.element_alpha(&u[k * stride..(k + 1) * stride], basis, scratch);
    });

    if indicator.smoothing() {
        let BlendingCache {
            alpha,
            alpha_tmp,
            neighbor_offsets,
            neighbors,
        } = blending;
        runner.for_each_unit(alpha, 1, |k, alpha_k, _| {
            let own = &neighbors[neighbor_offsets[k]..neighbor_offsets[k + 1]];
            alpha_k[0] = smoothed_alpha(alpha_tmp, k, own);
        });
    } else {
        blending.alpha.copy_from_slice(&blending.alpha_tmp);
    }

    let n_blended = blending
        .alpha
        .iter()
        .filter(|a| a.abs() >= ALPHA_TOLERANCE)
        .count();
    log::trace!(
        "{}: {} pure DG, {} blended elements",
        indicator.name(),
        blending.alpha.len() - n_blended,
        n_blended
    );
}

// ============================================================================
// Kernels
// ============================================================================

/// Weak-form volume term of one element, scaled by `alpha`.
pub(crate) fn weak_form_kernel<const N: usize, E: ConservationLaw2D<N>>(
    du: &mut [f64],
    u: &[f64],
    ctx: &VolumeContext<'_, N, E>,
    alpha: f64,
) {
    let n = ctx.basis.n_nodes();
    let dhat = &ctx.basis.derivative_dhat;

    for j in 0..n {
        for i in 0..n {
            let u_node = node_state::<N>(u, n, i, j);

            let flux_x = ctx.equation.flux(&u_node, Orientation::X);
            for ii in 0..n {
                add_to_node(du, n, ii, j, alpha * dhat[(ii, i)], &flux_x);
            }

            let flux_y = ctx.equation.flux(&u_node, Orientation::Y);
            for jj in 0..n {
                add_to_node(du, n, i, jj, alpha * dhat[(jj, j)], &flux_y);
            }
        }
    }
}

/// Split-form volume term of one element, scaled by `alpha`.
pub(crate) fn flux_differencing_kernel<const N: usize, E: ConservationLaw2D<N>>(
    du: &mut [f64],
    u: &[f64],
    volume_flux: &dyn TwoPointFlux<N, E>,
    ctx: &VolumeContext<'_, N, E>,
    alpha: f64,
) {
    let n = ctx.basis.n_nodes();
    let split = &ctx.basis.derivative_split;
    let equation = ctx.equation;

    for j in 0..n {
        for i in 0..n {
            let u_node = node_state::<N>(u, n, i, j);

            // Symmetric flux: one evaluation per pair, split diagonal is zero
            for ii in (i + 1)..n {
                let u_other = node_state::<N>(u, n, ii, j);
                let flux = volume_flux.compute(&u_node, &u_other, Orientation::X, equation);
                add_to_node(du, n, i, j, alpha * split[(i, ii)], &flux);
                add_to_node(du, n, ii, j, alpha * split[(ii, i)], &flux);
            }

            for jj in (j + 1)..n {
                let u_other = node_state::<N>(u, n, i, jj);
                let flux = volume_flux.compute(&u_node, &u_other, Orientation::Y, equation);
                add_to_node(du, n, i, j, alpha * split[(j, jj)], &flux);
                add_to_node(du, n, i, jj, alpha * split[(jj, j)], &flux);
            }
        }
    }

    let Some(nonconservative) = ctx.nonconservative else {
        return;
    };

    for j in 0..n {
        for i in 0..n {
            let u_node = node_state::<N>(u, n, i, j);
            let mut contribution = [0.0; N];

            for ii in 0..n {
                let u_other = node_state::<N>(u, n, ii, j);
                let noncons = nonconservative.compute(&u_node, &u_other, Orientation::X, equation);
                accumulate(&mut contribution, split[(i, ii)], &noncons);
            }
            for jj in 0..n {
                let u_other = node_state::<N>(u, n, i, jj);
                let noncons = nonconservative.compute(&u_node, &u_other, Orientation::Y, equation);
                accumulate(&mut contribution, split[(j, jj)], &noncons);
            }

            add_to_node(du, n, i, j, 0.5 * alpha, &contribution);
        }
    }
}

/// Subcell finite-volume term of one element, scaled by `alpha`.
///
/// Scratch flux buffers hold `K + 1` subcell faces per line; the two
/// element faces stay zero.
pub(crate) fn fv_kernel<const N: usize, E: ConservationLaw2D<N>>(
    du: &mut [f64],
    u: &[f64],
    volume_flux: &dyn TwoPointFlux<N, E>,
    ctx: &VolumeContext<'_, N, E>,
    alpha: f64,
    scratch: &mut Scratch,
) {
    let n = ctx.basis.n_nodes();
    let inverse_weights = &ctx.basis.inverse_weights;

    calc_fv_fluxes(
        &mut scratch.fstar1_l,
        &mut scratch.fstar1_r,
        u,
        volume_flux,
        ctx,
        Orientation::X,
    );
    calc_fv_fluxes(
        &mut scratch.fstar2_l,
        &mut scratch.fstar2_r,
        u,
        volume_flux,
        ctx,
        Orientation::Y,
    );

    for j in 0..n {
        for i in 0..n {
            let base = (j * n + i) * N;
            let x_left = fv_index::<N>(n, i, j);
            let x_right = fv_index::<N>(n, i + 1, j);
            let y_left = fv_index::<N>(n, j, i);
            let y_right = fv_index::<N>(n, j + 1, i);
            for v in 0..N {
                du[base + v] += alpha
                    * (inverse_weights[i]
                        * (scratch.fstar1_l[x_right + v] - scratch.fstar1_r[x_left + v])
                        + inverse_weights[j]
                            * (scratch.fstar2_l[y_right + v] - scratch.fstar2_r[y_left + v]));
            }
        }
    }
}

/// Offset of subcell face `face` on line `line` in a finite-volume flux buffer.
#[inline]
fn fv_index<const N: usize>(n_nodes: usize, face: usize, line: usize) -> usize {
    (face * n_nodes + line) * N
}

/// Fill the left- and right-sided subcell fluxes along `orientation`.
fn calc_fv_fluxes<const N: usize, E: ConservationLaw2D<N>>(
    fstar_l: &mut [f64],
    fstar_r: &mut [f64],
    u: &[f64],
    volume_flux: &dyn TwoPointFlux<N, E>,
    ctx: &VolumeContext<'_, N, E>,
    orientation: Orientation,
) {
    let n = ctx.basis.n_nodes();
    let equation = ctx.equation;

    for line in 0..n {
        for face in [0, n] {
            let idx = fv_index::<N>(n, face, line);
            fstar_l[idx..idx + N].fill(0.0);
            fstar_r[idx..idx + N].fill(0.0);
        }

        for face in 1..n {
            let (u_ll, u_rr) = match orientation {
                Orientation::X => (
                    node_state::<N>(u, n, face - 1, line),
                    node_state::<N>(u, n, face, line),
                ),
                Orientation::Y => (
                    node_state::<N>(u, n, line, face - 1),
                    node_state::<N>(u, n, line, face),
                ),
            };

            let flux = volume_flux.compute(&u_ll, &u_rr, orientation, equation);
            let mut flux_l = flux;
            let mut flux_r = flux;
            if let Some(nonconservative) = ctx.nonconservative {
                let noncons_l = nonconservative.compute(&u_ll, &u_rr, orientation, equation);
                let noncons_r = nonconservative.compute(&u_rr, &u_ll, orientation, equation);
                accumulate(&mut flux_l, 0.5, &noncons_l);
                accumulate(&mut flux_r, 0.5, &noncons_r);
            }

            let idx = fv_index::<N>(n, face, line);
            fstar_l[idx..idx + N].copy_from_slice(&flux_l);
            fstar_r[idx..idx + N].copy_from_slice(&flux_r);
        }
    }
}

#[inline]
pub(crate) fn accumulate<const N: usize>(target: &mut State<N>, factor: f64, values: &State<N>) {
    for (t, v) in target.iter_mut().zip(values) {
        *t += factor * v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::{LinearAdvection2D, ShallowWater2D};
    use crate::flux::{FluxCentral, FluxNonconservativeWintermeyerEtAl, FluxWintermeyerEtAl};

    fn element_from<const N: usize, F: Fn(f64, f64) -> State<N>>(
        basis: &LobattoLegendreBasis,
        f: F,
    ) -> Vec<f64> {
        let n = basis.n_nodes();
        let mut element = vec![0.0; n * n * N];
        for j in 0..n {
            for i in 0..n {
                let state = f(basis.nodes[i], basis.nodes[j]);
                element[(j * n + i) * N..(j * n + i + 1) * N].copy_from_slice(&state);
            }
        }
        element
    }

    #[test]
    fn test_weak_form_matches_flux_differencing_on_constant_state() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let equation = LinearAdvection2D::new(1.0, -0.5);
        let ctx: VolumeContext<'_, 1, LinearAdvection2D> = VolumeContext {
            equation: &equation,
            basis: &basis,
            nonconservative: None,
        };
        let u = element_from::<1, _>(&basis, |_, _| [2.5]);

        let mut du_weak = vec![0.0; u.len()];
        let mut du_split = vec![0.0; u.len()];
        weak_form_kernel(&mut du_weak, &u, &ctx, 1.0);
        flux_differencing_kernel(&mut du_split, &u, &FluxCentral, &ctx, 1.0);

        for (a, b) in du_weak.iter().zip(&du_split) {
            assert!((a - b).abs() < 1e-12, "weak {a} vs split {b}");
        }
    }

    #[test]
    fn test_fv_kernel_vanishes_in_interior_for_constant_state() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let equation = LinearAdvection2D::new(1.0, 1.0);
        let ctx: VolumeContext<'_, 1, LinearAdvection2D> = VolumeContext {
            equation: &equation,
            basis: &basis,
            nonconservative: None,
        };
        let u = element_from::<1, _>(&basis, |_, _| [1.0]);
        let mut scratch = Scratch::new(4, 1);
        let mut du = vec![0.0; u.len()];
        fv_kernel(&mut du, &u, &FluxCentral, &ctx, 1.0, &mut scratch);

        // Interior nodes see equal fluxes on both subcell faces
        for j in 1..3 {
            for i in 1..3 {
                assert!(du[j * 4 + i].abs() < 1e-14);
            }
        }
        // Corner (0, 0): only the inner faces carry flux f = 1 in x and y
        let expected = basis.inverse_weights[0] * 2.0;
        assert!((du[0] - expected).abs() < 1e-12, "corner {} vs {expected}", du[0]);
    }

    #[test]
    fn test_fv_kernel_is_conservative() {
        let basis = LobattoLegendreBasis::new(4).unwrap();
        let equation = LinearAdvection2D::new(0.7, 0.3);
        let ctx: VolumeContext<'_, 1, LinearAdvection2D> = VolumeContext {
            equation: &equation,
            basis: &basis,
            nonconservative: None,
        };
        let u = element_from::<1, _>(&basis, |x, y| [(2.0 * x).sin() + y * y]);
        let mut scratch = Scratch::new(5, 1);
        let mut du = vec![0.0; u.len()];
        fv_kernel(&mut du, &u, &FluxCentral, &ctx, 1.0, &mut scratch);

        // Zero element-face flux: weighted sum of du vanishes
        let n = basis.n_nodes();
        let total: f64 = (0..n)
            .flat_map(|j| (0..n).map(move |i| (i, j)))
            .map(|(i, j)| basis.weights[i] * basis.weights[j] * du[j * n + i])
            .sum();
        assert!(total.abs() < 1e-12, "subcell FV not conservative: {total}");
    }

    #[test]
    fn test_lake_at_rest_volume_terms_vanish() {
        let basis = LobattoLegendreBasis::new(3).unwrap();
        let equation = ShallowWater2D::standard();
        let nonconservative = FluxNonconservativeWintermeyerEtAl;
        let ctx: VolumeContext<'_, 4, ShallowWater2D> = VolumeContext {
            equation: &equation,
            basis: &basis,
            nonconservative: Some(&nonconservative),
        };
        let u = element_from::<4, _>(&basis, |x, y| {
            let b = 0.1 * (1.0 + x) * (1.0 - 0.5 * y);
            equation.from_primitives(2.0 - b, 0.0, 0.0, b)
        });

        let mut du = vec![0.0; u.len()];
        flux_differencing_kernel(&mut du, &u, &FluxWintermeyerEtAl, &ctx, 1.0);
        let mut scratch = Scratch::new(4, 4);
        fv_kernel(&mut du, &u, &FluxWintermeyerEtAl, &ctx, 1.0, &mut scratch);

        // Interior nodes have no surface contribution, so they must balance
        // on their own; boundary nodes receive their share from the faces.
        let n = basis.n_nodes();
        for j in 1..n - 1 {
            for i in 1..n - 1 {
                let base = (j * n + i) * 4;
                for v in 0..3 {
                    assert!(
                        du[base + v].abs() < 1e-12,
                        "lake at rest broken at ({i}, {j}) var {v}: {}",
                        du[base + v]
                    );
                }
            }
        }
    }
}
