//! 2:1 mortars: L2 prolongation and conservative flux projection.
//!
//! Each mortar carries two halves (upper, lower). On a half, one side holds
//! the small element's trace and the other side the large trace
//! interpolated to that half. The flux computed on each half goes directly
//! to its small element; the large element receives the L2 projection
//! `R_u f_u + R_l f_l`, which makes the coupling conservative.

use faer::Mat;

use crate::equations::ConservationLaw2D;
use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::operators::MortarL2;
use crate::types::Side;

use super::containers::{
    MortarContainer2D, MortarRole, copy_face_trace, face_directions, face_state, flux_offset,
    trace_offset,
};
use super::execution::StageRunner;
use super::volume_integral::accumulate;

/// Fill both halves of every mortar.
pub(crate) fn prolong2mortars<const N: usize>(
    mortars: &mut MortarContainer2D,
    u: &[f64],
    mortar_l2: &MortarL2,
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    let stride = mortars.trace_stride();
    let element_stride = n_nodes * n_nodes * N;
    let face_len = n_nodes * N;
    let MortarContainer2D {
        neighbor_ids,
        large_sides,
        orientations,
        u: traces,
        ..
    } = mortars;

    runner.for_each_unit(traces, stride, |m, trace, scratch| {
        let [lower, upper, large] = neighbor_ids[m];
        let large_side = large_sides[m];
        let small_side = large_side.other();
        let (small_direction, large_direction) = face_directions(orientations[m], large_side);
        let element = |k: usize| &u[k * element_stride..(k + 1) * element_stride];

        for (half, small) in [(MortarRole::Upper, upper), (MortarRole::Lower, lower)] {
            let offset = trace_offset(half, small_side, face_len);
            copy_face_trace::<N>(
                element(small),
                small_direction,
                n_nodes,
                &mut trace[offset..offset + face_len],
            );
        }

        copy_face_trace::<N>(element(large), large_direction, n_nodes, &mut scratch.face_trace);
        for (half, forward) in [
            (MortarRole::Upper, &mortar_l2.forward_upper),
            (MortarRole::Lower, &mortar_l2.forward_lower),
        ] {
            let offset = trace_offset(half, large_side, face_len);
            project::<N>(
                forward,
                &scratch.face_trace,
                &mut trace[offset..offset + face_len],
                n_nodes,
            );
        }
    });
}

/// Compute the flux on both halves and project it back to the large face.
pub(crate) fn calc_mortar_flux<const N: usize, E: ConservationLaw2D<N>>(
    mortars: &mut MortarContainer2D,
    equation: &E,
    surface_flux: &dyn TwoPointFlux<N, E>,
    nonconservative: Option<&dyn NonconservativeFlux<N, E>>,
    mortar_l2: &MortarL2,
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    let trace_stride = mortars.trace_stride();
    let flux_stride = mortars.flux_stride();
    let face_len = n_nodes * N;
    let MortarContainer2D {
        large_sides,
        orientations,
        u: traces,
        flux,
        ..
    } = mortars;
    let traces = &*traces;

    runner.for_each_unit(flux, flux_stride, |m, flux_m, scratch| {
        let orientation = orientations[m];
        let large_side = large_sides[m];
        let trace = &traces[m * trace_stride..(m + 1) * trace_stride];

        for half in [MortarRole::Upper, MortarRole::Lower] {
            let left = trace_offset(half, Side::Left, face_len);
            let right = trace_offset(half, Side::Right, face_len);
            let primary = flux_offset(half, face_len);
            let secondary = match half {
                MortarRole::Upper => &mut scratch.mortar_upper,
                _ => &mut scratch.mortar_lower,
            };

            for l in 0..n_nodes {
                let u_ll = face_state::<N>(&trace[left..left + face_len], l);
                let u_rr = face_state::<N>(&trace[right..right + face_len], l);
                let fstar = surface_flux.compute(&u_ll, &u_rr, orientation, equation);

                let mut fstar_primary = fstar;
                let mut fstar_secondary = fstar;
                if let Some(nonconservative) = nonconservative {
                    let (u_small, u_large) = match large_side {
                        Side::Left => (&u_rr, &u_ll),
                        Side::Right => (&u_ll, &u_rr),
                    };
                    let noncons_primary =
                        nonconservative.compute(u_small, u_large, orientation, equation);
                    let noncons_secondary =
                        nonconservative.compute(u_large, u_small, orientation, equation);
                    accumulate(&mut fstar_primary, 0.5, &noncons_primary);
                    accumulate(&mut fstar_secondary, 0.5, &noncons_secondary);
                }

                flux_m[primary + l * N..primary + (l + 1) * N].copy_from_slice(&fstar_primary);
                secondary[l * N..(l + 1) * N].copy_from_slice(&fstar_secondary);
            }
        }

        let large = flux_offset(MortarRole::Large, face_len);
        let large_flux = &mut flux_m[large..large + face_len];
        project::<N>(&mortar_l2.reverse_upper, &scratch.mortar_upper, large_flux, n_nodes);
        project_add::<N>(&mortar_l2.reverse_lower, &scratch.mortar_lower, large_flux, n_nodes);
    });
}

/// `out = op · face` applied per variable.
#[inline]
fn project<const N: usize>(op: &Mat<f64>, face: &[f64], out: &mut [f64], n_nodes: usize) {
    out.fill(0.0);
    project_add::<N>(op, face, out, n_nodes);
}

/// `out += op · face` applied per variable.
#[inline]
fn project_add<const N: usize>(op: &Mat<f64>, face: &[f64], out: &mut [f64], n_nodes: usize) {
    for l in 0..n_nodes {
        for ll in 0..n_nodes {
            let weight = op[(l, ll)];
            for v in 0..N {
                out[l * N + v] += weight * face[ll * N + v];
            }
        }
    }
}
