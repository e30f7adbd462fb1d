//! Conforming interfaces: prolongation and numerical flux.
//!
//! The left element couples through its `+` face, the right element through
//! its `-` face. Both sides store their own flux so that a nonconservative
//! term `0.5 n(u_own, u_other)` can differ between them.

use crate::equations::ConservationLaw2D;
use crate::flux::{NonconservativeFlux, TwoPointFlux};

use super::containers::{InterfaceContainer2D, copy_face_trace, face_state};
use super::execution::StageRunner;
use super::volume_integral::accumulate;

/// Copy the element traces on both sides of every interface.
pub(crate) fn prolong2interfaces<const N: usize>(
    interfaces: &mut InterfaceContainer2D,
    u: &[f64],
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    let stride = interfaces.stride();
    let element_stride = n_nodes * n_nodes * N;
    let face_len = n_nodes * N;
    let InterfaceContainer2D {
        neighbor_ids,
        orientations,
        u: traces,
        ..
    } = interfaces;

    runner.for_each_unit(traces, stride, |s, trace, _| {
        let [left, right] = neighbor_ids[s];
        let orientation = orientations[s];
        let (trace_left, trace_right) = trace.split_at_mut(face_len);
        copy_face_trace::<N>(
            &u[left * element_stride..(left + 1) * element_stride],
            orientation.positive(),
            n_nodes,
            trace_left,
        );
        copy_face_trace::<N>(
            &u[right * element_stride..(right + 1) * element_stride],
            orientation.negative(),
            n_nodes,
            trace_right,
        );
    });
}

/// Evaluate the numerical flux at every interface node.
pub(crate) fn calc_interface_flux<const N: usize, E: ConservationLaw2D<N>>(
    interfaces: &mut InterfaceContainer2D,
    equation: &E,
    surface_flux: &dyn TwoPointFlux<N, E>,
    nonconservative: Option<&dyn NonconservativeFlux<N, E>>,
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    let stride = interfaces.stride();
    let face_len = n_nodes * N;
    let InterfaceContainer2D {
        orientations,
        u: traces,
        flux,
        ..
    } = interfaces;
    let traces = &*traces;

    runner.for_each_unit(flux, stride, |s, flux_s, _| {
        let orientation = orientations[s];
        let trace = &traces[s * stride..(s + 1) * stride];
        let (trace_left, trace_right) = trace.split_at(face_len);
        let (flux_left, flux_right) = flux_s.split_at_mut(face_len);

        for l in 0..n_nodes {
            let u_ll = face_state::<N>(trace_left, l);
            let u_rr = face_state::<N>(trace_right, l);
            let fstar = surface_flux.compute(&u_ll, &u_rr, orientation, equation);

            let mut fstar_left = fstar;
            let mut fstar_right = fstar;
            if let Some(nonconservative) = nonconservative {
                let noncons_left = nonconservative.compute(&u_ll, &u_rr, orientation, equation);
                let noncons_right = nonconservative.compute(&u_rr, &u_ll, orientation, equation);
                accumulate(&mut fstar_left, 0.5, &noncons_left);
                accumulate(&mut fstar_right, 0.5, &noncons_right);
            }

            flux_left[l * N..(l + 1) * N].copy_from_slice(&fstar_left);
            flux_right[l * N..(l + 1) * N].copy_from_slice(&fstar_right);
        }
    });
}
