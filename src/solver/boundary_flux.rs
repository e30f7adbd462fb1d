//! Physical boundaries: prolongation and boundary-condition fluxes.

use crate::boundary::{BCContext2D, BoundaryConditions2D};
use crate::equations::ConservationLaw2D;
use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::types::Direction;

use super::containers::{BoundaryContainer2D, copy_face_trace, face_state};
use super::execution::StageRunner;
use super::volume_integral::accumulate;

/// Copy the interior trace of every boundary into its element's side.
pub(crate) fn prolong2boundaries<const N: usize>(
    boundaries: &mut BoundaryContainer2D,
    u: &[f64],
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    let stride = boundaries.trace_stride();
    let element_stride = n_nodes * n_nodes * N;
    let face_len = n_nodes * N;
    let BoundaryContainer2D {
        neighbor_ids,
        neighbor_sides,
        directions,
        u: traces,
        ..
    } = boundaries;

    runner.for_each_unit(traces, stride, |b, trace, _| {
        let element = neighbor_ids[b];
        let offset = neighbor_sides[b].index() * face_len;
        copy_face_trace::<N>(
            &u[element * element_stride..(element + 1) * element_stride],
            directions[b],
            n_nodes,
            &mut trace[offset..offset + face_len],
        );
    });
}

/// Evaluate the boundary conditions direction by direction.
///
/// Each direction's boundaries form one contiguous range handled by the
/// condition registered for that direction.
#[allow(clippy::too_many_arguments)]
pub(crate) fn calc_boundary_flux<const N: usize, E: ConservationLaw2D<N>>(
    boundaries: &mut BoundaryContainer2D,
    boundary_conditions: &BoundaryConditions2D<N, E>,
    equation: &E,
    surface_flux: &dyn TwoPointFlux<N, E>,
    nonconservative: Option<&dyn NonconservativeFlux<N, E>>,
    time: f64,
    n_nodes: usize,
    runner: &mut StageRunner,
) {
    if boundaries.is_empty() {
        return;
    }

    let trace_stride = boundaries.trace_stride();
    let flux_stride = boundaries.flux_stride();
    let face_len = n_nodes * N;

    for direction in Direction::ALL {
        let range = boundaries.range(direction);
        if range.is_empty() {
            continue;
        }
        let Some(condition) = boundary_conditions.get(direction) else {
            panic!("{} boundaries on {direction} but no boundary condition", range.len());
        };

        let BoundaryContainer2D {
            neighbor_sides,
            node_coordinates,
            u: traces,
            flux,
            ..
        } = &mut *boundaries;
        let traces = &*traces;
        let first = range.start;

        runner.for_each_unit(
            &mut flux[range.start * flux_stride..range.end * flux_stride],
            flux_stride,
            |local, flux_b, _| {
                let b = first + local;
                let offset = b * trace_stride + neighbor_sides[b].index() * face_len;
                let trace = &traces[offset..offset + face_len];

                for l in 0..n_nodes {
                    let u_inner = face_state::<N>(trace, l);
                    let ctx = BCContext2D::new(time, node_coordinates[b * n_nodes + l], direction);
                    let mut fstar = condition.surface_flux(&u_inner, &ctx, surface_flux, equation);
                    if let Some(nonconservative) = nonconservative {
                        let noncons =
                            condition.nonconservative_flux(&u_inner, &ctx, nonconservative, equation);
                        accumulate(&mut fstar, 0.5, &noncons);
                    }
                    flux_b[l * N..(l + 1) * N].copy_from_slice(&fstar);
                }
            },
        );
    }
}
