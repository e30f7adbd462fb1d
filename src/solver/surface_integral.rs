//! Element-indexed tail of the pipeline: gather face fluxes, surface
//! integral, inverse-Jacobian scaling and source terms.

use crate::equations::ConservationLaw2D;
use crate::source::{SourceContext2D, SourceTerm2D};
use crate::types::Direction;

use super::containers::{
    BoundaryContainer2D, ElementContainer2D, FluxBuffer, InterfaceContainer2D, MortarContainer2D,
};
use super::execution::StageRunner;
use super::solution::{add_to_node, node_state};

/// Copy every element face flux from the interface, boundary or mortar
/// that owns the face into `surface_flux_values`.
pub(crate) fn gather_face_fluxes(
    elements: &mut ElementContainer2D,
    interfaces: &InterfaceContainer2D,
    boundaries: &BoundaryContainer2D,
    mortars: &MortarContainer2D,
    runner: &mut StageRunner,
) {
    let stride = elements.surface_flux_stride();
    let face_len = elements.n_nodes * elements.n_vars;
    let ElementContainer2D {
        surface_flux_values,
        face_sources,
        ..
    } = elements;

    runner.for_each_unit(surface_flux_values, stride, |k, faces, _| {
        for (dir, face) in faces.chunks_mut(face_len).enumerate() {
            let source = face_sources[k * 4 + dir];
            let buffer = match source.buffer {
                FluxBuffer::Interfaces => &interfaces.flux,
                FluxBuffer::Boundaries => &boundaries.flux,
                FluxBuffer::Mortars => &mortars.flux,
            };
            face.copy_from_slice(&buffer[source.offset..source.offset + face_len]);
        }
    });
}

/// Fold the face fluxes into the face nodes of `du`.
///
/// `−` faces subtract the flux scaled by `1/w_0`, `+` faces add it scaled
/// by `1/w_{K-1}`.
pub(crate) fn calc_surface_integral<const N: usize>(
    du: &mut [f64],
    elements: &ElementContainer2D,
    boundary_interpolation: [f64; 2],
    runner: &mut StageRunner,
) {
    let n = elements.n_nodes;
    let stride = n * n * N;
    let face_len = n * N;
    let surface_stride = elements.surface_flux_stride();
    let surface_flux_values = &elements.surface_flux_values;
    let [factor_neg, factor_pos] = boundary_interpolation;

    runner.for_each_unit(du, stride, |k, du_k, _| {
        let faces = &surface_flux_values[k * surface_stride..(k + 1) * surface_stride];
        let face = |direction: Direction, l: usize| {
            let offset = direction.index() * face_len + l * N;
            let mut flux = [0.0; N];
            flux.copy_from_slice(&faces[offset..offset + N]);
            flux
        };

        for l in 0..n {
            add_to_node(du_k, n, 0, l, -factor_neg, &face(Direction::NegX, l));
            add_to_node(du_k, n, n - 1, l, factor_pos, &face(Direction::PosX, l));
            add_to_node(du_k, n, l, 0, -factor_neg, &face(Direction::NegY, l));
            add_to_node(du_k, n, l, n - 1, factor_pos, &face(Direction::PosY, l));
        }
    });
}

/// `du *= -1/J` per element.
pub(crate) fn apply_jacobian(
    du: &mut [f64],
    elements: &ElementContainer2D,
    runner: &mut StageRunner,
) {
    let stride = elements.n_nodes * elements.n_nodes * elements.n_vars;
    let inverse_jacobian = &elements.inverse_jacobian;

    runner.for_each_unit(du, stride, |k, du_k, _| {
        let factor = -inverse_jacobian[k];
        for value in du_k.iter_mut() {
            *value *= factor;
        }
    });
}

/// Add `S(u, x, t)` at every node.
pub(crate) fn calc_sources<const N: usize, E: ConservationLaw2D<N>>(
    du: &mut [f64],
    u: &[f64],
    source_terms: &dyn SourceTerm2D<N, E>,
    equation: &E,
    elements: &ElementContainer2D,
    time: f64,
    runner: &mut StageRunner,
) {
    let n = elements.n_nodes;
    let stride = n * n * N;

    runner.for_each_unit(du, stride, |k, du_k, _| {
        let u_k = &u[k * stride..(k + 1) * stride];
        for j in 0..n {
            for i in 0..n {
                let ctx = SourceContext2D::new(
                    time,
                    elements.node_coordinate(k, i, j),
                    node_state::<N>(u_k, n, i, j),
                );
                let source = source_terms.evaluate(&ctx, equation);
                add_to_node(du_k, n, i, j, 1.0, &source);
            }
        }
    });
}
