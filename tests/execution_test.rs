//! Execution strategies must agree with serial evaluation.
//!
//! Every stage is computed per unit with the same arithmetic regardless of
//! how units are distributed, so the thread-parallel and device paths are
//! compared against serial evaluation on a nonconforming mesh with
//! boundaries, blending and source terms.

#![cfg(feature = "parallel")]

use std::sync::Arc;

use dg_tree::boundary::{BoundaryConditionSlipWall, BoundaryConditions2D};
use dg_tree::equations::ShallowWater2D;
use dg_tree::flux::{FluxLaxFriedrichs, FluxNonconservativeWintermeyerEtAl, FluxWintermeyerEtAl};
use dg_tree::mesh::QuadLeafMesh;
use dg_tree::solver::{
    DGSolver2D, Execution, IndicatorHennemannGassner, Solution2D, VolumeIntegral,
};
use dg_tree::source::{FnSource2D, SourceContext2D};
use dg_tree::types::State;

fn create_test_setup() -> (QuadLeafMesh, DGSolver2D<4, ShallowWater2D>) {
    let mut mesh = QuadLeafMesh::uniform([0.0, 0.0], 0.25, 4, 3, [true, false]).unwrap();
    mesh.refine(5).unwrap();
    mesh.refine(10).unwrap();

    let indicator = IndicatorHennemannGassner::new(|u: &State<4>| u[0] * u[0]);
    let friction = FnSource2D::new(
        "linear_friction",
        |ctx: &SourceContext2D<4>, _: &ShallowWater2D| {
            [0.0, -0.1 * ctx.state[1], -0.1 * ctx.state[2], 0.0]
        },
    );
    let solver = DGSolver2D::new(ShallowWater2D::new(9.81), 3, FluxLaxFriedrichs)
        .unwrap()
        .with_volume_integral(VolumeIntegral::shock_capturing(
            FluxWintermeyerEtAl,
            FluxLaxFriedrichs,
            indicator,
        ))
        .with_nonconservative(FluxNonconservativeWintermeyerEtAl)
        .with_boundary_conditions(BoundaryConditions2D::uniform(Arc::new(
            BoundaryConditionSlipWall,
        )))
        .with_source_terms(friction);
    (mesh, solver)
}

/// Dam-break-like initial data with a sloped bottom and some momentum.
fn initial_state(x: [f64; 2]) -> State<4> {
    let b = 0.1 * x[1];
    let level = if x[0] < 0.45 { 2.0 } else { 1.0 };
    let h = level - b;
    [h, 0.3 * h * x[1], -0.2 * h * x[0], b]
}

fn rhs_with(execution: Execution, time: f64) -> (Solution2D<4>, Vec<f64>) {
    let (mesh, solver) = create_test_setup();
    let mut cache = solver.create_cache(&mesh, execution).unwrap();
    let u = solver.compute_coefficients(|x, _| initial_state(x), 0.0, &cache);
    let mut du = Solution2D::zeros(u.n_elements, u.n_nodes);
    solver.rhs(&mut du, &u, time, &mut cache);
    (du, cache.blending.alpha.clone())
}

#[test]
fn test_threaded_and_device_match_serial() {
    let (du_serial, alpha_serial) = rhs_with(Execution::Serial, 0.0);
    assert!(du_serial.max_abs() > 1e-3, "test data should not be steady");
    assert!(alpha_serial.iter().any(|&a| a > 0.0), "dam break should trigger blending");

    for n_threads in [1, 3, 8] {
        for execution in [Execution::threaded(n_threads).unwrap(), Execution::device(n_threads).unwrap()] {
            let name = execution.name();
            let (du, alpha) = rhs_with(execution, 0.0);
            let diff = du.max_abs_diff(&du_serial);
            assert!(diff < 1e-12, "{name} with {n_threads} threads differs from serial by {diff}");
            assert_eq!(alpha, alpha_serial, "{name}: blending coefficients differ");
        }
    }
}

#[test]
fn test_device_cache_is_reusable() {
    let (mesh, solver) = create_test_setup();
    let mut cache = solver.create_cache(&mesh, Execution::device(4).unwrap()).unwrap();
    assert!(cache.execution().is_staged());

    let u = solver.compute_coefficients(|x, _| initial_state(x), 0.0, &cache);
    let mut first = Solution2D::zeros(u.n_elements, u.n_nodes);
    let mut second = Solution2D::zeros(u.n_elements, u.n_nodes);
    solver.rhs(&mut first, &u, 0.0, &mut cache);

    // Stale values in du must not leak into the result
    second.fill(7.0);
    solver.rhs(&mut second, &u, 0.0, &mut cache);
    assert_eq!(first, second);
}
