//! Benchmarks for the full DG right-hand side.
//!
//! Run with: `cargo bench --bench rhs_bench`
//!
//! Compares the execution strategies on a shallow water problem with
//! shock capturing and mortars, at several mesh sizes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dg_tree::equations::ShallowWater2D;
use dg_tree::flux::{FluxLaxFriedrichs, FluxNonconservativeWintermeyerEtAl, FluxWintermeyerEtAl};
use dg_tree::mesh::QuadLeafMesh;
use dg_tree::solver::{
    DGSolver2D, Execution, IndicatorHennemannGassner, Solution2D, VolumeIntegral,
};
use dg_tree::types::State;

/// Periodic `n × n` mesh with every fourth root cell refined once.
fn setup_mesh(n: usize) -> QuadLeafMesh {
    let mut mesh = QuadLeafMesh::uniform([0.0, 0.0], 1.0 / n as f64, n, n, [true, true]).unwrap();
    let mut element = 0;
    while element < mesh.leaves().len() {
        if element % 8 == 0 {
            mesh.refine(element).unwrap();
            element += 4;
        }
        element += 1;
    }
    mesh
}

fn setup_solver() -> DGSolver2D<4, ShallowWater2D> {
    DGSolver2D::new(ShallowWater2D::new(9.81), 3, FluxLaxFriedrichs)
        .unwrap()
        .with_volume_integral(VolumeIntegral::shock_capturing(
            FluxWintermeyerEtAl,
            FluxLaxFriedrichs,
            IndicatorHennemannGassner::new(|u: &State<4>| u[0]),
        ))
        .with_nonconservative(FluxNonconservativeWintermeyerEtAl)
}

fn executions() -> Vec<Execution> {
    #[allow(unused_mut)]
    let mut executions = vec![Execution::Serial];
    #[cfg(feature = "parallel")]
    {
        let n_threads = std::thread::available_parallelism().map_or(4, |n| n.get());
        executions.push(Execution::threaded(n_threads).unwrap());
        executions.push(Execution::device(n_threads).unwrap());
    }
    executions
}

fn bench_rhs(c: &mut Criterion) {
    let mut group = c.benchmark_group("rhs_swe");
    let solver = setup_solver();

    for n in [8, 16, 32] {
        let mesh = setup_mesh(n);
        for execution in executions() {
            let name = execution.name();
            let mut cache = solver.create_cache(&mesh, execution).unwrap();
            let u = solver.compute_coefficients(
                |x, _| {
                    let b = 0.1 * (6.0 * x[0]).sin();
                    [2.0 - b + 0.1 * (6.0 * x[1]).cos(), 0.5, -0.2, b]
                },
                0.0,
                &cache,
            );
            let mut du = Solution2D::zeros(u.n_elements, u.n_nodes);

            group.bench_with_input(BenchmarkId::new(name, mesh.leaves().len()), &u, |b, u| {
                b.iter(|| solver.rhs(black_box(&mut du), black_box(u), 0.0, &mut cache));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_rhs);
criterion_main!(benches);
