//! DG spatial discretization on quadtree meshes.
//!
//! [`DGSolver2D`] bundles the equation, the basis and the numerical
//! building blocks (surface flux, volume integral, nonconservative term,
//! boundary conditions, source terms). It is configured once with the
//! `with_*` builders; mesh-dependent state lives in a [`DGCache2D`] built
//! by [`DGSolver2D::create_cache`].
//!
//! # Example
//! ```
//! use dg_tree::equations::LinearAdvection2D;
//! use dg_tree::flux::{FluxCentral, FluxLaxFriedrichs};
//! use dg_tree::mesh::QuadLeafMesh;
//! use dg_tree::solver::{DGSolver2D, Execution, Solution2D, VolumeIntegral};
//!
//! let mesh = QuadLeafMesh::uniform([0.0, 0.0], 0.5, 4, 4, [true, true]).unwrap();
//! let solver = DGSolver2D::<1, _>::new(LinearAdvection2D::new(1.0, 0.5), 3, FluxLaxFriedrichs)
//!     .unwrap()
//!     .with_volume_integral(VolumeIntegral::flux_differencing(FluxCentral));
//! let mut cache = solver.create_cache(&mesh, Execution::Serial).unwrap();
//!
//! let u = solver.compute_coefficients(|x, _t| [(x[0] + x[1]).sin()], 0.0, &cache);
//! let mut du = Solution2D::zeros(u.n_elements, u.n_nodes);
//! solver.rhs(&mut du, &u, 0.0, &mut cache);
//! assert!(du.max_abs() > 0.0);
//! ```

use std::sync::Arc;

use crate::basis::LobattoLegendreBasis;
use crate::boundary::BoundaryConditions2D;
use crate::equations::ConservationLaw2D;
use crate::error::{DGError, Result};
use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::mesh::MeshTopology2D;
use crate::source::SourceTerm2D;
use crate::types::State;

use super::cache::DGCache2D;
use super::execution::Execution;
use super::solution::{Solution2D, node_state};
use super::volume_integral::VolumeIntegral;

/// DG discretization of an `N`-variable conservation law `E`.
pub struct DGSolver2D<const N: usize, E> {
    pub(super) equation: E,
    pub(super) basis: LobattoLegendreBasis,
    pub(super) surface_flux: Arc<dyn TwoPointFlux<N, E>>,
    pub(super) nonconservative: Option<Arc<dyn NonconservativeFlux<N, E>>>,
    pub(super) volume_integral: VolumeIntegral<N, E>,
    pub(super) boundary_conditions: BoundaryConditions2D<N, E>,
    pub(super) source_terms: Option<Arc<dyn SourceTerm2D<N, E>>>,
}

impl<const N: usize, E: ConservationLaw2D<N>> DGSolver2D<N, E> {
    /// Weak-form DG of `polynomial_degree` with `surface_flux` on all faces,
    /// periodic boundaries and no source terms.
    pub fn new<F>(equation: E, polynomial_degree: usize, surface_flux: F) -> Result<Self>
    where
        F: TwoPointFlux<N, E> + 'static,
    {
        let basis = LobattoLegendreBasis::new(polynomial_degree)?;
        Ok(Self {
            equation,
            basis,
            surface_flux: Arc::new(surface_flux),
            nonconservative: None,
            volume_integral: VolumeIntegral::WeakForm,
            boundary_conditions: BoundaryConditions2D::Periodic,
            source_terms: None,
        })
    }

    /// Set the volume integral.
    pub fn with_volume_integral(mut self, volume_integral: VolumeIntegral<N, E>) -> Self {
        self.volume_integral = volume_integral;
        self
    }

    /// Add a nonconservative term to every volume and surface coupling.
    pub fn with_nonconservative<F>(mut self, nonconservative: F) -> Self
    where
        F: NonconservativeFlux<N, E> + 'static,
    {
        self.nonconservative = Some(Arc::new(nonconservative));
        self
    }

    /// Set the boundary conditions.
    pub fn with_boundary_conditions(
        mut self,
        boundary_conditions: BoundaryConditions2D<N, E>,
    ) -> Self {
        self.boundary_conditions = boundary_conditions;
        self
    }

    /// Set the source terms.
    ///
    /// Use [`CombinedSource2D`](crate::source::CombinedSource2D) to compose several.
    pub fn with_source_terms<S>(mut self, source_terms: S) -> Self
    where
        S: SourceTerm2D<N, E> + 'static,
    {
        self.source_terms = Some(Arc::new(source_terms));
        self
    }

    /// The conservation law.
    #[inline]
    pub fn equation(&self) -> &E {
        &self.equation
    }

    /// The nodal basis.
    #[inline]
    pub fn basis(&self) -> &LobattoLegendreBasis {
        &self.basis
    }

    /// The volume integral.
    #[inline]
    pub fn volume_integral(&self) -> &VolumeIntegral<N, E> {
        &self.volume_integral
    }

    /// Nodes per direction, `K`.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.basis.n_nodes()
    }

    /// Build the evaluation cache for `mesh`.
    ///
    /// Fails with [`DGError::InvalidConfig`] when a nonconservative term is
    /// paired with the weak form, which has no volume coupling for it.
    pub fn create_cache<M: MeshTopology2D + ?Sized>(
        &self,
        mesh: &M,
        execution: Execution,
    ) -> Result<DGCache2D> {
        let weak_form = matches!(self.volume_integral, VolumeIntegral::WeakForm);
        if weak_form && self.nonconservative.is_some() {
            return Err(DGError::InvalidConfig(format!(
                "nonconservative terms of {} need a flux-differencing or finite-volume volume integral, got {}",
                self.equation.name(),
                self.volume_integral.name()
            )));
        }
        log::debug!(
            "{} with {} nodes/direction, volume integral {}, surface flux {}, boundaries {}",
            self.equation.name(),
            self.n_nodes(),
            self.volume_integral.name(),
            self.surface_flux.name(),
            self.boundary_conditions.describe()
        );
        DGCache2D::new(mesh, &self.basis, N, execution)
    }

    /// Nodal interpolation of `f(x, t)`.
    pub fn compute_coefficients<F>(&self, f: F, time: f64, cache: &DGCache2D) -> Solution2D<N>
    where
        F: Fn([f64; 2], f64) -> State<N>,
    {
        let n = self.n_nodes();
        let mut u = Solution2D::zeros(cache.n_elements(), n);
        for k in 0..cache.n_elements() {
            for j in 0..n {
                for i in 0..n {
                    u.set(k, i, j, f(cache.elements.node_coordinate(k, i, j), time));
                }
            }
        }
        u
    }

    /// Quadrature of `f(u)` over the whole domain.
    pub fn integrate<F>(&self, u: &Solution2D<N>, cache: &DGCache2D, f: F) -> f64
    where
        F: Fn(&State<N>, &E) -> f64,
    {
        let n = self.n_nodes();
        let weights = &self.basis.weights;
        let mut total = 0.0;
        for k in 0..u.n_elements {
            // Physical area per reference area: (h/2)² = 1/J⁻²
            let volume_jacobian = cache.elements.inverse_jacobian[k].powi(-2);
            let u_k = u.element(k);
            for j in 0..n {
                for i in 0..n {
                    let value = f(&node_state::<N>(u_k, n, i, j), &self.equation);
                    total += volume_jacobian * weights[i] * weights[j] * value;
                }
            }
        }
        total
    }

    /// Largest stable time step for `cfl`.
    ///
    /// `cfl · 2 / (K · max_e(J⁻¹_e · max_nodes(λ_x + λ_y)))`
    pub fn max_dt(&self, u: &Solution2D<N>, cache: &DGCache2D, cfl: f64) -> f64 {
        let n = self.n_nodes();
        let mut max_scaled_speed: f64 = 0.0;
        for k in 0..u.n_elements {
            let u_k = u.element(k);
            let mut max_lambda: f64 = 0.0;
            for j in 0..n {
                for i in 0..n {
                    let [lambda_x, lambda_y] =
                        self.equation.max_abs_speeds(&node_state::<N>(u_k, n, i, j));
                    max_lambda = max_lambda.max(lambda_x + lambda_y);
                }
            }
            max_scaled_speed = max_scaled_speed.max(cache.elements.inverse_jacobian[k] * max_lambda);
        }
        cfl * 2.0 / (n as f64 * max_scaled_speed)
    }
}
