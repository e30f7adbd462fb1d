//! Right-hand side evaluation.
//!
//! One call runs a fixed sequence of stages, each reading only what earlier
//! stages wrote:
//!
//! 1. volume integral (each element zeroes and fills its `du` block)
//! 2. prolong to interfaces, interface flux
//! 3. prolong to boundaries, boundary flux (per direction)
//! 4. prolong to mortars, mortar flux
//! 5. gather face fluxes into `surface_flux_values`
//! 6. surface integral
//! 7. `du *= -1/J`
//! 8. source terms

use crate::equations::ConservationLaw2D;

use super::boundary_flux::{calc_boundary_flux, prolong2boundaries};
use super::cache::DGCache2D;
use super::dg2d::DGSolver2D;
use super::interface_flux::{calc_interface_flux, prolong2interfaces};
use super::mortar_flux::{calc_mortar_flux, prolong2mortars};
use super::solution::Solution2D;
use super::surface_integral::{
    apply_jacobian, calc_sources, calc_surface_integral, gather_face_fluxes,
};
use super::volume_integral::{VolumeContext, calc_volume_integral};

impl<const N: usize, E: ConservationLaw2D<N>> DGSolver2D<N, E> {
    /// Evaluate `du = L(u, t)`.
    ///
    /// # Panics
    ///
    /// If `u`, `du` and `cache` do not belong to this solver, or if the
    /// boundary conditions are periodic but the mesh has boundary faces.
    pub fn rhs(&self, du: &mut Solution2D<N>, u: &Solution2D<N>, time: f64, cache: &mut DGCache2D) {
        assert_eq!(u.n_nodes, self.n_nodes(), "solution has wrong polynomial degree");
        assert_eq!(cache.elements.n_vars, N, "cache built for a different number of variables");
        assert_eq!(u.n_elements, cache.n_elements(), "solution and cache disagree on elements");
        assert_eq!(du.data.len(), u.data.len(), "du and u have different shapes");
        if self.boundary_conditions.is_periodic() {
            assert!(
                cache.boundaries.is_empty(),
                "periodic boundary conditions on a mesh with {} boundary faces",
                cache.boundaries.len()
            );
        }

        if cache.execution().is_staged() {
            let mut staged_u = std::mem::take(&mut cache.staged_u);
            let mut staged_du = std::mem::take(&mut cache.staged_du);
            staged_u.clear();
            staged_u.extend_from_slice(&u.data);
            staged_du.resize(du.data.len(), 0.0);

            self.run_stages(&mut staged_du, &staged_u, time, cache);

            du.data.copy_from_slice(&staged_du);
            cache.staged_u = staged_u;
            cache.staged_du = staged_du;
        } else {
            self.run_stages(&mut du.data, &u.data, time, cache);
        }
    }

    fn run_stages(&self, du: &mut [f64], u: &[f64], time: f64, cache: &mut DGCache2D) {
        let n = self.n_nodes();
        let equation = &self.equation;
        let surface_flux = self.surface_flux.as_ref();
        let nonconservative = self.nonconservative.as_deref();
        let mortar_l2 = &self.basis.mortar;
        let DGCache2D {
            elements,
            interfaces,
            boundaries,
            mortars,
            blending,
            runner,
            ..
        } = cache;

        log::trace!("rhs t = {time}: {} volume integral", self.volume_integral.name());
        let ctx = VolumeContext {
            equation,
            basis: &self.basis,
            nonconservative,
        };
        calc_volume_integral(du, u, &self.volume_integral, &ctx, blending, runner);

        prolong2interfaces::<N>(interfaces, u, n, runner);
        calc_interface_flux(interfaces, equation, surface_flux, nonconservative, n, runner);

        prolong2boundaries::<N>(boundaries, u, n, runner);
        calc_boundary_flux(
            boundaries,
            &self.boundary_conditions,
            equation,
            surface_flux,
            nonconservative,
            time,
            n,
            runner,
        );

        prolong2mortars::<N>(mortars, u, mortar_l2, n, runner);
        calc_mortar_flux(mortars, equation, surface_flux, nonconservative, mortar_l2, n, runner);

        log::trace!(
            "rhs t = {time}: {} interface, {} boundary, {} mortar fluxes",
            interfaces.len(),
            boundaries.len(),
            mortars.len()
        );

        gather_face_fluxes(elements, interfaces, boundaries, mortars, runner);
        calc_surface_integral::<N>(du, elements, self.basis.boundary_interpolation, runner);
        apply_jacobian(du, elements, runner);

        if let Some(source_terms) = &self.source_terms {
            calc_sources(du, u, source_terms.as_ref(), equation, elements, time, runner);
        }
    }
}
