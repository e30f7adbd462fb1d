//! Boundary conditions.
//!
//! A boundary condition turns the interior trace state at a boundary node
//! into the flux stored on that face. It receives the numerical flux (and,
//! for laws with nonconservative terms, the nonconservative flux) as a
//! callback, so the same condition works with any flux choice.
//!
//! # Available Boundary Conditions
//!
//! | BC Type | Description |
//! |---------|-------------|
//! | `BoundaryConditionDirichlet` | External state from a function of (x, t) |
//! | `BoundaryConditionSlipWall` | Shallow water wall, mirrored normal momentum |
//!
//! # Side convention
//!
//! On `+x`/`+y` faces the interior is the left state of the numerical
//! flux; on `-x`/`-y` faces it is the right state.

mod dirichlet;
mod slip_wall;

pub use dirichlet::BoundaryConditionDirichlet;
pub use slip_wall::BoundaryConditionSlipWall;

use std::sync::Arc;

use crate::flux::{NonconservativeFlux, TwoPointFlux};
use crate::types::{Direction, DirectionMap, Orientation, State};

/// Context for boundary condition evaluation at one face node.
#[derive(Clone, Copy, Debug)]
pub struct BCContext2D {
    /// Current simulation time
    pub time: f64,
    /// Physical position of the face node
    pub position: [f64; 2],
    /// Face normal axis
    pub orientation: Orientation,
    /// Element face on the boundary
    pub direction: Direction,
}

impl BCContext2D {
    /// Create a new boundary condition context.
    pub fn new(time: f64, position: [f64; 2], direction: Direction) -> Self {
        Self {
            time,
            position,
            orientation: direction.orientation(),
            direction,
        }
    }

    /// Order `(u_inner, u_outer)` as `(left, right)` for the numerical flux.
    #[inline]
    pub fn ordered<'a, const N: usize>(
        &self,
        u_inner: &'a State<N>,
        u_outer: &'a State<N>,
    ) -> (&'a State<N>, &'a State<N>) {
        if self.direction.is_positive() {
            (u_inner, u_outer)
        } else {
            (u_outer, u_inner)
        }
    }
}

/// Trait for boundary conditions of an `N`-variable law `E`.
pub trait BoundaryCondition2D<const N: usize, E>: Send + Sync {
    /// Flux through the boundary face at one node.
    fn surface_flux(
        &self,
        u_inner: &State<N>,
        ctx: &BCContext2D,
        surface_flux: &dyn TwoPointFlux<N, E>,
        equation: &E,
    ) -> State<N>;

    /// Nonconservative term at one node, seen from the interior.
    ///
    /// The caller weights the result by `0.5`.
    fn nonconservative_flux(
        &self,
        u_inner: &State<N>,
        ctx: &BCContext2D,
        nonconservative_flux: &dyn NonconservativeFlux<N, E>,
        equation: &E,
    ) -> State<N>;

    /// Name of this boundary condition for debugging/logging.
    fn name(&self) -> &'static str;
}

/// Boundary conditions for the whole domain.
pub enum BoundaryConditions2D<const N: usize, E> {
    /// Fully periodic domain; the mesh must have no boundary faces.
    Periodic,
    /// One condition per physical direction.
    PerDirection(DirectionMap<Arc<dyn BoundaryCondition2D<N, E>>>),
}

impl<const N: usize, E> BoundaryConditions2D<N, E> {
    /// The same condition on all four sides.
    pub fn uniform(condition: Arc<dyn BoundaryCondition2D<N, E>>) -> Self {
        Self::PerDirection(DirectionMap::uniform(condition))
    }

    /// Condition applied on faces of `direction`, if any.
    #[inline]
    pub fn get(&self, direction: Direction) -> Option<&dyn BoundaryCondition2D<N, E>> {
        match self {
            Self::Periodic => None,
            Self::PerDirection(map) => Some(&**map.get(direction)),
        }
    }

    /// Whether no boundary conditions are set.
    #[inline]
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Periodic)
    }

    /// Names per direction, for logging.
    pub fn describe(&self) -> String {
        match self {
            Self::Periodic => "periodic".to_string(),
            Self::PerDirection(map) => DirectionMap::new(
                map.x_neg.name(),
                map.x_pos.name(),
                map.y_neg.name(),
                map.y_pos.name(),
            )
            .to_string(),
        }
    }
}

impl<const N: usize, E> Clone for BoundaryConditions2D<N, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Periodic => Self::Periodic,
            Self::PerDirection(map) => Self::PerDirection(map.clone()),
        }
    }
}
