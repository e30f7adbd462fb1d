//! Source terms.
//!
//! Source terms represent contributions not part of the hyperbolic flux:
//!
//! du/dt = -∇·F(u) + S(u, x, t)
//!
//! They are evaluated at every node after the inverse-Jacobian scaling and
//! added to the time derivative.

use std::marker::PhantomData;

use crate::types::State;

/// Context for source term evaluation at a single node.
#[derive(Clone, Copy, Debug)]
pub struct SourceContext2D<const N: usize> {
    /// Current simulation time
    pub time: f64,
    /// Physical position (x, y)
    pub position: [f64; 2],
    /// Current state
    pub state: State<N>,
}

impl<const N: usize> SourceContext2D<N> {
    /// Create a new source context.
    pub fn new(time: f64, position: [f64; 2], state: State<N>) -> Self {
        Self {
            time,
            position,
            state,
        }
    }
}

/// Trait for source terms of an `N`-variable law `E`.
///
/// Implementations must be thread-safe (`Send + Sync`) for parallel computation.
pub trait SourceTerm2D<const N: usize, E>: Send + Sync {
    /// Evaluate the source term contribution at a single node.
    fn evaluate(&self, ctx: &SourceContext2D<N>, equation: &E) -> State<N>;

    /// Name of this source term for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Source term given by a closure `(ctx, equation) -> S`.
///
/// # Example
/// ```
/// use dg_tree::equations::LinearAdvection2D;
/// use dg_tree::source::{FnSource2D, SourceContext2D, SourceTerm2D};
///
/// let decay = FnSource2D::new("decay", |ctx: &SourceContext2D<1>, _eq: &LinearAdvection2D| {
///     [-0.1 * ctx.state[0]]
/// });
/// let eq = LinearAdvection2D::new(1.0, 1.0);
/// let s = decay.evaluate(&SourceContext2D::new(0.0, [0.0, 0.0], [2.0]), &eq);
/// assert!((s[0] + 0.2).abs() < 1e-15);
/// ```
pub struct FnSource2D<const N: usize, E, F> {
    name: &'static str,
    source: F,
    _equation: PhantomData<fn(&E)>,
}

impl<const N: usize, E, F> FnSource2D<N, E, F>
where
    F: Fn(&SourceContext2D<N>, &E) -> State<N> + Send + Sync,
{
    /// Wrap a closure under `name`.
    pub fn new(name: &'static str, source: F) -> Self {
        Self {
            name,
            source,
            _equation: PhantomData,
        }
    }
}

impl<const N: usize, E, F> SourceTerm2D<N, E> for FnSource2D<N, E, F>
where
    F: Fn(&SourceContext2D<N>, &E) -> State<N> + Send + Sync,
{
    #[inline]
    fn evaluate(&self, ctx: &SourceContext2D<N>, equation: &E) -> State<N> {
        (self.source)(ctx, equation)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Combine multiple source terms into one.
///
/// The combined source evaluates all constituent sources and sums their
/// contributions.
pub struct CombinedSource2D<const N: usize, E> {
    sources: Vec<Box<dyn SourceTerm2D<N, E>>>,
}

impl<const N: usize, E> CombinedSource2D<N, E> {
    /// Create a new combined source from a list of source terms.
    pub fn new(sources: Vec<Box<dyn SourceTerm2D<N, E>>>) -> Self {
        Self { sources }
    }

    /// Add a source term to the combination.
    pub fn add(&mut self, source: Box<dyn SourceTerm2D<N, E>>) {
        self.sources.push(source);
    }

    /// Number of source terms in the combination.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the combination is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<const N: usize, E> SourceTerm2D<N, E> for CombinedSource2D<N, E> {
    fn evaluate(&self, ctx: &SourceContext2D<N>, equation: &E) -> State<N> {
        let mut total = [0.0; N];
        for source in &self.sources {
            let s = source.evaluate(ctx, equation);
            for (t, v) in total.iter_mut().zip(s) {
                *t += v;
            }
        }
        total
    }

    fn name(&self) -> &'static str {
        "combined_2d"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::LinearAdvection2D;

    #[test]
    fn test_combined_source_sums_contributions() {
        let eq = LinearAdvection2D::new(1.0, 0.0);
        let position: Box<dyn SourceTerm2D<1, LinearAdvection2D>> = Box::new(FnSource2D::new(
            "position",
            |ctx: &SourceContext2D<1>, _: &LinearAdvection2D| [ctx.position[0]],
        ));
        let mut combined = CombinedSource2D::new(vec![position]);
        combined.add(Box::new(FnSource2D::new(
            "time",
            |ctx: &SourceContext2D<1>, _: &LinearAdvection2D| [ctx.time],
        )));
        assert_eq!(combined.len(), 2);

        let ctx = SourceContext2D::new(3.0, [0.25, 0.0], [1.0]);
        assert_eq!(combined.evaluate(&ctx, &eq), [3.25]);
    }

    #[test]
    fn test_empty_combination_is_zero() {
        let eq = LinearAdvection2D::new(1.0, 0.0);
        let combined = CombinedSource2D::<1, LinearAdvection2D>::new(Vec::new());
        assert!(combined.is_empty());
        assert_eq!(combined.evaluate(&SourceContext2D::new(0.0, [0.0; 2], [4.0]), &eq), [0.0]);
    }
}
