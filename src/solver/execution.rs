//! Execution strategies for the RHS stages.
//!
//! Every stage is one kernel over a flat index space (elements, interfaces,
//! boundaries or mortars). Each unit owns one contiguous block of the stage
//! output, so the kernel signature is
//!
//! ```text
//! kernel(unit_index, &mut unit_output, &mut Scratch)
//! ```
//!
//! and a strategy only decides how units are distributed:
//!
//! - [`Execution::Serial`]: one scratch, plain loop.
//! - `Execution::Threaded`: a fixed worker pool, one contiguous range of
//!   units and one scratch per worker.
//! - `Execution::Device`: one flat parallel-for with one lane per unit and
//!   lane-local scratch; the solution is staged into cache-owned buffers
//!   before the pipeline and back after it.
//!
//! A stage returns only once all of its units are done.

#[cfg(feature = "parallel")]
use std::cell::RefCell;
#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use thread_local::ThreadLocal;

#[cfg(feature = "parallel")]
use crate::error::DGError;
use crate::error::Result;

// ============================================================================
// Scratch buffers
// ============================================================================

/// Per-worker scratch used by stage kernels.
///
/// Sized once for a given `K` and `N`; kernels never allocate.
#[derive(Clone, Debug)]
pub struct Scratch {
    /// Finite-volume fluxes along x, left-sided, `(K + 1) K N`
    pub fstar1_l: Vec<f64>,
    /// Finite-volume fluxes along x, right-sided, `(K + 1) K N`
    pub fstar1_r: Vec<f64>,
    /// Finite-volume fluxes along y, left-sided, `(K + 1) K N`
    pub fstar2_l: Vec<f64>,
    /// Finite-volume fluxes along y, right-sided, `(K + 1) K N`
    pub fstar2_r: Vec<f64>,
    /// Large-element flux on the upper mortar half, `K N`
    pub mortar_upper: Vec<f64>,
    /// Large-element flux on the lower mortar half, `K N`
    pub mortar_lower: Vec<f64>,
    /// Face trace of one element, `K N`
    pub face_trace: Vec<f64>,
    /// Nodal indicator values, `K²`
    pub indicator: Vec<f64>,
    /// Modal coefficients, `K²`
    pub modal: Vec<f64>,
    /// Modal transform intermediate, `K²`
    pub modal_tmp: Vec<f64>,
}

impl Scratch {
    /// Allocate scratch for `n_nodes` nodes per direction and `n_vars` variables.
    pub fn new(n_nodes: usize, n_vars: usize) -> Self {
        let fv = (n_nodes + 1) * n_nodes * n_vars;
        let face = n_nodes * n_vars;
        let element = n_nodes * n_nodes;
        Self {
            fstar1_l: vec![0.0; fv],
            fstar1_r: vec![0.0; fv],
            fstar2_l: vec![0.0; fv],
            fstar2_r: vec![0.0; fv],
            mortar_upper: vec![0.0; face],
            mortar_lower: vec![0.0; face],
            face_trace: vec![0.0; face],
            indicator: vec![0.0; element],
            modal: vec![0.0; element],
            modal_tmp: vec![0.0; element],
        }
    }
}

// ============================================================================
// Strategy selection
// ============================================================================

/// How RHS stages are executed.
#[derive(Clone, Debug, Default)]
pub enum Execution {
    /// Single-threaded loop over units
    #[default]
    Serial,
    /// Units split into one contiguous range per pool worker
    #[cfg(feature = "parallel")]
    Threaded(Arc<rayon::ThreadPool>),
    /// One flat parallel-for per stage over staged buffers.
    ///
    /// Host-side emulation of device execution: "staging" copies the
    /// solution into cache-owned host buffers and back, and the lanes are
    /// rayon workers. No accelerator backend is involved.
    #[cfg(feature = "parallel")]
    Device(Arc<rayon::ThreadPool>),
}

impl Execution {
    /// Thread-parallel execution on a pool of `n_workers` threads.
    #[cfg(feature = "parallel")]
    pub fn threaded(n_workers: usize) -> Result<Self> {
        Ok(Self::Threaded(Arc::new(build_pool(n_workers, "dg-worker")?)))
    }

    /// Data-parallel execution with `n_lanes` concurrent lanes.
    #[cfg(feature = "parallel")]
    pub fn device(n_lanes: usize) -> Result<Self> {
        Ok(Self::Device(Arc::new(build_pool(n_lanes, "dg-lane")?)))
    }

    /// Number of units that run concurrently.
    pub fn width(&self) -> usize {
        match self {
            Self::Serial => 1,
            #[cfg(feature = "parallel")]
            Self::Threaded(pool) | Self::Device(pool) => pool.current_num_threads(),
        }
    }

    /// Whether the solution is staged into cache buffers around the pipeline.
    pub fn is_staged(&self) -> bool {
        match self {
            Self::Serial => false,
            #[cfg(feature = "parallel")]
            Self::Threaded(_) => false,
            #[cfg(feature = "parallel")]
            Self::Device(_) => true,
        }
    }

    /// Strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            #[cfg(feature = "parallel")]
            Self::Threaded(_) => "threaded",
            #[cfg(feature = "parallel")]
            Self::Device(_) => "device",
        }
    }
}

#[cfg(feature = "parallel")]
fn build_pool(n_threads: usize, prefix: &'static str) -> Result<rayon::ThreadPool> {
    if n_threads == 0 {
        return Err(DGError::InvalidConfig(format!(
            "{prefix} pool needs at least one thread"
        )));
    }
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(move |i| format!("{prefix}-{i}"))
        .build()?)
}

// ============================================================================
// Stage runner
// ============================================================================

/// Runs stage kernels under the chosen [`Execution`] with pool-scoped scratch.
#[derive(Debug)]
pub struct StageRunner {
    execution: Execution,
    workers: Vec<Scratch>,
    #[cfg(feature = "parallel")]
    lanes: ThreadLocal<RefCell<Scratch>>,
    n_nodes: usize,
    n_vars: usize,
}

impl StageRunner {
    /// Allocate one scratch per worker of `execution`.
    pub fn new(execution: Execution, n_nodes: usize, n_vars: usize) -> Self {
        let n_workers = match &execution {
            Execution::Serial => 1,
            #[cfg(feature = "parallel")]
            Execution::Threaded(pool) => pool.current_num_threads(),
            // Lanes create their scratch on first use
            #[cfg(feature = "parallel")]
            Execution::Device(_) => 0,
        };
        Self {
            workers: (0..n_workers).map(|_| Scratch::new(n_nodes, n_vars)).collect(),
            execution,
            #[cfg(feature = "parallel")]
            lanes: ThreadLocal::new(),
            n_nodes,
            n_vars,
        }
    }

    /// Execution strategy.
    #[inline]
    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Run `kernel` once per `stride`-sized block of `output`.
    ///
    /// `output.len()` must be a multiple of `stride`; the unit index passed
    /// to the kernel is the block index within `output`.
    pub fn for_each_unit<F>(&mut self, output: &mut [f64], stride: usize, kernel: F)
    where
        F: Fn(usize, &mut [f64], &mut Scratch) + Send + Sync,
    {
        if stride == 0 || output.is_empty() {
            return;
        }
        debug_assert_eq!(output.len() % stride, 0);

        match &self.execution {
            Execution::Serial => {
                let scratch = &mut self.workers[0];
                for (idx, unit) in output.chunks_mut(stride).enumerate() {
                    kernel(idx, unit, scratch);
                }
            }
            #[cfg(feature = "parallel")]
            Execution::Threaded(pool) => {
                let n_units = output.len() / stride;
                let per_worker = n_units.div_ceil(self.workers.len());
                let workers = &mut self.workers;
                pool.install(|| {
                    output
                        .par_chunks_mut(per_worker * stride)
                        .zip(workers.par_iter_mut())
                        .enumerate()
                        .for_each(|(w, (range, scratch))| {
                            for (local, unit) in range.chunks_mut(stride).enumerate() {
                                kernel(w * per_worker + local, unit, scratch);
                            }
                        });
                });
            }
            #[cfg(feature = "parallel")]
            Execution::Device(pool) => {
                let lanes = &self.lanes;
                let (n_nodes, n_vars) = (self.n_nodes, self.n_vars);
                pool.install(|| {
                    output
                        .par_chunks_mut(stride)
                        .enumerate()
                        .for_each(|(idx, unit)| {
                            let cell = lanes.get_or(|| RefCell::new(Scratch::new(n_nodes, n_vars)));
                            kernel(idx, unit, &mut cell.borrow_mut());
                        });
                });
            }
        }
    }
}
