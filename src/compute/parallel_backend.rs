use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use super::{
    debug_check_dispatch, evaluate_row, BackendError, ComputeBackend, Kernel,
};
use crate::{field::Field, geometry::Coverage};

/// Evaluates dispatches with one task per output row on a dedicated rayon
/// pool. Rows are disjoint slices of the output, inputs are read-only.
pub struct ParallelBackend {
    pool: ThreadPool,
}

impl ParallelBackend {
    /// Build the worker pool. Zero threads lets rayon pick one per core.
    pub fn new(worker_threads: usize) -> Result<Self, BackendError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|index| format!("fluid-compute-{}", index))
            .build()?;
        log::debug!(
            "Parallel compute backend running on {} threads",
            pool.current_num_threads()
        );
        Ok(Self { pool })
    }
}

impl ComputeBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn dispatch(
        &self,
        kernel: &Kernel,
        coverage: &Coverage,
        inputs: &[&Field],
        output: &mut Field,
    ) {
        debug_check_dispatch(kernel, inputs, output);
        let channels = output.layout().channels();
        let stride = output.row_stride();
        let rows = output.as_mut_slice();
        self.pool.install(|| {
            rows.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(y, row)| {
                    evaluate_row(kernel, coverage, inputs, y, row, channels);
                });
        });
    }
}
