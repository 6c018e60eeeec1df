//! Compute backends run kernels over rasterized primitives.
//!
//! The simulation never loops over cells itself. Every stage is a single
//! [ComputeBackend::dispatch] which evaluates a [Kernel] for each covered
//! cell of the output field. Inputs are shared borrows and the output is an
//! exclusive borrow, so a dispatch can never read the buffer it writes.

mod kernel;
mod parallel_backend;
mod serial_backend;

use std::str::FromStr;

use thiserror::Error;

use crate::{
    field::{write_texel, Field},
    geometry::Coverage,
    logging::PrettyList,
};

pub use self::{
    kernel::Kernel, parallel_backend::ParallelBackend,
    serial_backend::SerialBackend,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Unable to build the compute thread pool")]
    UnableToBuildThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Unknown compute backend {:?}, expected 'serial' or 'parallel'", .0)]
    UnknownBackend(String),
}

/// The capability every compute backend provides.
pub trait ComputeBackend {
    /// A short human readable name for logs.
    fn name(&self) -> &'static str;

    /// Evaluate `kernel` for every cell in `coverage` and write the results
    /// into `output`. Cells outside the coverage keep their contents.
    ///
    /// All inputs must have the output's shape. Writes are complete when
    /// this returns.
    fn dispatch(
        &self,
        kernel: &Kernel,
        coverage: &Coverage,
        inputs: &[&Field],
        output: &mut Field,
    );
}

/// Selects the compute backend at configuration time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Single threaded, deterministic reference backend.
    Serial,

    /// Rows are evaluated in parallel on a rayon thread pool.
    Parallel,
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(BackendKind::Serial),
            "parallel" => Ok(BackendKind::Parallel),
            _ => Err(BackendError::UnknownBackend(value.to_owned())),
        }
    }
}

/// Create the backend selected by `kind`.
///
/// `worker_threads` only applies to the parallel backend, zero lets rayon
/// pick one thread per core.
pub fn create_backend(
    kind: BackendKind,
    worker_threads: usize,
) -> Result<Box<dyn ComputeBackend>, BackendError> {
    let backend: Box<dyn ComputeBackend> = match kind {
        BackendKind::Serial => Box::new(SerialBackend),
        BackendKind::Parallel => Box::new(ParallelBackend::new(worker_threads)?),
    };
    log::info!(
        "Created the {} compute backend with kernels:{}",
        backend.name(),
        PrettyList(Kernel::NAMES)
    );
    Ok(backend)
}

/// Evaluate one row of a dispatch. Shared by every backend so the only
/// difference between them is how rows are scheduled.
fn evaluate_row(
    kernel: &Kernel,
    coverage: &Coverage,
    inputs: &[&Field],
    y: usize,
    row: &mut [f32],
    channels: usize,
) {
    if let Some(span) = coverage.row(y) {
        for x in span {
            let value = kernel.evaluate(inputs, x, y);
            write_texel(&mut row[x * channels..(x + 1) * channels], &value);
        }
    }
}

/// Programming errors in the stage table show up here in debug builds.
fn debug_check_dispatch(kernel: &Kernel, inputs: &[&Field], output: &Field) {
    debug_assert_eq!(
        inputs.len(),
        kernel.input_count(),
        "{} expects {} inputs",
        kernel.name(),
        kernel.input_count()
    );
    debug_assert!(
        inputs.iter().all(|input| input.same_shape(output)),
        "{} inputs must match the output shape",
        kernel.name()
    );
    debug_assert!(
        inputs.iter().all(|input| input.id() != output.id()),
        "{} reads {:?}, the field it writes",
        kernel.name(),
        output.label()
    );
}
