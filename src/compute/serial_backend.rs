use super::{debug_check_dispatch, evaluate_row, ComputeBackend, Kernel};
use crate::{field::Field, geometry::Coverage};

/// Evaluates every dispatch on the calling thread, one row at a time.
pub struct SerialBackend;

impl ComputeBackend for SerialBackend {
    fn name(&self) -> &'static str {
        "serial"
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
        for (y, row) in output.as_mut_slice().chunks_mut(stride).enumerate() {
            evaluate_row(kernel, coverage, inputs, y, row, channels);
        }
    }
}
