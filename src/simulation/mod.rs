//! The per-frame stable fluids pipeline.
//!
//! [FluidSimulation] owns every field the solver needs and advances the
//! velocity by one frame per [FluidSimulation::step]. Each stage is a
//! single dispatch (or a short run of them) through the configured
//! [ComputeBackend]. The pipeline never touches cell data itself.

mod diagnostics;
mod fluid_simulation;
mod jacobi;

use thiserror::Error;

use crate::{
    compute::{BackendError, ComputeBackend},
    config::ConfigError,
    field::{Field, Grid, GridError, SwappableField},
    geometry::{BorderEdge, Coverage},
};

pub use self::{
    diagnostics::mean_abs_divergence,
    jacobi::{JacobiSolver, RightHandSide},
};

/// Everything which can go wrong before the first frame.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid simulation configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error("Unable to create the simulation grid")]
    InvalidGrid(#[from] GridError),

    #[error("Unable to create the compute backend")]
    BackendUnavailable(#[from] BackendError),
}

/// A 2D incompressible fluid on a fixed grid.
pub struct FluidSimulation {
    grid: Grid,
    backend: Box<dyn ComputeBackend>,

    velocity: SwappableField,
    pressure: SwappableField,

    /// Scratch fields, fully rewritten every frame.
    vorticity: Field,
    divergence: Field,
    pressure_gradient: Field,

    solver: JacobiSolver,

    full_screen: Coverage,
    interior: Coverage,
    border: Vec<(BorderEdge, Coverage)>,

    dissipation: f32,
    confinement: f32,
    viscosity: f32,
    splat_radius: f32,
    warm_start_pressure: bool,
}
