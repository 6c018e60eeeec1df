//! The frame loop which wires input, the simulation, presentation and
//! pacing together.
//!
//! # Example
//!
//! ```no_run
//! # use fluidsim2d::{application::*, config::*, presentation::*};
//! # fn main() -> anyhow::Result<()> {
//! let config = SimulationConfig::from_env()?;
//! let presenter = PngSequencePresenter::new("frames", 800, 800, 10)?;
//! let source = ImpulseSource::droplets(&config);
//! Application::new(&config, source, Box::new(presenter))?
//!     .with_frame_budget(600)
//!     .run()
//! # }
//! ```

mod frame_loop;

pub use self::frame_loop::clamp_timestep;

use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

use crate::{
    impulse::{DropletGenerator, ImpulseState, PointerInput},
    presentation::Presenter,
    simulation::FluidSimulation,
    timing::{FrameClock, FrameLimiter, SystemClock},
};

/// The timestep used for the very first frame, before any frame time has
/// been measured.
pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

/// The smallest timestep handed to the simulation.
pub const MIN_DT: f32 = 1.0e-4;

/// Frames between periodic stats logs.
const STATS_INTERVAL: u64 = 120;

/// Where each frame's impulse comes from. Live input and droplets are
/// mutually exclusive.
pub enum ImpulseSource {
    Pointer(Box<dyn PointerInput>),
    Droplets(DropletGenerator),
}

/// The application's state.
pub struct Application<C: FrameClock = SystemClock> {
    simulation: FluidSimulation,
    impulse: ImpulseState,
    source: ImpulseSource,
    presenter: Box<dyn Presenter>,
    limiter: FrameLimiter<C>,

    shutdown: Arc<AtomicBool>,
    frame_budget: Option<u64>,
    max_dt: f32,

    frame_index: u64,
    last_frame: Option<Duration>,
}
