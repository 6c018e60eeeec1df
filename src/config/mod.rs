//! The complete set of simulation tunables.

mod environment;

use thiserror::Error;

use crate::compute::{BackendError, BackendKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The grid must be at least 3x3 cells, got {}x{}", .width, .height)]
    GridTooSmall { width: usize, height: usize },

    #[error("The target frame rate must be positive, got {}", .0)]
    InvalidTargetFps(u32),

    #[error("Advection dissipation must be in (0, 1], got {}", .0)]
    InvalidDissipation(f32),

    #[error("Viscosity must be positive, got {}", .0)]
    InvalidViscosity(f32),

    #[error("The splat radius must be positive, got {}", .0)]
    InvalidSplatRadius(f32),

    #[error("Vorticity confinement must not be negative, got {}", .0)]
    InvalidVorticity(f32),

    #[error("At least 2 Jacobi iterations are required, got {}", .0)]
    TooFewJacobiIterations(usize),

    #[error("The droplet delay must not be negative, got {}ms", .0)]
    InvalidDropletDelay(f32),

    #[error("The maximum timestep must be positive, got {}", .0)]
    InvalidMaxTimestep(f32),

    #[error("The render target must not be empty, got {}x{}", .width, .height)]
    EmptyRenderTarget { width: u32, height: u32 },

    #[error("Unable to parse {} from {:?}", .key, .value)]
    UnparsableValue { key: String, value: String },

    #[error(transparent)]
    UnknownBackend(#[from] BackendError),
}

/// Every parameter the simulation exposes.
///
/// The defaults describe the interactive demo: an 800x800 render
/// target over an 802x802 grid (800x800 interior plus the border ring).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Grid width in cells, border included.
    pub grid_width: usize,

    /// Grid height in cells, border included.
    pub grid_height: usize,

    pub target_fps: u32,

    /// Fraction of velocity kept by advection each frame.
    pub advection_dissipation: f32,

    /// Vorticity confinement coefficient.
    pub vorticity: f32,

    pub viscosity: f32,

    /// Gaussian splat radius for impulses, in squared texture units.
    pub splat_radius: f32,

    /// Jacobi rounds per Poisson solve. Odd values are rounded down.
    pub jacobi_iterations: usize,

    /// Replace pointer input with randomly timed radial droplets.
    pub droplets: bool,

    /// Mean time between droplets in milliseconds.
    pub droplet_delay_ms: f32,

    pub backend: BackendKind,

    /// Parallel backend thread count, zero for one per core.
    pub worker_threads: usize,

    /// Presentation resolution, independent of the grid.
    pub render_width: u32,
    pub render_height: u32,

    /// Upper bound on the timestep handed to the pipeline, in seconds.
    pub max_dt: f32,

    /// Start each pressure solve from the previous frame's pressure. When
    /// disabled the pressure is cleared before every solve.
    pub warm_start_pressure: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 802,
            grid_height: 802,
            target_fps: 60,
            advection_dissipation: 0.99,
            vorticity: 0.005,
            viscosity: 0.001,
            splat_radius: 0.003,
            jacobi_iterations: 30,
            droplets: false,
            droplet_delay_ms: 1000.0,
            backend: BackendKind::Parallel,
            worker_threads: 0,
            render_width: 800,
            render_height: 800,
            max_dt: 1.0 / 30.0,
            warm_start_pressure: true,
        }
    }
}

impl SimulationConfig {
    /// Check every value against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::InvalidTargetFps(self.target_fps));
        }
        if !(self.advection_dissipation > 0.0
            && self.advection_dissipation <= 1.0)
        {
            return Err(ConfigError::InvalidDissipation(
                self.advection_dissipation,
            ));
        }
        if !(self.viscosity > 0.0) {
            return Err(ConfigError::InvalidViscosity(self.viscosity));
        }
        if !(self.splat_radius > 0.0) {
            return Err(ConfigError::InvalidSplatRadius(self.splat_radius));
        }
        if !(self.vorticity >= 0.0) {
            return Err(ConfigError::InvalidVorticity(self.vorticity));
        }
        if self.jacobi_iterations < 2 {
            return Err(ConfigError::TooFewJacobiIterations(
                self.jacobi_iterations,
            ));
        }
        if !(self.droplet_delay_ms >= 0.0) {
            return Err(ConfigError::InvalidDropletDelay(
                self.droplet_delay_ms,
            ));
        }
        if !(self.max_dt > 0.0) {
            return Err(ConfigError::InvalidMaxTimestep(self.max_dt));
        }
        if self.render_width == 0 || self.render_height == 0 {
            return Err(ConfigError::EmptyRenderTarget {
                width: self.render_width,
                height: self.render_height,
            });
        }
        Ok(())
    }

    /// The Jacobi round count actually used: rounded down to an even number
    /// so the converged answer always lands in the front buffer.
    pub fn jacobi_rounds(&self) -> usize {
        self.jacobi_iterations & !1
    }

    /// A grid of `width x height` interior cells plus the border ring.
    pub fn with_interior(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width + 2;
        self.grid_height = height + 2;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.jacobi_rounds(), 30);
    }

    #[test]
    fn odd_jacobi_counts_round_down() {
        let config = SimulationConfig {
            jacobi_iterations: 31,
            ..Default::default()
        };
        assert_eq!(config.jacobi_rounds(), 30);

        let config = SimulationConfig {
            jacobi_iterations: 3,
            ..Default::default()
        };
        assert_eq!(config.jacobi_rounds(), 2);
    }

    #[test]
    fn with_interior_adds_the_border() {
        let config = SimulationConfig::default().with_interior(64, 32);
        assert_eq!((config.grid_width, config.grid_height), (66, 34));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cases = [
            SimulationConfig {
                grid_width: 2,
                ..Default::default()
            },
            SimulationConfig {
                target_fps: 0,
                ..Default::default()
            },
            SimulationConfig {
                advection_dissipation: 1.5,
                ..Default::default()
            },
            SimulationConfig {
                viscosity: 0.0,
                ..Default::default()
            },
            SimulationConfig {
                splat_radius: f32::NAN,
                ..Default::default()
            },
            SimulationConfig {
                jacobi_iterations: 1,
                ..Default::default()
            },
            SimulationConfig {
                droplet_delay_ms: -5.0,
                ..Default::default()
            },
            SimulationConfig {
                max_dt: -1.0,
                ..Default::default()
            },
            SimulationConfig {
                render_height: 0,
                ..Default::default()
            },
        ];
        for config in cases.iter() {
            assert!(config.validate().is_err(), "{:?} passed", config);
        }
    }
}
