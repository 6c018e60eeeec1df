use super::{FluidSimulation, JacobiSolver, RightHandSide, SetupError};
use crate::{
    compute::{create_backend, ComputeBackend, Kernel},
    config::SimulationConfig,
    field::{ChannelLayout, Field, Grid, SwappableField},
    geometry::{Border, Primitive},
    impulse::{ImpulseState, Injection},
    math::{clamp_components, Vec2},
};

impl FluidSimulation {
    /// Build the simulation and the compute backend named by the config.
    pub fn new(config: &SimulationConfig) -> Result<Self, SetupError> {
        let backend = create_backend(config.backend, config.worker_threads)?;
        Self::with_backend(config, backend)
    }

    /// Build the simulation on top of an existing backend.
    pub fn with_backend(
        config: &SimulationConfig,
        backend: Box<dyn ComputeBackend>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;
        let border = Border::new(&grid)
            .edges()
            .iter()
            .map(|edge| (*edge, edge.line.coverage(&grid)))
            .collect();

        log::info!(
            "Created a {}x{} fluid on the {} backend with {} jacobi rounds",
            grid.width(),
            grid.height(),
            backend.name(),
            config.jacobi_rounds()
        );

        Ok(Self {
            velocity: SwappableField::new(
                grid,
                ChannelLayout::Vector,
                "velocity",
            ),
            pressure: SwappableField::new(
                grid,
                ChannelLayout::Scalar,
                "pressure",
            ),
            vorticity: Field::new(grid, ChannelLayout::Scalar, "vorticity"),
            divergence: Field::new(grid, ChannelLayout::Scalar, "divergence"),
            pressure_gradient: Field::new(
                grid,
                ChannelLayout::Vector,
                "pressure gradient",
            ),
            solver: JacobiSolver::new(grid, config.jacobi_rounds()),
            full_screen: Primitive::full_screen().coverage(&grid),
            interior: Primitive::interior(&grid).coverage(&grid),
            border,
            dissipation: config.advection_dissipation,
            confinement: config.vorticity,
            viscosity: config.viscosity,
            splat_radius: config.splat_radius,
            warm_start_pressure: config.warm_start_pressure,
            grid,
            backend,
        })
    }

    /// Advance the velocity field by `dt` seconds.
    ///
    /// Stage order matters: diffusion and projection must follow every
    /// stage which adds momentum, and the boundary is re-imposed after
    /// projection so the front velocity always satisfies no-slip walls.
    /// Returns the injection kernel dispatched this frame, if any.
    pub fn step(
        &mut self,
        dt: f32,
        impulse: &ImpulseState,
    ) -> Option<Injection> {
        debug_assert!(dt > 0.0, "the timestep must be positive");

        self.enforce_boundary(-1.0);
        self.advect(dt);
        let injection = self.inject(dt, impulse);
        self.compute_vorticity();
        self.enforce_boundary(-1.0);
        self.confine_vorticity(dt);
        self.diffuse(dt);
        self.project();

        injection
    }

    /// Overwrite the velocity border with `scale` times each border cell's
    /// inward neighbor. The interior is carried over unchanged.
    pub fn enforce_boundary(&mut self, scale: f32) {
        log::trace!("boundary x{}", scale);
        let (front, back) = self.velocity.split_mut();
        self.backend
            .dispatch(&Kernel::Copy, &self.full_screen, &[front], back);
        for (edge, coverage) in &self.border {
            let kernel = Kernel::Boundary {
                scale,
                inward: edge.inward,
            };
            self.backend.dispatch(&kernel, coverage, &[front], back);
        }
        self.velocity.swap_buffers();
    }

    fn advect(&mut self, dt: f32) {
        log::trace!("advect");
        let kernel = Kernel::Advect {
            dt,
            dissipation: self.dissipation,
        };
        let (front, back) = self.velocity.split_mut();
        self.backend
            .dispatch(&kernel, &self.interior, &[front, front], back);
        self.velocity.swap_buffers();
    }

    fn inject(
        &mut self,
        dt: f32,
        impulse: &ImpulseState,
    ) -> Option<Injection> {
        let injection = impulse.injection()?;
        log::trace!("inject {:?}", injection);

        let grid_scale = self.grid.grid_scale();
        let position = impulse.current_pos.component_mul(&grid_scale);
        let force = clamp_components(&impulse.delta, &grid_scale);
        let kernel = match injection {
            Injection::Directional => Kernel::Impulse {
                position,
                force,
                radius: self.splat_radius,
                dt,
            },
            Injection::Radial => Kernel::RadialImpulse {
                position,
                strength: force.norm(),
                radius: self.splat_radius,
                dt,
            },
        };

        let (front, back) = self.velocity.split_mut();
        self.backend.dispatch(&kernel, &self.interior, &[front], back);
        self.velocity.swap_buffers();
        Some(injection)
    }

    fn compute_vorticity(&mut self) {
        log::trace!("vorticity");
        self.backend.dispatch(
            &Kernel::Vorticity,
            &self.interior,
            &[self.velocity.front()],
            &mut self.vorticity,
        );
    }

    fn confine_vorticity(&mut self, dt: f32) {
        log::trace!("vorticity confinement");
        let kernel = Kernel::AddVorticity {
            confinement: self.confinement,
            dt,
        };
        let (front, back) = self.velocity.split_mut();
        self.backend.dispatch(
            &kernel,
            &self.interior,
            &[front, &self.vorticity],
            back,
        );
        self.velocity.swap_buffers();
    }

    fn diffuse(&mut self, dt: f32) {
        log::trace!("diffuse");
        let h = self.grid.cell_size();
        let alpha = h * h / (self.viscosity * dt);
        self.solver.solve(
            &*self.backend,
            &mut self.velocity,
            RightHandSide::Front,
            alpha,
            alpha + 4.0,
        );
    }

    fn project(&mut self) {
        log::trace!("project");
        self.backend.dispatch(
            &Kernel::Divergence,
            &self.interior,
            &[self.velocity.front()],
            &mut self.divergence,
        );

        if !self.warm_start_pressure {
            self.backend.dispatch(
                &Kernel::Clear,
                &self.full_screen,
                &[],
                self.pressure.front_mut(),
            );
        }
        let h = self.grid.cell_size();
        self.solver.solve(
            &*self.backend,
            &mut self.pressure,
            RightHandSide::Field(&self.divergence),
            -h * h,
            4.0,
        );

        self.backend.dispatch(
            &Kernel::Gradient,
            &self.interior,
            &[self.pressure.front()],
            &mut self.pressure_gradient,
        );

        let (front, back) = self.velocity.split_mut();
        self.backend.dispatch(
            &Kernel::Subtract,
            &self.interior,
            &[front, &self.pressure_gradient],
            back,
        );
        self.velocity.swap_buffers();

        self.enforce_boundary(-1.0);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current velocity, in texture units per second.
    pub fn velocity(&self) -> &Field {
        self.velocity.front()
    }

    /// Host access to the current velocity for initial conditions.
    pub fn velocity_mut(&mut self) -> &mut Field {
        self.velocity.front_mut()
    }

    pub fn pressure(&self) -> &Field {
        self.pressure.front()
    }

    pub fn vorticity(&self) -> &Field {
        &self.vorticity
    }

    /// The divergence measured before the last projection.
    pub fn divergence(&self) -> &Field {
        &self.divergence
    }

    /// Velocity at a texture-space position.
    pub fn sample_velocity(&self, uv: &Vec2) -> Vec2 {
        self.velocity.front().sample(uv)
    }
}
