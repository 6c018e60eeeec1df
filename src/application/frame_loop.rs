use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{Context, Result};

use super::{
    Application, ImpulseSource, FIRST_FRAME_DT, MIN_DT, STATS_INTERVAL,
};
use crate::{
    config::SimulationConfig,
    impulse::{DropletGenerator, ImpulseState, ScriptedPointer},
    presentation::Presenter,
    simulation::{mean_abs_divergence, FluidSimulation},
    timing::{FrameClock, FrameLimiter, SystemClock},
};

/// Frames between radial bursts of the scripted pointer.
const RADIAL_PERIOD: u64 = 300;

impl ImpulseSource {
    /// The source the config asks for: droplets when enabled, otherwise a
    /// scripted pointer sweeping the grid.
    pub fn from_config(config: &SimulationConfig) -> Self {
        if config.droplets {
            Self::droplets(config)
        } else {
            Self::scripted_pointer(config)
        }
    }

    pub fn droplets(config: &SimulationConfig) -> Self {
        ImpulseSource::Droplets(DropletGenerator::new(config.droplet_delay_ms))
    }

    pub fn scripted_pointer(config: &SimulationConfig) -> Self {
        let pointer = ScriptedPointer::new(config.grid_width, config.grid_height)
            .with_radial_period(RADIAL_PERIOD);
        ImpulseSource::Pointer(Box::new(pointer))
    }

    /// Write this frame's impulse.
    fn produce(
        &mut self,
        dt: f32,
        simulation: &FluidSimulation,
        impulse: &mut ImpulseState,
    ) {
        match self {
            ImpulseSource::Pointer(pointer) => {
                let sample = pointer.poll_pointer();
                impulse.update(
                    sample.x,
                    sample.y,
                    sample.primary,
                    sample.secondary,
                );
            }
            ImpulseSource::Droplets(droplets) => {
                droplets.drive(dt, simulation.grid(), impulse);
            }
        }
    }
}

impl Application<SystemClock> {
    /// Build a new instance of the application paced by the wall clock.
    ///
    /// Returns `Err()` if the configuration is invalid or the compute
    /// backend can't be created.
    pub fn new(
        config: &SimulationConfig,
        source: ImpulseSource,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self> {
        Self::with_clock(config, source, presenter, SystemClock::new())
    }
}

impl<C: FrameClock> Application<C> {
    /// Build the application paced by `clock`.
    pub fn with_clock(
        config: &SimulationConfig,
        source: ImpulseSource,
        presenter: Box<dyn Presenter>,
        clock: C,
    ) -> Result<Self> {
        let simulation = FluidSimulation::new(config)
            .context("unable to create the fluid simulation")?;
        Ok(Self::assemble(config, simulation, source, presenter, clock))
    }

    /// Build the application around an existing simulation.
    pub fn assemble(
        config: &SimulationConfig,
        simulation: FluidSimulation,
        source: ImpulseSource,
        presenter: Box<dyn Presenter>,
        clock: C,
    ) -> Self {
        Self {
            simulation,
            impulse: ImpulseState::default(),
            source,
            presenter,
            limiter: FrameLimiter::with_clock(config.target_fps, clock),
            shutdown: Arc::new(AtomicBool::new(false)),
            frame_budget: None,
            max_dt: config.max_dt,
            frame_index: 0,
            last_frame: None,
        }
    }

    /// Stop after `frames` frames.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.frame_budget = Some(frames);
        self
    }

    /// A handle which stops the loop at the top of the next frame once set.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Run the application, blocks until the loop exits.
    pub fn run(mut self) -> Result<()> {
        while !self.should_stop() {
            self.update()?;
        }
        log::info!("Stopped after {} frames", self.frame_index);
        Ok(())
    }

    /// Run exactly one frame.
    pub fn update(&mut self) -> Result<()> {
        let now = self.limiter.clock().now();
        let dt = match self.last_frame {
            Some(last) => (now - last).as_secs_f32(),
            None => FIRST_FRAME_DT,
        };
        self.last_frame = Some(now);
        let dt = clamp_timestep(dt, self.max_dt);

        self.source.produce(dt, &self.simulation, &mut self.impulse);
        self.simulation.step(dt, &self.impulse);
        self.presenter
            .present(self.frame_index, self.simulation.velocity())
            .with_context(|| {
                format!("unable to present frame {}", self.frame_index)
            })?;
        self.limiter.regulate();

        self.frame_index += 1;
        if self.frame_index % STATS_INTERVAL == 0 {
            log::info!(
                "frame {}: {:.1} fps, delay {:?}, mean |div u| {:.3e}",
                self.frame_index,
                self.limiter.average_fps(),
                self.limiter.delay(),
                mean_abs_divergence(self.simulation.velocity())
            );
        }
        Ok(())
    }

    pub fn frames_completed(&self) -> u64 {
        self.frame_index
    }

    pub fn simulation(&self) -> &FluidSimulation {
        &self.simulation
    }

    fn should_stop(&self) -> bool {
        if self.shutdown.load(Ordering::Relaxed) {
            return true;
        }
        matches!(self.frame_budget, Some(budget) if self.frame_index >= budget)
    }
}

/// Keep the timestep in `[MIN_DT, max_dt]`. Long stalls would otherwise
/// blow up the explicit stages.
pub fn clamp_timestep(dt: f32, max_dt: f32) -> f32 {
    dt.max(MIN_DT).min(max_dt)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use super::*;
    use crate::{
        compute::SerialBackend, field::Field, presentation::PresentError,
    };

    /// Time only moves when the limiter sleeps.
    struct SleepOnlyClock {
        now: Duration,
    }

    impl FrameClock for SleepOnlyClock {
        fn now(&self) -> Duration {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.now += duration;
        }
    }

    #[derive(Clone, Default)]
    struct RecordingPresenter {
        frames: Rc<RefCell<Vec<u64>>>,
    }

    impl Presenter for RecordingPresenter {
        fn present(
            &mut self,
            frame_index: u64,
            _velocity: &Field,
        ) -> Result<(), PresentError> {
            self.frames.borrow_mut().push(frame_index);
            Ok(())
        }
    }

    fn application(
        source: ImpulseSource,
        presenter: RecordingPresenter,
    ) -> Application<SleepOnlyClock> {
        let config = SimulationConfig::default().with_interior(16, 16);
        let simulation =
            FluidSimulation::with_backend(&config, Box::new(SerialBackend))
                .unwrap();
        Application::assemble(
            &config,
            simulation,
            source,
            Box::new(presenter),
            SleepOnlyClock {
                now: Duration::ZERO,
            },
        )
    }

    #[test]
    fn frame_budget_bounds_the_loop() {
        let presenter = RecordingPresenter::default();
        let config = SimulationConfig::default().with_interior(16, 16);
        let app = application(
            ImpulseSource::scripted_pointer(&config),
            presenter.clone(),
        )
        .with_frame_budget(5);

        app.run().unwrap();

        assert_eq!(*presenter.frames.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn shutdown_is_checked_before_each_frame() {
        let presenter = RecordingPresenter::default();
        let app = application(
            ImpulseSource::Droplets(DropletGenerator::with_seed(100.0, 1)),
            presenter.clone(),
        );
        app.shutdown_flag().store(true, Ordering::Relaxed);

        app.run().unwrap();

        assert!(presenter.frames.borrow().is_empty());
    }

    #[test]
    fn droplets_fall_on_the_first_frame() {
        let mut app = application(
            ImpulseSource::Droplets(DropletGenerator::with_seed(100.0, 5)),
            RecordingPresenter::default(),
        );
        app.update().unwrap();

        assert_eq!(app.frames_completed(), 1);
        assert!(app.impulse.force_active && app.impulse.radial);
    }

    #[test]
    fn timesteps_are_clamped() {
        assert_eq!(clamp_timestep(0.0, 1.0 / 30.0), MIN_DT);
        assert_eq!(clamp_timestep(2.0, 1.0 / 30.0), 1.0 / 30.0);
        assert_eq!(clamp_timestep(0.01, 1.0 / 30.0), 0.01);
    }
}
