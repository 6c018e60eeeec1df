use std::str::FromStr;

use super::{ConfigError, SimulationConfig};

/// Every environment override starts with this prefix, e.g.
/// `FLUIDSIM_VISCOSITY=0.0005`.
const ENV_PREFIX: &str = "FLUIDSIM_";

impl SimulationConfig {
    /// Defaults overridden by any `FLUIDSIM_*` environment variables, then
    /// validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `FLUIDSIM_*` key, then validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        override_with(&mut config.grid_width, get("GRID_WIDTH"))?;
        override_with(&mut config.grid_height, get("GRID_HEIGHT"))?;
        override_with(&mut config.target_fps, get("TARGET_FPS"))?;
        override_with(
            &mut config.advection_dissipation,
            get("DISSIPATION"),
        )?;
        override_with(&mut config.vorticity, get("VORTICITY"))?;
        override_with(&mut config.viscosity, get("VISCOSITY"))?;
        override_with(&mut config.splat_radius, get("SPLAT_RADIUS"))?;
        override_with(
            &mut config.jacobi_iterations,
            get("JACOBI_ITERATIONS"),
        )?;
        override_with(&mut config.droplets, get("DROPLETS"))?;
        override_with(
            &mut config.droplet_delay_ms,
            get("DROPLET_DELAY_MS"),
        )?;
        override_with(&mut config.worker_threads, get("WORKER_THREADS"))?;
        override_with(&mut config.render_width, get("RENDER_WIDTH"))?;
        override_with(&mut config.render_height, get("RENDER_HEIGHT"))?;
        override_with(&mut config.max_dt, get("MAX_DT"))?;
        override_with(
            &mut config.warm_start_pressure,
            get("WARM_START_PRESSURE"),
        )?;
        if let Some((_, value)) = get("BACKEND") {
            config.backend = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn override_with<T: FromStr>(
    target: &mut T,
    entry: Option<(String, String)>,
) -> Result<(), ConfigError> {
    if let Some((key, value)) = entry {
        *target = value.trim().parse().map_err(|_| {
            ConfigError::UnparsableValue {
                key: key.clone(),
                value: value.clone(),
            }
        })?;
    }
    Ok(())
}
