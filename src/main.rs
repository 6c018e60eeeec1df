use std::{
    io::BufRead,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

use anyhow::{Context, Result};
use fluidsim2d::{
    application::{Application, ImpulseSource},
    config::SimulationConfig,
    logging,
    presentation::PngSequencePresenter,
};

const DEFAULT_FRAME_BUDGET: u64 = 600;
const DEFAULT_OUTPUT_DIRECTORY: &str = "frames";

/// Only every n-th frame is written to disk.
const PRESENT_EVERY: u64 = 10;

/// Usage: `fluidsim2d [frames] [output directory]`
///
/// Tunables come from `FLUIDSIM_*` environment variables. Enter `q` to stop
/// early.
fn main() -> Result<()> {
    logging::setup()?;

    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(value) => value.parse().with_context(|| {
            format!("the frame count {:?} is not a number", value)
        })?,
        None => DEFAULT_FRAME_BUDGET,
    };
    let output = args
        .next()
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIRECTORY.to_owned());

    let config = SimulationConfig::from_env()
        .context("invalid FLUIDSIM_* configuration")?;
    log::info!("{:#?}", config);

    let presenter = PngSequencePresenter::new(
        &output,
        config.render_width,
        config.render_height,
        PRESENT_EVERY,
    )?;
    let app = Application::new(
        &config,
        ImpulseSource::from_config(&config),
        Box::new(presenter),
    )?
    .with_frame_budget(frames);

    watch_stdin(app.shutdown_flag())?;
    app.run()
}

/// Set `shutdown` when a line reading `q` arrives on stdin.
fn watch_stdin(shutdown: Arc<AtomicBool>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-watcher".to_owned())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) if line.trim() == "q" => {
                        shutdown.store(true, Ordering::Relaxed);
                        break;
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        })
        .context("unable to spawn the stdin watcher")?;
    Ok(())
}
