use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use super::{peak_speed, velocity_color, PresentError, Presenter};
use crate::{field::Field, math::Vec2};

/// Writes every n-th frame into a directory as `frame_000042.png`.
///
/// The image size is independent of the grid: each pixel bilinearly
/// samples the velocity at its own center.
pub struct PngSequencePresenter {
    directory: PathBuf,
    width: u32,
    height: u32,
    every_nth: u64,
}

impl PngSequencePresenter {
    pub fn new(
        directory: impl AsRef<Path>,
        width: u32,
        height: u32,
        every_nth: u64,
    ) -> Result<Self, PresentError> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory).map_err(|error| {
            PresentError::UnableToCreateDirectory(directory.clone(), error)
        })?;
        log::info!(
            "Writing every {} frame(s) to {:?} at {}x{}",
            every_nth.max(1),
            directory,
            width,
            height
        );
        Ok(Self {
            directory,
            width,
            height,
            every_nth: every_nth.max(1),
        })
    }

    pub fn frame_path(&self, frame_index: u64) -> PathBuf {
        self.directory.join(format!("frame_{:06}.png", frame_index))
    }

    /// Resample the field to the output size. Image rows run top-down
    /// while grid rows run bottom-up.
    pub fn render(&self, velocity: &Field) -> RgbImage {
        let peak = peak_speed(velocity);
        let (width, height) = (self.width as f32, self.height as f32);
        RgbImage::from_fn(self.width, self.height, |px, py| {
            let uv = Vec2::new(
                (px as f32 + 0.5) / width,
                1.0 - (py as f32 + 0.5) / height,
            );
            Rgb(velocity_color(&velocity.sample(&uv), peak))
        })
    }
}

impl Presenter for PngSequencePresenter {
    fn present(
        &mut self,
        frame_index: u64,
        velocity: &Field,
    ) -> Result<(), PresentError> {
        if frame_index % self.every_nth != 0 {
            return Ok(());
        }
        let path = self.frame_path(frame_index);
        self.render(velocity).save(&path).map_err(|error| {
            PresentError::UnableToWriteFrame(frame_index, error)
        })?;
        log::debug!("wrote {:?}", path);
        Ok(())
    }
}
