//! Presentation collaborators consume the velocity field once per frame.
//!
//! The simulation knows nothing about how it is shown. The application
//! hands the front velocity field to a [Presenter] after every step.

mod png_sequence;

use thiserror::Error;

use crate::{field::Field, math::Vec2};

pub use self::png_sequence::PngSequencePresenter;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("Unable to prepare the output directory {:?}", .0)]
    UnableToCreateDirectory(std::path::PathBuf, #[source] std::io::Error),

    #[error("Unable to write frame {}", .0)]
    UnableToWriteFrame(u64, #[source] image::ImageError),
}

/// Shows (or records) the velocity field.
pub trait Presenter {
    fn present(
        &mut self,
        frame_index: u64,
        velocity: &Field,
    ) -> Result<(), PresentError>;
}

/// The largest speed anywhere in the field.
pub fn peak_speed(velocity: &Field) -> f32 {
    let mut peak = 0.0f32;
    for y in 0..velocity.height() {
        for x in 0..velocity.width() {
            peak = peak.max(velocity.at(x, y).norm());
        }
    }
    peak
}

/// Colour a velocity relative to the frame's peak speed: red and green
/// follow the x and y components around mid grey, blue follows the speed.
pub fn velocity_color(velocity: &Vec2, peak: f32) -> [u8; 3] {
    if !(peak > 0.0) {
        return [128, 128, 0];
    }
    let v = velocity / peak;
    [
        to_channel(0.5 + 0.5 * v.x),
        to_channel(0.5 + 0.5 * v.y),
        to_channel(v.norm()),
    ]
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
