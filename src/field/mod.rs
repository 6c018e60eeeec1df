//! The buffer model for the simulation.
//!
//! Every physical quantity lives in a [Field]: a fixed-shape 2D array of one
//! or two float channels. Quantities which are updated by a sequence of
//! kernels are double-buffered in a [SwappableField] so that no dispatch ever
//! reads the buffer it writes.

mod field;
mod grid;
mod swappable_field;

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::math::Vec2;

pub use self::swappable_field::SwappableField;

pub(crate) use self::field::write_texel;

/// The immutable shape of the simulation domain.
///
/// Dimensions include a one-cell border ring on every side. The border is
/// never written by bulk stages, only by boundary enforcement, so the
/// physical region is `(width - 2) x (height - 2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    grid_scale: Vec2,
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error(
        "A {}x{} grid has no interior cells, both dimensions must be >= 3",
        .width,
        .height
    )]
    TooSmall { width: usize, height: usize },
}

/// The number of float channels stored per cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Pressure, vorticity, divergence.
    Scalar,

    /// Velocity, pressure gradient.
    Vector,
}

impl ChannelLayout {
    pub fn channels(&self) -> usize {
        match self {
            ChannelLayout::Scalar => 1,
            ChannelLayout::Vector => 2,
        }
    }
}

/// Identity of a Field's backing storage. Identities are never reused, so
/// two handles compare equal only when they name the same buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A 2D array of float channels addressable by grid coordinate.
///
/// The shape and layout are fixed when the field is created, only the
/// contents change. Storage is row-major with interleaved channels.
pub struct Field {
    id: FieldId,
    label: String,
    grid: Grid,
    layout: ChannelLayout,
    data: Vec<f32>,
}
