//! Primitives describe which cells a dispatch writes.
//!
//! The set of shapes is closed: a full or inset [Primitive::Rectangle] for
//! bulk stages and a [Primitive::Line] for the border edges. Each one
//! rasterizes to a [Coverage] which every compute backend consumes the same
//! way.

mod border;
mod coverage;

use std::ops::Range;

use crate::math::Vec2;

pub use self::border::{Border, BorderEdge, Side};

/// A shape in normalized device coordinates, `[-1, 1]` on both axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive {
    /// Covers every cell whose center lies inside the rectangle.
    Rectangle { min: Vec2, max: Vec2 },

    /// Covers every cell the segment passes through, endpoints included.
    Line { start: Vec2, end: Vec2 },
}

/// The cells covered by a rasterized primitive, as at most one contiguous
/// span of columns per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    rows: Vec<Option<Range<usize>>>,
}
