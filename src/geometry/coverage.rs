use std::ops::Range;

use super::{Coverage, Primitive};
use crate::{field::Grid, math::spaces, math::Vec2};

impl Primitive {
    /// The whole grid, border ring included.
    pub fn full_screen() -> Self {
        Primitive::Rectangle {
            min: Vec2::new(-1.0, -1.0),
            max: Vec2::new(1.0, 1.0),
        }
    }

    /// Every cell except the one-cell border ring.
    pub fn interior(grid: &Grid) -> Self {
        let inset = grid.grid_scale() * 2.0;
        Primitive::Rectangle {
            min: Vec2::new(-1.0 + inset.x, -1.0 + inset.y),
            max: Vec2::new(1.0 - inset.x, 1.0 - inset.y),
        }
    }

    pub fn line(start: Vec2, end: Vec2) -> Self {
        Primitive::Line { start, end }
    }

    /// Rasterize the primitive against the grid.
    pub fn coverage(&self, grid: &Grid) -> Coverage {
        match self {
            Primitive::Rectangle { min, max } => {
                let columns = center_span(min.x, max.x, grid.width());
                let rows = center_span(min.y, max.y, grid.height());
                let mut coverage = Coverage::empty(grid.height());
                if !columns.is_empty() {
                    for y in rows {
                        coverage.rows[y] = Some(columns.clone());
                    }
                }
                coverage
            }
            Primitive::Line { start, end } => {
                let x0 = spaces::ndc_to_cell(start.x, grid.width()) as isize;
                let y0 = spaces::ndc_to_cell(start.y, grid.height()) as isize;
                let x1 = spaces::ndc_to_cell(end.x, grid.width()) as isize;
                let y1 = spaces::ndc_to_cell(end.y, grid.height()) as isize;

                let (dx, dy) = (x1 - x0, y1 - y0);
                let steps = dx.abs().max(dy.abs());
                let mut coverage = Coverage::empty(grid.height());
                for step in 0..=steps {
                    let t = if steps == 0 {
                        0.0
                    } else {
                        step as f32 / steps as f32
                    };
                    let x = x0 + (dx as f32 * t).round() as isize;
                    let y = y0 + (dy as f32 * t).round() as isize;
                    coverage.include(x as usize, y as usize);
                }
                coverage
            }
        }
    }
}

/// The half-open range of cells along one axis whose centers lie inside
/// `[min, max]` in normalized device coordinates.
fn center_span(min: f32, max: f32, cells: usize) -> Range<usize> {
    let to_cells = |ndc: f32| (ndc + 1.0) * 0.5 * cells as f32 - 0.5;
    let first = to_cells(min).ceil().max(0.0) as usize;
    let last = (to_cells(max).floor() + 1.0).clamp(0.0, cells as f32) as usize;
    first.min(last)..last
}

impl Coverage {
    fn empty(height: usize) -> Self {
        Self {
            rows: vec![None; height],
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        let span = match self.rows[y].take() {
            Some(span) => span.start.min(x)..span.end.max(x + 1),
            None => x..x + 1,
        };
        self.rows[y] = Some(span);
    }

    /// The covered columns in row `y`, if any.
    pub fn row(&self, y: usize) -> Option<Range<usize>> {
        self.rows.get(y).cloned().flatten()
    }

    /// Every covered `(x, y)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, span)| {
            span.clone().into_iter().flatten().map(move |x| (x, y))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().flatten().map(|span| span.len()).sum()
    }
}
