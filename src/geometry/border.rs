use super::Primitive;
use crate::{field::Grid, math::Vec2};

/// Which wall of the domain an edge belongs to. Rows grow upward, so the
/// bottom edge is row 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Bottom,
    Left,
    Top,
    Right,
}

/// One wall of the border ring.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BorderEdge {
    pub side: Side,

    /// The line through the centers of the edge's cells.
    pub line: Primitive,

    /// Offset from an edge cell to its neighbor toward the interior.
    pub inward: (isize, isize),
}

/// The four line segments rasterized by boundary enforcement. Computed once
/// from the grid and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    edges: [BorderEdge; 4],
}

impl Border {
    pub fn new(grid: &Grid) -> Self {
        // the centers of the outermost cells in normalized device coords
        let c = Vec2::new(
            1.0 - 0.5 / grid.width() as f32,
            1.0 - 0.5 / grid.height() as f32,
        );
        Self {
            edges: [
                BorderEdge {
                    side: Side::Bottom,
                    line: Primitive::line(
                        Vec2::new(-c.x, -c.y),
                        Vec2::new(c.x, -c.y),
                    ),
                    inward: (0, 1),
                },
                BorderEdge {
                    side: Side::Left,
                    line: Primitive::line(
                        Vec2::new(-c.x, c.y),
                        Vec2::new(-c.x, -c.y),
                    ),
                    inward: (1, 0),
                },
                BorderEdge {
                    side: Side::Top,
                    line: Primitive::line(
                        Vec2::new(c.x, c.y),
                        Vec2::new(-c.x, c.y),
                    ),
                    inward: (0, -1),
                },
                BorderEdge {
                    side: Side::Right,
                    line: Primitive::line(
                        Vec2::new(c.x, -c.y),
                        Vec2::new(c.x, c.y),
                    ),
                    inward: (-1, 0),
                },
            ],
        }
    }

    /// Edges in the order they are drawn. Corner cells belong to two edges
    /// and keep the value written by the later one.
    pub fn edges(&self) -> &[BorderEdge] {
        &self.edges
    }
}
