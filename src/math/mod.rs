
pub type Vec2 = nalgebra::Vector2<f32>;

/// Clamp each component of `value` into `[-bound, bound]` for the matching
/// component of `bound`.
pub fn clamp_components(value: &Vec2, bound: &Vec2) -> Vec2 {
    Vec2::new(
        value.x.clamp(-bound.x, bound.x),
        value.y.clamp(-bound.y, bound.y),
    )
}

/// Conversions between the coordinate spaces used by the simulation.
///
///   - cell space: `[0, width) x [0, height)`, integer coordinates name a
///     cell, `(x + 0.5, y + 0.5)` is its center.
///   - texture space: `[0, 1] x [0, 1]`, the space kernels sample in.
///   - normalized device space: `[-1, 1] x [-1, 1]`, the space primitives
///     are described in.
pub mod spaces {
    use super::Vec2;

    /// Map a normalized device coordinate onto the index of the cell which
    /// contains it, clamped to the grid.
    pub fn ndc_to_cell(ndc: f32, cells: usize) -> usize {
        let unit = (ndc + 1.0) * 0.5;
        let cell = (unit * cells as f32).floor();
        cell.clamp(0.0, (cells - 1) as f32) as usize
    }

    /// The texture-space coordinate of a cell's center.
    pub fn cell_center(x: usize, y: usize, grid_scale: &Vec2) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * grid_scale.x,
            (y as f32 + 0.5) * grid_scale.y,
        )
    }
}
