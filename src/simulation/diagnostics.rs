use crate::{compute::Kernel, field::Field};

/// Host-side mean of `|div u|` over the interior cells of a velocity
/// field, using the same stencil as the divergence kernel.
pub fn mean_abs_divergence(velocity: &Field) -> f32 {
    let (width, height) = (velocity.width(), velocity.height());
    let mut total = 0.0f64;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let divergence = Kernel::Divergence.evaluate(&[velocity], x, y);
            total += divergence.x.abs() as f64;
        }
    }
    let cells = (width - 2) * (height - 2);
    (total / cells as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{ChannelLayout, Grid},
        math::Vec2,
    };

    #[test]
    fn uniform_flow_has_no_divergence() {
        let grid = Grid::new(10, 10).unwrap();
        let mut velocity = Field::new(grid, ChannelLayout::Vector, "u");
        velocity.fill_with(|_, _| Vec2::new(0.3, -0.1));
        assert_eq!(mean_abs_divergence(&velocity), 0.0);
    }

    #[test]
    fn linear_expansion_has_unit_divergence_per_axis() {
        let grid = Grid::new(10, 10).unwrap();
        let scale = grid.grid_scale();
        let mut velocity = Field::new(grid, ChannelLayout::Vector, "u");
        velocity.fill_with(|x, _| Vec2::new(x as f32 * scale.x, 0.0));

        // interior stencils never reach past the grid
        assert!((mean_abs_divergence(&velocity) - 1.0).abs() < 1e-4);
    }
}
