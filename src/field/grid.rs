use super::{Grid, GridError};
use crate::math::Vec2;

impl Grid {
    /// Create a grid with the given cell counts, border included.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width < 3 || height < 3 {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(Self {
            width,
            height,
            grid_scale: Vec2::new(1.0 / width as f32, 1.0 / height as f32),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// The size of one cell in texture space, `(1/width, 1/height)`.
    pub fn grid_scale(&self) -> Vec2 {
        self.grid_scale
    }

    /// The scalar cell spacing used by the Poisson solves. Equal to
    /// `1/width` on square grids.
    pub fn cell_size(&self) -> f32 {
        (self.grid_scale.x * self.grid_scale.y).sqrt()
    }

    /// True when the cell lies on the one-cell border ring.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_grids_without_interior() {
        assert_eq!(
            Grid::new(2, 10),
            Err(GridError::TooSmall {
                width: 2,
                height: 10
            })
        );
        assert!(Grid::new(3, 3).is_ok());
    }

    #[test]
    fn grid_scale_is_reciprocal_of_dimensions() {
        let grid = Grid::new(66, 34).unwrap();
        assert_eq!(grid.grid_scale(), Vec2::new(1.0 / 66.0, 1.0 / 34.0));
        assert_eq!(grid.cell_count(), 66 * 34);
        assert!(grid.is_border(0, 5));
        assert!(grid.is_border(65, 5));
        assert!(!grid.is_border(1, 1));
    }
}
