use super::{ChannelLayout, Field, FieldId, Grid};
use crate::math::Vec2;

impl Field {
    /// Create a zero-filled field covering the grid.
    pub fn new(
        grid: Grid,
        layout: ChannelLayout,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: FieldId::next(),
            label: label.into(),
            grid,
            layout,
            data: vec![0.0; grid.cell_count() * layout.channels()],
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// True when both fields have the same dimensions.
    pub fn same_shape(&self, other: &Field) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Read the cell at `(x, y)`. Scalar fields report their value in the
    /// x component.
    pub fn at(&self, x: usize, y: usize) -> Vec2 {
        let channels = self.layout.channels();
        let index = (y * self.width() + x) * channels;
        if channels == 2 {
            Vec2::new(self.data[index], self.data[index + 1])
        } else {
            Vec2::new(self.data[index], 0.0)
        }
    }

    /// Read a cell with clamp-to-edge addressing, the way a texture fetch
    /// outside the image behaves.
    pub fn texel(&self, x: isize, y: isize) -> Vec2 {
        let x = x.clamp(0, self.width() as isize - 1) as usize;
        let y = y.clamp(0, self.height() as isize - 1) as usize;
        self.at(x, y)
    }

    /// Bilinearly sample the field at a texture-space coordinate. Cell
    /// centers sit at `(x + 0.5) / width`.
    pub fn sample(&self, uv: &Vec2) -> Vec2 {
        let fx = uv.x * self.width() as f32 - 0.5;
        let fy = uv.y * self.height() as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);

        let bottom = self.texel(x0, y0).lerp(&self.texel(x0 + 1, y0), tx);
        let top = self
            .texel(x0, y0 + 1)
            .lerp(&self.texel(x0 + 1, y0 + 1), tx);
        bottom.lerp(&top, ty)
    }

    /// Overwrite one cell from the host. Scalar fields keep only `value.x`.
    pub fn set(&mut self, x: usize, y: usize, value: Vec2) {
        let channels = self.layout.channels();
        let index = (y * self.width() + x) * channels;
        write_texel(&mut self.data[index..index + channels], &value);
    }

    /// Overwrite every cell from the host.
    pub fn fill_with<F>(&mut self, mut value: F)
    where
        F: FnMut(usize, usize) -> Vec2,
    {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set(x, y, value(x, y));
            }
        }
    }

    /// Raw channel storage, row-major with interleaved channels.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw storage for compute backends.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// The number of floats in one row of storage.
    pub(crate) fn row_stride(&self) -> usize {
        self.width() * self.layout.channels()
    }
}

/// Write a value into the channel slots of one cell.
pub(crate) fn write_texel(slots: &mut [f32], value: &Vec2) {
    slots[0] = value.x;
    if slots.len() > 1 {
        slots[1] = value.y;
    }
}
