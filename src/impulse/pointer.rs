/// One poll of the pointer device, in grid cell coordinates with y up.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub primary: bool,
    pub secondary: bool,
}

/// A source of pointer samples, polled once per frame.
pub trait PointerInput {
    fn poll_pointer(&mut self) -> PointerSample;
}

/// A pointer which traces a Lissajous figure around the grid center with
/// the primary control held. See [ScriptedPointer::with_radial_period] for
/// the secondary control.
pub struct ScriptedPointer {
    center: (f32, f32),
    extent: (f32, f32),
    frame: u64,
    radial_every: u64,
}

/// Frames per radian along the path.
const FRAMES_PER_RADIAN: f32 = 40.0;

impl ScriptedPointer {
    /// Sweep a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width as f32, height as f32);
        Self {
            center: (width * 0.5, height * 0.5),
            extent: (width * 0.35, height * 0.35),
            frame: 0,
            radial_every: 0,
        }
    }

    /// Hold the secondary control for 30 frames out of every `period`.
    pub fn with_radial_period(mut self, period: u64) -> Self {
        self.radial_every = period;
        self
    }
}

impl PointerInput for ScriptedPointer {
    fn poll_pointer(&mut self) -> PointerSample {
        let t = self.frame as f32 / FRAMES_PER_RADIAN;
        let secondary =
            self.radial_every > 0 && self.frame % self.radial_every < 30;
        self.frame += 1;
        PointerSample {
            x: self.center.0 + self.extent.0 * (3.0 * t).sin(),
            y: self.center.1 + self.extent.1 * (2.0 * t).sin(),
            primary: true,
            secondary,
        }
    }
}
