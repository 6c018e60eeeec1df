use super::{ImpulseState, Injection};
use crate::math::Vec2;

impl ImpulseState {
    /// Record a new pointer sample.
    ///
    /// The primary control applies force and ink. Holding the secondary
    /// control as well switches the injection to the radial kernel.
    pub fn update(&mut self, x: f32, y: f32, primary: bool, secondary: bool) {
        self.last_pos = self.current_pos;
        self.current_pos = Vec2::new(x, y);
        self.delta = self.current_pos - self.last_pos;
        self.force_active = primary;
        self.ink_active = primary;
        self.radial = secondary;
    }

    /// Overwrite the sample with an impulse travelling from `from` to `to`.
    pub fn set_stroke(&mut self, from: Vec2, to: Vec2, radial: bool) {
        self.last_pos = from;
        self.current_pos = to;
        self.delta = to - from;
        self.force_active = true;
        self.ink_active = true;
        self.radial = radial;
    }

    /// Clear all three flags, keeping the positions.
    pub fn deactivate(&mut self) {
        self.force_active = false;
        self.ink_active = false;
        self.radial = false;
    }

    /// The injection kernel to run this frame, if any. At most one variant
    /// is ever selected and nothing runs without an active force.
    pub fn injection(&self) -> Option<Injection> {
        match (self.force_active, self.radial) {
            (false, _) => None,
            (true, true) => Some(Injection::Radial),
            (true, false) => Some(Injection::Directional),
        }
    }
}
