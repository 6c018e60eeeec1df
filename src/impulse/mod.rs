//! Force and ink impulses injected into the velocity field.
//!
//! An [ImpulseState] holds exactly one impulse sample per frame. It is
//! written by one producer, either live pointer input or the scripted
//! [DropletGenerator], and read by the force injection stage.

mod droplets;
mod impulse_state;
mod pointer;

use crate::math::Vec2;

pub use self::{
    droplets::DropletGenerator,
    pointer::{PointerInput, PointerSample, ScriptedPointer},
};

/// The latest impulse sample, in grid cell coordinates.
///
/// Nothing queues: every update overwrites the previous frame's values.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ImpulseState {
    pub last_pos: Vec2,
    pub current_pos: Vec2,

    /// `current_pos - last_pos`
    pub delta: Vec2,

    /// Velocity is only modified while this is set.
    pub force_active: bool,

    pub ink_active: bool,

    /// Select the radial kernel instead of the directional one.
    pub radial: bool,
}

/// Which injection kernel a frame uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Injection {
    Directional,
    Radial,
}
