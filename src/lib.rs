//! A 2D stable fluids solver.
//!
//! The velocity field lives in double-buffered [field::Field]s and is
//! advanced one frame at a time by [simulation::FluidSimulation], which
//! expresses every stage as a [compute::Kernel] dispatched over a
//! rasterized [geometry::Primitive].

pub mod application;
pub mod compute;
pub mod config;
pub mod field;
pub mod geometry;
pub mod impulse;
pub mod logging;
pub mod math;
pub mod presentation;
pub mod simulation;
pub mod timing;
