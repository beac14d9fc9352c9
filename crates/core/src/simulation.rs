//! The `Simulation` trait implemented by frame-stepped effects.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Simulation>` and
//! drive it from a generic frame loop.

use crate::error::FxError;
use crate::surface::Sprite;
use serde_json::Value;

/// A frame-stepped visual effect.
///
/// Each [`step`](Simulation::step) advances the state by exactly one display
/// frame and refreshes the [`sprites`](Simulation::sprites) to draw for it.
pub trait Simulation {
    /// Advance the simulation by one frame.
    fn step(&mut self) -> Result<(), FxError>;

    /// Draw commands for the most recent frame.
    fn sprites(&self) -> &[Sprite];

    /// CSS color the sprites are filled with.
    fn color(&self) -> &str;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every parameter: type, default, and description.
    fn param_schema(&self) -> Value;
}
