#![deny(unsafe_code)]
//! Core types for folio-fx, the interactive layer of a portfolio site.
//!
//! Provides the `Simulation` trait and its `FrameLoop` lifecycle, the
//! `Surface` drawing seam and `Sprite` draw commands, `Viewport`, `Srgb`
//! color parsing, the `Xorshift64` PRNG, JSON parameter helpers, and the
//! shared `FxError` type.

pub mod color;
pub mod error;
pub mod lifecycle;
pub mod params;
pub mod prng;
pub mod simulation;
pub mod surface;
pub mod viewport;

pub use color::Srgb;
pub use error::FxError;
pub use lifecycle::{FrameLoop, LoopState};
pub use prng::Xorshift64;
pub use simulation::Simulation;
pub use surface::{paint, Sprite, Surface};
pub use viewport::Viewport;
