#![deny(unsafe_code)]
//! Particle background: a grid of rounded squares that scatter from the
//! pointer and spring back to their rest positions.
//!
//! Each frame every square is pushed away from the cursor when inside the
//! effect radius, integrated, leashed to `max_offset` from rest, pulled back
//! by a spring and damped. Squares near the cursor are drawn larger, and the
//! ones right under it brighter.
//!
//! [`ParticleField`] implements [`folio_fx_core::Simulation`]; drive it with
//! a [`folio_fx_core::FrameLoop`] and any [`folio_fx_core::Surface`].

pub mod cell;
pub mod config;
pub mod cursor;
pub mod field;

pub use cell::Cell;
pub use config::{ParticleConfig, Tuning};
pub use cursor::{Cursor, InputKind, FAR_AWAY};
pub use field::{FieldStats, ParticleField};
