#![deny(unsafe_code)]
//! Navigation state for a single-page portfolio.
//!
//! [`NavModel`] decides which nav link is highlighted, which content section
//! is shown and whether the sidebar is open. The host mirrors that state onto
//! `active` classes. [`effects`] holds the load-time entrance stagger and the
//! nav hover opacities.

pub mod effects;
pub mod model;

pub use effects::{entrance_delay, entrance_delays, hover_opacity, APPEAR_CLASS};
pub use model::{fragment_from_href, NavModel, Selection};
