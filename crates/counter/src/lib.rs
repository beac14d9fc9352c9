#![deny(unsafe_code)]
//! Count-up animation for page statistics.
//!
//! A stat counts from zero to its target the first time it is scrolled into
//! view, following a cubic ease-out, and lands exactly on the target. Numbers
//! render grouped (`12,480`) or abbreviated (`1.5k`).

pub mod animation;
pub mod board;
pub mod easing;
pub mod format;

pub use animation::{duration_for, CounterAnimation, CounterFrame, StatSpec};
pub use board::{CounterBoard, StatUpdate, VISIBILITY_THRESHOLD};
pub use easing::ease_out_cubic;
pub use format::{format_count, group_digits, NumberFormat};
