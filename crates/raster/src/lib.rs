#![deny(unsafe_code)]
//! Native rendering for folio-fx simulations.
//!
//! [`pixel::RgbaCanvas`] implements [`folio_fx_core::Surface`] over an RGBA8
//! buffer at the viewport's backing resolution, so a simulation can be drawn
//! without a browser. PNG output lives behind the `png` feature (default on)
//! so that WASM builds never pull in the `image` crate.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::RgbaCanvas;
