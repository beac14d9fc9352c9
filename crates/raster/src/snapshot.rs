//! PNG output of an [`RgbaCanvas`].
//!
//! Feature-gated behind `png` (default on) so that WASM builds can depend on
//! this crate without pulling in the `image` crate.

use folio_fx_core::error::FxError;
use std::path::Path;

use crate::pixel::RgbaCanvas;

/// Writes the canvas as an RGBA PNG at backing-store resolution.
///
/// Returns `FxError::Io` if the image cannot be encoded or written.
pub fn write_png(canvas: &RgbaCanvas, path: &Path) -> Result<(), FxError> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.pixels().to_vec())
        .ok_or_else(|| FxError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FxError::Io(e.to_string()))
}
