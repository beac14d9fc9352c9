//! CPU implementation of [`Surface`] over an RGBA8 pixel buffer.
//!
//! Sprites arrive in logical pixels and are scaled by the viewport's device
//! pixel ratio, the same transform the browser canvas applies. Each pixel is
//! sampled 2x2 against the rotated rounded square and blended source-over in
//! straight (non-premultiplied) alpha.

use folio_fx_core::color::Srgb;
use folio_fx_core::error::FxError;
use folio_fx_core::surface::{Sprite, Surface};
use folio_fx_core::viewport::Viewport;
use glam::DVec2;
use log::debug;
use std::f64::consts::SQRT_2;

/// Sub-pixel sample offsets for anti-aliasing.
const SAMPLES: [(f64, f64); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// An RGBA8 raster at backing-store resolution.
///
/// The buffer length is always `width * height * 4`.
#[derive(Debug, Clone)]
pub struct RgbaCanvas {
    width: u32,
    height: u32,
    scale: f64,
    background: Option<Srgb>,
    pixels: Vec<u8>,
    fill: Option<(String, [u8; 3])>,
}

impl RgbaCanvas {
    /// Allocates a canvas for `viewport`. With no background, clearing
    /// leaves the canvas fully transparent.
    pub fn new(viewport: Viewport, background: Option<Srgb>) -> Self {
        let (width, height) = viewport.backing_size();
        let mut canvas = Self {
            width,
            height,
            scale: viewport.dpr(),
            background,
            pixels: vec![0; width as usize * height as usize * 4],
            fill: None,
        };
        canvas.clear();
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Backing pixels per logical pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of backing pixel (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Parses the CSS color once per distinct string.
    fn resolve(&mut self, color: &str) -> Result<[u8; 3], FxError> {
        if let Some((cached, rgb)) = &self.fill {
            if cached == color {
                return Ok(*rgb);
            }
        }
        let rgb = Srgb::from_css(color)?.to_u8();
        debug!("raster fill {color} resolved to {rgb:?}");
        self.fill = Some((color.to_owned(), rgb));
        Ok(rgb)
    }

    fn blend(&mut self, x: u32, y: u32, rgb: [u8; 3], alpha: f64) {
        let i = self.offset(x, y);
        let dst = &mut self.pixels[i..i + 4];
        let dst_a = f64::from(dst[3]) / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        for (d, s) in dst.iter_mut().zip(rgb) {
            let src = f64::from(s) / 255.0;
            let prev = f64::from(*d) / 255.0;
            let v = (src * alpha + prev * dst_a * (1.0 - alpha)) / out_a;
            *d = (v * 255.0).round() as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }
}

/// Signed distance from `p` to an axis-aligned rounded square centered at the
/// origin. Negative inside.
fn rounded_square_sdf(p: DVec2, half: f64, radius: f64) -> f64 {
    let q = p.abs() - DVec2::splat(half - radius);
    q.max(DVec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

impl Surface for RgbaCanvas {
    fn clear(&mut self) {
        let px = match self.background {
            Some(bg) => {
                let [r, g, b] = bg.to_u8();
                [r, g, b, 255]
            }
            None => [0; 4],
        };
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn fill_rounded_square(&mut self, sprite: &Sprite, color: &str) -> Result<(), FxError> {
        let rgb = self.resolve(color)?;
        let alpha = sprite.alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || !(sprite.size > 0.0) {
            return Ok(());
        }
        let half = sprite.size / 2.0;
        let radius = sprite.corner_radius.clamp(0.0, half);
        let unrotate = DVec2::from_angle(-sprite.rotation);

        // Bounding circle of the rotated square, in backing pixels.
        let center = sprite.center * self.scale;
        let reach = half * SQRT_2 * self.scale + 1.0;
        let x0 = (center.x - reach).floor().max(0.0) as u32;
        let y0 = (center.y - reach).floor().max(0.0) as u32;
        let x1 = (center.x + reach).ceil().min(f64::from(self.width)).max(0.0) as u32;
        let y1 = (center.y + reach).ceil().min(f64::from(self.height)).max(0.0) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                let hits = SAMPLES
                    .iter()
                    .filter(|&&(ox, oy)| {
                        let p = DVec2::new(f64::from(px) + ox, f64::from(py) + oy) / self.scale;
                        let local = unrotate.rotate(p - sprite.center);
                        rounded_square_sdf(local, half, radius) <= 0.0
                    })
                    .count();
                if hits > 0 {
                    let coverage = hits as f64 / SAMPLES.len() as f64;
                    self.blend(px, py, rgb, alpha * coverage);
                }
            }
        }
        Ok(())
    }
}
