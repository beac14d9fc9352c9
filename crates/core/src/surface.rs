//! The drawing seam between simulations and their hosts.
//!
//! A simulation produces [`Sprite`]s; a [`Surface`] turns them into pixels.
//! The browser host implements it over `CanvasRenderingContext2d`, the
//! native raster crate over an RGBA buffer.

use crate::error::FxError;
use glam::DVec2;
use serde::Serialize;

/// One rounded square to draw, in logical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    /// Center of the square.
    pub center: DVec2,
    /// Edge length after proximity scaling.
    pub size: f64,
    /// Rotation in radians about the center.
    pub rotation: f64,
    /// Corner radius; clamped to half the edge by surfaces.
    pub corner_radius: f64,
    /// Fill opacity in [0, 1].
    pub alpha: f64,
}

/// A 2D target that can clear itself and fill rounded squares.
pub trait Surface {
    /// Erases the whole surface to transparent (or the surface's background).
    fn clear(&mut self);

    /// Fills `sprite` with the CSS color `color` at `sprite.alpha`.
    fn fill_rounded_square(&mut self, sprite: &Sprite, color: &str) -> Result<(), FxError>;
}

/// Clears `surface` and draws every sprite in order.
pub fn paint(surface: &mut dyn Surface, sprites: &[Sprite], color: &str) -> Result<(), FxError> {
    surface.clear();
    sprites
        .iter()
        .try_for_each(|sprite| surface.fill_rounded_square(sprite, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        fills: Vec<(Sprite, String)>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.fills.clear();
        }

        fn fill_rounded_square(&mut self, sprite: &Sprite, color: &str) -> Result<(), FxError> {
            self.fills.push((*sprite, color.to_owned()));
            Ok(())
        }
    }

    fn sprite(x: f64) -> Sprite {
        Sprite {
            center: DVec2::new(x, 0.0),
            size: 10.0,
            rotation: 0.0,
            corner_radius: 2.0,
            alpha: 0.9,
        }
    }

    #[test]
    fn paint_clears_then_fills_in_order() {
        let mut rec = Recorder::default();
        paint(&mut rec, &[sprite(1.0), sprite(2.0)], "#f6a623").unwrap();
        assert_eq!(rec.clears, 1);
        assert_eq!(rec.fills.len(), 2);
        assert_eq!(rec.fills[0].0.center.x, 1.0);
        assert_eq!(rec.fills[1].0.center.x, 2.0);
        assert!(rec.fills.iter().all(|(_, c)| c == "#f6a623"));
    }

    #[test]
    fn paint_with_no_sprites_still_clears() {
        let mut rec = Recorder::default();
        paint(&mut rec, &[], "#000").unwrap();
        assert_eq!(rec.clears, 1);
        assert!(rec.fills.is_empty());
    }

    #[test]
    fn surface_is_object_safe() {
        let mut rec = Recorder::default();
        let dyn_surface: &mut dyn Surface = &mut rec;
        dyn_surface.clear();
        assert_eq!(rec.clears, 1);
    }
}
