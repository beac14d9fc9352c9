//! [`Surface`] over a canvas 2D context.

use folio_fx_core::{FxError, Sprite, Surface, Viewport};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

fn surface_err(e: JsValue) -> FxError {
    FxError::Surface(format!("{e:?}"))
}

/// Draws sprites in logical pixels; the context transform maps them onto the
/// DPR-scaled backing store.
pub(crate) struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub(crate) fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Call after the canvas backing store was resized: resetting `width`
    /// or `height` clears the context transform.
    pub(crate) fn fit(&mut self, viewport: Viewport) -> Result<(), FxError> {
        self.width = viewport.width();
        self.height = viewport.height();
        let dpr = viewport.dpr();
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(surface_err)
    }

    fn rounded_square_path(&self, size: f64, radius: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y) = (-size / 2.0, -size / 2.0);
        ctx.begin_path();
        ctx.move_to(x + radius, y);
        ctx.arc_to(x + size, y, x + size, y + size, radius)?;
        ctx.arc_to(x + size, y + size, x, y + size, radius)?;
        ctx.arc_to(x, y + size, x, y, radius)?;
        ctx.arc_to(x, y, x + size, y, radius)?;
        ctx.close_path();
        Ok(())
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rounded_square(&mut self, sprite: &Sprite, color: &str) -> Result<(), FxError> {
        let radius = sprite.corner_radius.clamp(0.0, sprite.size.max(0.0) / 2.0);
        self.ctx.save();
        let drawn = self
            .ctx
            .translate(sprite.center.x, sprite.center.y)
            .and_then(|()| self.ctx.rotate(sprite.rotation))
            .and_then(|()| {
                self.ctx.set_global_alpha(sprite.alpha);
                self.rounded_square_path(sprite.size, radius)
            });
        if drawn.is_ok() {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
        }
        self.ctx.restore();
        drawn.map_err(surface_err)
    }
}
