//! The animated square-grid page background.
//!
//! Window input feeds the field's cursor, `resize` rebuilds the grid, and a
//! [`FramePump`] ticks the [`FrameLoop`] once per display refresh. Everything
//! attached here is released again by [`Background::teardown`].

use crate::dom::{self, FramePump, Listener};
use crate::surface::Canvas2dSurface;
use folio_fx_core::{FrameLoop, Viewport, Xorshift64};
use folio_fx_particles::{ParticleConfig, ParticleField};
use glam::DVec2;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

struct Scene {
    frames: FrameLoop<ParticleField>,
    surface: Canvas2dSurface,
    canvas: HtmlCanvasElement,
}

impl Scene {
    /// Sizes the canvas to the window, re-reads the page colors and, when
    /// `rebuild` is set, lays the grid out again.
    fn fit_window(&mut self, rebuild: bool) -> Result<(), JsValue> {
        let window = dom::window()?;
        let viewport = measure(&window)?;
        let (w, h) = viewport.backing_size();

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width()))?;
        style.set_property("height", &format!("{}px", viewport.height()))?;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.surface.fit(viewport).map_err(dom::to_js)?;

        let (square, accent) = page_colors(&window)?;
        let field = self.frames.simulation_mut();
        field.apply_styles(square.as_deref(), accent.as_deref());
        if rebuild {
            field.resize(viewport);
        }
        Ok(())
    }

    fn to_canvas(&self, client_x: i32, client_y: i32) -> DVec2 {
        let rect = self.canvas.get_bounding_client_rect();
        DVec2::new(
            f64::from(client_x) - rect.left(),
            f64::from(client_y) - rect.top(),
        )
    }
}

fn measure(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Viewport::new(width, height, window.device_pixel_ratio()).map_err(dom::to_js)
}

/// `--square` and `--accent` from the body's computed style.
fn page_colors(window: &Window) -> Result<(Option<String>, Option<String>), JsValue> {
    let Some(body) = dom::document()?.body() else {
        return Ok((None, None));
    };
    let Some(style) = window.get_computed_style(&body)? else {
        return Ok((None, None));
    };
    Ok((
        style.get_property_value("--square").ok(),
        style.get_property_value("--accent").ok(),
    ))
}

/// Handle to a running background. Dropping it from JS without calling
/// `teardown` leaves the listeners attached.
#[wasm_bindgen]
pub struct Background {
    scene: Rc<RefCell<Scene>>,
    pump: FramePump,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Background {
    /// Resumes animation. Returns `false` if it was already running.
    pub fn start(&self) -> Result<bool, JsValue> {
        if !self.scene.borrow_mut().frames.start() {
            return Ok(false);
        }
        self.pump.schedule()?;
        Ok(true)
    }

    /// Pauses animation, cancelling the pending frame. Returns `false` if it
    /// was not running.
    pub fn stop(&self) -> bool {
        self.pump.cancel();
        self.scene.borrow_mut().frames.stop()
    }

    pub fn is_running(&self) -> bool {
        self.scene.borrow().frames.is_running()
    }

    /// Number of squares in the current grid.
    pub fn cells(&self) -> usize {
        self.scene.borrow().frames.simulation().cells().len()
    }

    /// Stops animating, removes every listener and clears the canvas.
    pub fn teardown(self) {
        self.stop();
        if let Ok(window) = dom::window() {
            for listener in &self.listeners {
                listener.detach(&window);
            }
        }
        let Background { scene, pump, .. } = self;
        drop(pump);
        match Rc::try_unwrap(scene) {
            Ok(cell) => {
                let mut scene = cell.into_inner();
                folio_fx_core::Surface::clear(&mut scene.surface);
                scene.frames.teardown();
            }
            Err(_) => warn!("background scene still shared at teardown"),
        }
        info!("background torn down");
    }
}

/// Starts the particle background on the canvas with id `canvas_id`.
///
/// Returns `Ok(None)` when there is no such canvas or it has no 2D context;
/// the page simply has no animated background then. `params_json` overrides
/// particle parameters (see the CLI `schema` command); invalid JSON or an
/// unbuildable config is an error.
#[wasm_bindgen]
pub fn start_background(
    canvas_id: &str,
    params_json: Option<String>,
) -> Result<Option<Background>, JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let Some(element) = document.get_element_by_id(canvas_id) else {
        debug!("no #{canvas_id} element, background disabled");
        return Ok(None);
    };
    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        warn!("#{canvas_id} is not a canvas, background disabled");
        return Ok(None);
    };
    let Some(ctx) = canvas
        .get_context("2d")?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        warn!("#{canvas_id} has no 2d context, background disabled");
        return Ok(None);
    };

    let config = match params_json.as_deref().map(str::trim) {
        None | Some("") => ParticleConfig::default(),
        Some(raw) => {
            let params: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| JsValue::from_str(&format!("invalid background params: {e}")))?;
            ParticleConfig::from_json(&params)
        }
    };
    let rng = Xorshift64::from_unit(js_sys::Math::random());
    let field = ParticleField::with_rng(measure(&window)?, config, rng).map_err(dom::to_js)?;

    let scene = Rc::new(RefCell::new(Scene {
        frames: FrameLoop::new(field),
        surface: Canvas2dSurface::new(ctx),
        canvas,
    }));
    scene.borrow_mut().fit_window(false)?;

    let pump = FramePump::new(frame_handler(Rc::downgrade(&scene)));
    let listeners = attach_input(&window, &scene)?;
    let background = Background {
        scene,
        pump,
        listeners,
    };
    background.start()?;
    info!("background started with {} cells", background.cells());
    Ok(Some(background))
}

fn frame_handler(scene: Weak<RefCell<Scene>>) -> impl FnMut(f64) -> bool {
    move |_timestamp| {
        let Some(scene) = scene.upgrade() else {
            return false;
        };
        let mut scene = scene.borrow_mut();
        let Scene {
            frames, surface, ..
        } = &mut *scene;
        match frames.tick(surface) {
            Ok(running) => running,
            Err(e) => {
                error!("background frame failed, stopping: {e}");
                frames.stop();
                false
            }
        }
    }
}

fn with_scene(scene: &Weak<RefCell<Scene>>, f: impl FnOnce(&mut Scene)) {
    if let Some(scene) = scene.upgrade() {
        f(&mut scene.borrow_mut());
    }
}

fn touch_point(event: &Event) -> Option<(i32, i32)> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x(), touch.client_y()))
}

fn attach_input(window: &Window, scene: &Rc<RefCell<Scene>>) -> Result<Vec<Listener>, JsValue> {
    let weak = || Rc::downgrade(scene);
    let mut listeners = Vec::with_capacity(8);

    let s = weak();
    listeners.push(Listener::attach(window, "resize", false, move |_| {
        with_scene(&s, |scene| {
            if let Err(e) = scene.fit_window(true) {
                error!("background resize failed: {e:?}");
            }
        });
    })?);

    let s = weak();
    listeners.push(Listener::attach(window, "pointermove", false, move |event: Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        with_scene(&s, |scene| {
            let at = scene.to_canvas(mouse.client_x(), mouse.client_y());
            scene.frames.simulation_mut().cursor_mut().pointer_move(at);
        });
    })?);

    for kind in ["touchstart", "touchmove"] {
        let s = weak();
        listeners.push(Listener::attach(window, kind, true, move |event: Event| {
            let Some((x, y)) = touch_point(&event) else {
                return;
            };
            with_scene(&s, |scene| {
                let at = scene.to_canvas(x, y);
                scene.frames.simulation_mut().cursor_mut().touch_move(at);
            });
        })?);
    }

    let s = weak();
    listeners.push(Listener::attach(window, "pointerdown", false, move |_| {
        with_scene(&s, |scene| scene.frames.simulation_mut().cursor_mut().press());
    })?);

    let s = weak();
    listeners.push(Listener::attach(window, "pointerup", false, move |_| {
        with_scene(&s, |scene| scene.frames.simulation_mut().cursor_mut().release());
    })?);

    for kind in ["pointerleave", "touchend"] {
        let s = weak();
        listeners.push(Listener::attach(window, kind, false, move |_| {
            with_scene(&s, |scene| scene.frames.simulation_mut().cursor_mut().leave());
        })?);
    }

    Ok(listeners)
}
