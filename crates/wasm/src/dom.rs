//! Small DOM helpers shared by the bindings.

use folio_fx_core::FxError;
use log::error;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, Window};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub(crate) fn to_js(e: FxError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// All elements matching `selector`, in document order.
pub(crate) fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// High-resolution timestamp on the same clock as animation frames.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Attaches a listener for the lifetime of the page.
pub(crate) fn listen_forever(
    target: &web_sys::EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// A window listener that can be removed again.
pub(crate) struct Listener {
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        window: &Window,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { kind, callback })
    }

    pub(crate) fn detach(&self, window: &Window) {
        if let Err(e) = window
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            error!("failed to remove {} listener: {e:?}", self.kind);
        }
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` callback that re-arms itself while `on_frame`
/// returns `true`.
///
/// At most one frame is pending at a time. Dropping the pump cancels it.
pub(crate) struct FramePump {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FramePump {
    pub(crate) fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let this = Rc::downgrade(&callback);
        let slot = Rc::clone(&pending);
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            slot.set(None);
            if !on_frame(timestamp) {
                return;
            }
            let Some(cb) = this.upgrade() else {
                return;
            };
            if let Some(cb) = cb.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(id) => slot.set(Some(id)),
                    Err(e) => error!("requestAnimationFrame failed: {e:?}"),
                }
            };
        }));

        Self { callback, pending }
    }

    /// Requests a frame unless one is already pending.
    pub(crate) fn schedule(&self) -> Result<(), JsValue> {
        if self.pending.get().is_some() {
            return Ok(());
        }
        if let Some(cb) = self.callback.borrow().as_ref() {
            self.pending.set(Some(request_frame(cb)?));
        }
        Ok(())
    }

    pub(crate) fn cancel(&self) {
        let Some(id) = self.pending.take() else {
            return;
        };
        if let Ok(window) = window() {
            if let Err(e) = window.cancel_animation_frame(id) {
                error!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }
}

impl Drop for FramePump {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(cb: &FrameCallback) -> Result<i32, JsValue> {
    window()?.request_animation_frame(cb.as_ref().unchecked_ref())
}
