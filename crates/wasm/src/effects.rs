//! Load-time entrance stagger and nav hover opacity.

use crate::dom;
use folio_fx_nav::{entrance_delays, hover_opacity, APPEAR_CLASS};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

fn reveal_fade_ins() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let elements = dom::query_all(&doc, ".fade-in")?;
    for (element, delay) in elements.iter().zip(entrance_delays(elements.len())) {
        if let Some(el) = element.dyn_ref::<HtmlElement>() {
            el.style().set_property("animation-delay", &delay)?;
        }
        element.class_list().add_1(APPEAR_CLASS)?;
    }
    debug!("revealed {} fade-in elements", elements.len());
    Ok(())
}

/// Staggers every `.fade-in` element in once the page has loaded.
///
/// Runs immediately when `load` already fired before the module started.
#[wasm_bindgen]
pub fn start_entrance() -> Result<(), JsValue> {
    if dom::document()?.ready_state() == "complete" {
        return reveal_fade_ins();
    }
    let window = dom::window()?;
    dom::listen_forever(&window, "load", |_| {
        if let Err(e) = reveal_fade_ins() {
            warn!("entrance animation failed: {e:?}");
        }
    })
}

/// Brightens `.nav a` links while hovered.
#[wasm_bindgen]
pub fn start_hover() -> Result<(), JsValue> {
    let doc = dom::document()?;
    for element in dom::query_all(&doc, ".nav a")? {
        let Ok(link) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        for (kind, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = link.clone();
            dom::listen_forever(&link, kind, move |_| {
                if let Err(e) = target.style().set_property("opacity", hover_opacity(hovered)) {
                    warn!("nav hover failed: {e:?}");
                }
            })?;
        }
    }
    Ok(())
}
