#![deny(unsafe_code)]
//! WASM bindings for folio-fx.
//!
//! Wires the navigation model, the stat counters, the entrance effects and
//! the particle background onto the page's DOM. Call `init_site` once the
//! module has loaded, or start the pieces individually.

mod background;
mod counters;
mod dom;
mod effects;
mod nav;
mod surface;

pub use background::{start_background, Background};
pub use counters::start_counters;
pub use effects::{start_entrance, start_hover};
pub use nav::start_navigation;

use log::{info, warn};
use wasm_bindgen::prelude::*;

/// Canvas the site's background is drawn on.
const BACKGROUND_CANVAS_ID: &str = "bg-canvas";

#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Starts every effect on the page.
///
/// Navigation is required and its failure is returned. The decorative
/// effects only log when they cannot start. Returns the background handle,
/// if the page has a background canvas.
#[wasm_bindgen]
pub fn init_site() -> Result<Option<Background>, JsValue> {
    start_navigation()?;
    if let Err(e) = start_counters() {
        warn!("counters disabled: {e:?}");
    }
    if let Err(e) = start_entrance() {
        warn!("entrance animation disabled: {e:?}");
    }
    if let Err(e) = start_hover() {
        warn!("nav hover disabled: {e:?}");
    }
    let background = match start_background(BACKGROUND_CANVAS_ID, None) {
        Ok(bg) => bg,
        Err(e) => {
            warn!("background disabled: {e:?}");
            None
        }
    };
    info!("site effects ready");
    Ok(background)
}
