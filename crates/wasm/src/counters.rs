//! Count-up stats triggered by scrolling them into view.

use crate::dom::{self, FramePump};
use folio_fx_counter::{CounterBoard, StatSpec, VISIBILITY_THRESHOLD};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

const COUNTED: &str = "counted";

struct StatView {
    element: Element,
    /// Where the number is written: the `.num` child, or the stat itself.
    display: Element,
}

struct Counters {
    board: CounterBoard,
    views: Vec<StatView>,
}

impl Counters {
    fn index_of(&self, target: &Element) -> Option<usize> {
        self.views
            .iter()
            .position(|v| v.element.is_same_node(Some(target)))
    }
}

fn frame_handler(state: Weak<RefCell<Counters>>) -> impl FnMut(f64) -> bool {
    move |now| {
        let Some(state) = state.upgrade() else {
            return false;
        };
        let mut state = state.borrow_mut();
        let updates = state.board.tick(now);
        for update in updates {
            if let Some(view) = state.views.get(update.index) {
                view.display.set_text_content(Some(&update.text));
            }
        }
        state.board.is_animating()
    }
}

/// Observes every `.stat` and counts it up to its `data-target` the first
/// time at least 40% of it is visible.
///
/// Stats with a missing or unparsable target are logged and left alone, as
/// are stats already marked `counted`.
#[wasm_bindgen]
pub fn start_counters() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let mut state = Counters {
        board: CounterBoard::new(),
        views: Vec::new(),
    };
    for element in dom::query_all(&doc, ".stat")? {
        if element.class_list().contains(COUNTED) {
            continue;
        }
        let spec = StatSpec::from_attributes(
            element.get_attribute("data-target").as_deref(),
            element.get_attribute("data-format").as_deref(),
            element.get_attribute("data-suffix").as_deref(),
        );
        match spec {
            Ok(spec) => {
                state.board.add(spec);
                let display = element.query_selector(".num")?.unwrap_or_else(|| element.clone());
                state.views.push(StatView { element, display });
            }
            Err(e) => warn!("skipping stat: {e}"),
        }
    }
    if state.board.is_empty() {
        debug!("no stats to animate");
        return Ok(());
    }

    let targets: Vec<Element> = state.views.iter().map(|v| v.element.clone()).collect();
    let state = Rc::new(RefCell::new(state));
    let pump = Rc::new(FramePump::new(frame_handler(Rc::downgrade(&state))));

    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let now = dom::now_ms();
            let mut started = false;
            {
                let mut state = state.borrow_mut();
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let Some(index) = state.index_of(&target) else {
                        continue;
                    };
                    match state.board.on_visible(index, entry.intersection_ratio(), now) {
                        Ok(true) => {
                            started = true;
                            if let Err(e) = target.class_list().add_1(COUNTED) {
                                warn!("could not mark stat {index} counted: {e:?}");
                            }
                            observer.unobserve(&target);
                        }
                        Ok(false) => {}
                        Err(e) => warn!("{e}"),
                    }
                }
            }
            if started {
                if let Err(e) = pump.schedule() {
                    warn!("could not schedule counter frame: {e:?}");
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        observer.observe(target);
    }
    on_intersect.forget();
    Ok(())
}
