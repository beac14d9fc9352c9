//! Sidebar menu toggle and single-page section switching.

use crate::dom;
use folio_fx_nav::NavModel;
use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

const ACTIVE: &str = "active";

struct NavView {
    model: NavModel,
    links: Vec<Element>,
    sections: Vec<Element>,
    sidebar: Element,
}

impl NavView {
    /// Mirrors the model onto `active` classes.
    fn render(&self) -> Result<(), JsValue> {
        for (i, link) in self.links.iter().enumerate() {
            if let Some(item) = link.parent_element() {
                item.class_list()
                    .toggle_with_force(ACTIVE, self.model.is_link_active(i))?;
            }
        }
        for (i, section) in self.sections.iter().enumerate() {
            section
                .class_list()
                .toggle_with_force(ACTIVE, self.model.is_section_visible(i))?;
        }
        self.sidebar
            .class_list()
            .toggle_with_force(ACTIVE, self.model.sidebar_open())?;
        Ok(())
    }
}

fn require(doc: &web_sys::Document, selector: &str) -> Result<Element, JsValue> {
    doc.query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("navigation needs a {selector} element")))
}

/// Wires `.menu-toggle`, `.sidebar` and the `.nav-list a` links.
///
/// Fails if the toggle or sidebar is missing from the page.
#[wasm_bindgen]
pub fn start_navigation() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let toggle = require(&doc, ".menu-toggle")?;
    let sidebar = require(&doc, ".sidebar")?;
    let links = dom::query_all(&doc, ".nav-list a")?;
    let sections = dom::query_all(&doc, "section")?;

    let mut model = NavModel::new(
        links
            .iter()
            .map(|l| l.get_attribute("href").unwrap_or_default()),
        sections.iter().map(Element::id),
    );
    model.set_sidebar_open(sidebar.class_list().contains(ACTIVE));
    info!(
        "navigation: {} links, {} sections",
        model.link_count(),
        model.section_count()
    );

    let view = Rc::new(RefCell::new(NavView {
        model,
        links,
        sections,
        sidebar,
    }));

    let v = Rc::clone(&view);
    dom::listen_forever(&toggle, "click", move |_| {
        let mut view = v.borrow_mut();
        let open = view.model.toggle_menu();
        if let Err(e) = view.sidebar.class_list().toggle_with_force(ACTIVE, open) {
            warn!("menu toggle failed: {e:?}");
        }
    })?;

    let link_count = view.borrow().links.len();
    for index in 0..link_count {
        let link = view.borrow().links[index].clone();
        let v = Rc::clone(&view);
        dom::listen_forever(&link, "click", move |event: Event| {
            event.prevent_default();
            let mut view = v.borrow_mut();
            if let Err(e) = view.model.select(index) {
                warn!("nav click ignored: {e}");
                return;
            }
            if let Err(e) = view.render() {
                warn!("nav update failed: {e:?}");
            }
        })?;
    }
    Ok(())
}
