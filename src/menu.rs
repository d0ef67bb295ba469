use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::dom::{query_html, set_style};
use pagelens_core::hamburger_lines;

pub(crate) const TOGGLE_SELECTOR: &str = ".mobile-menu-toggle";
pub(crate) const NAV_SELECTOR: &str = ".main-nav";
pub(crate) const LINE_SELECTOR: &str = ".hamburger-line";
pub(crate) const ACTIVE_CLASS: &str = "active";

pub(crate) fn install(document: &Document, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let (Some(toggle), Some(nav)) = (
        query_html(document, TOGGLE_SELECTOR),
        query_html(document, NAV_SELECTOR),
    ) else {
        return Ok(());
    };

    let toggle_for_click = toggle.clone();
    let nav_for_click = nav.clone();
    listeners.push(EventListener::new(&toggle, "click", move |_event: &Event| {
        let open = nav_for_click
            .class_list()
            .toggle(ACTIVE_CLASS)
            .unwrap_or(false);
        style_lines(&toggle_for_click, open);
    }));

    listeners.push(EventListener::new(document, "click", move |event: &Event| {
        let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
            return;
        };
        if toggle.contains(Some(&target)) || nav.contains(Some(&target)) {
            return;
        }
        close(&toggle, &nav);
    }));
    Ok(())
}

pub(crate) fn close(toggle: &Element, nav: &Element) {
    let _ = nav.class_list().remove_1(ACTIVE_CLASS);
    style_lines(toggle, false);
}

fn style_lines(toggle: &Element, open: bool) {
    let Ok(lines) = toggle.query_selector_all(LINE_SELECTOR) else {
        return;
    };
    for (index, style) in hamburger_lines(open).iter().enumerate() {
        let Some(line) = lines
            .item(index as u32)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        set_style(&line, "transform", style.transform);
        set_style(&line, "opacity", style.opacity);
    }
}
