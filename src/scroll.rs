use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{body, create_html, query_all, query_html, scroll_y, set_style};
use pagelens_core::{anchor_scroll_top, scroll_top_visible, SiteConfig};

pub(crate) const SCROLL_TOP_CLASS: &str = "scroll-to-top";
pub(crate) const SCROLL_TOP_LABEL: &str = "\u{2191}";
pub(crate) const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn update_scroll_top(window: &Window, button: &HtmlElement, threshold: f64) {
    let display = if scroll_top_visible(scroll_y(window), threshold) {
        "flex"
    } else {
        "none"
    };
    set_style(button, "display", display);
}

pub(crate) fn install_scroll_to_top(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<HtmlElement, JsValue> {
    let button = create_html(document, "button", SCROLL_TOP_CLASS)?;
    button.set_attribute("type", "button")?;
    button.set_text_content(Some(SCROLL_TOP_LABEL));
    body(document)?.append_child(&button)?;

    let threshold = config.scroll_top_threshold;
    update_scroll_top(window, &button, threshold);

    let window_for_scroll = window.clone();
    let button_for_scroll = button.clone();
    listeners.push(EventListener::new(window, "scroll", move |_event: &Event| {
        update_scroll_top(&window_for_scroll, &button_for_scroll, threshold);
    }));

    let window_for_click = window.clone();
    listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
        smooth_scroll_to(&window_for_click, 0.0);
    }));
    Ok(button)
}

fn anchor_target(document: &Document, anchor: &Element) -> Option<HtmlElement> {
    let href = anchor.get_attribute("href")?;
    query_html(document, &href)
}

pub(crate) fn install_smooth_anchors(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    listeners: &mut Vec<EventListener>,
) -> usize {
    let anchors = query_all(document, ANCHOR_SELECTOR);
    for anchor in &anchors {
        let window = window.clone();
        let document = document.clone();
        let source = anchor.clone();
        let header_selector = config.header_selector.clone();
        let margin = config.anchor_scroll_margin;
        listeners.push(EventListener::new_with_options(
            anchor,
            "click",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                event.prevent_default();
                let Some(target) = anchor_target(&document, &source) else {
                    return;
                };
                let header_height = query_html(&document, &header_selector)
                    .map(|header| header.offset_height() as f64)
                    .unwrap_or(0.0);
                let top = anchor_scroll_top(target.offset_top() as f64, header_height, margin);
                smooth_scroll_to(&window, top);
            },
        ));
    }
    anchors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn scroll_to_top_starts_hidden() {
        let window = web_sys::window().expect("window");
        let document = window.document().expect("document");
        let mut listeners = Vec::new();
        let button =
            install_scroll_to_top(&window, &document, &SiteConfig::default(), &mut listeners)
                .expect("install");
        assert_eq!(button.text_content().as_deref(), Some(SCROLL_TOP_LABEL));
        assert_eq!(button.style().get_property_value("display").expect("display"), "none");
        drop(listeners);
        button.remove();
    }

    #[wasm_bindgen_test]
    fn anchor_clicks_are_intercepted() {
        let window = web_sys::window().expect("window");
        let document = window.document().expect("document");
        let root = document.create_element("div").expect("root");
        root.set_inner_html(
            "<a id=\"pl-anchor\" href=\"#pl-target\">jump</a>\
             <a id=\"pl-bare\" href=\"#\">top</a>\
             <h2 id=\"pl-target\">target</h2>",
        );
        document.body().expect("body").append_child(&root).expect("append");

        let mut listeners = Vec::new();
        let wired = install_smooth_anchors(&window, &document, &SiteConfig::default(), &mut listeners);
        assert!(wired >= 2);

        for id in ["pl-anchor", "pl-bare"] {
            let anchor = document.get_element_by_id(id).expect("anchor");
            let init = web_sys::EventInit::new();
            init.set_cancelable(true);
            let event = Event::new_with_event_init_dict("click", &init).expect("event");
            let not_cancelled = anchor.dispatch_event(&event).expect("dispatch");
            assert!(!not_cancelled, "{id} click should be intercepted");
        }
        drop(listeners);
        root.remove();
    }
}
