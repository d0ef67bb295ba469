use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("document unavailable"))
}

pub(crate) fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document body unavailable"))
}

/// Collects every element matching `selector`. An empty or invalid selector
/// matches nothing.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    if selector.trim().is_empty() {
        return Vec::new();
    }
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_html(root: &Document, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub(crate) fn create_html(
    document: &Document,
    tag: &str,
    class: &str,
) -> Result<HtmlElement, JsValue> {
    let element = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    element.set_class_name(class);
    Ok(element)
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let style = element.style();
    if value.is_empty() {
        let _ = style.remove_property(property);
    } else {
        let _ = style.set_property(property, value);
    }
}

pub(crate) fn scroll_y(window: &Window) -> f64 {
    window.page_y_offset().unwrap_or(0.0)
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
