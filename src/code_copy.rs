use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Clipboard, Document, Element, Event, HtmlElement};

use crate::dom::{create_html, js_err, query_all, set_style};
use pagelens_core::SiteConfig;

pub(crate) const CODE_SELECTOR: &str = "pre code";
pub(crate) const BUTTON_CLASS: &str = "copy-code-btn";
pub(crate) const COPIED_CLASS: &str = "copied";
pub(crate) const COPY_LABEL: &str = "Copy";
pub(crate) const COPIED_LABEL: &str = "Copied!";

fn clipboard() -> Result<Clipboard, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let value = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if value.is_undefined() || value.is_null() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    Ok(value.unchecked_into::<Clipboard>())
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let promise = clipboard()?.write_text(text);
    JsFuture::from(promise).await?;
    Ok(())
}

fn show_copied(button: &HtmlElement, pending: &Rc<RefCell<Option<Timeout>>>, feedback_ms: u32) {
    button.set_text_content(Some(COPIED_LABEL));
    let _ = button.class_list().add_1(COPIED_CLASS);
    let button = button.clone();
    let timer = Timeout::new(feedback_ms, move || {
        button.set_text_content(Some(COPY_LABEL));
        let _ = button.class_list().remove_1(COPIED_CLASS);
    });
    *pending.borrow_mut() = Some(timer);
}

fn has_copy_button(pre: &Element) -> bool {
    let children = pre.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .any(|child| child.class_list().contains(BUTTON_CLASS))
}

pub(crate) fn install(
    document: &Document,
    config: &SiteConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<usize, JsValue> {
    let mut installed = 0;
    for code in query_all(document, CODE_SELECTOR) {
        let Some(pre) = code
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if has_copy_button(&pre) {
            continue;
        }
        let button = create_html(document, "button", BUTTON_CLASS)?;
        button.set_attribute("type", "button")?;
        button.set_text_content(Some(COPY_LABEL));
        set_style(&pre, "position", "relative");
        pre.append_child(&button)?;

        let button_for_enter = button.clone();
        listeners.push(EventListener::new(&pre, "mouseenter", move |_event: &Event| {
            set_style(&button_for_enter, "opacity", "1");
        }));
        let button_for_leave = button.clone();
        listeners.push(EventListener::new(&pre, "mouseleave", move |_event: &Event| {
            set_style(&button_for_leave, "opacity", "0");
        }));

        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let feedback_ms = config.copy_feedback_ms;
        let button_for_click = button.clone();
        listeners.push(EventListener::new(&button, "click", move |_event: &Event| {
            let text = code.text_content().unwrap_or_default();
            let button = button_for_click.clone();
            let pending = pending.clone();
            spawn_local(async move {
                match write_clipboard(&text).await {
                    Ok(()) => show_copied(&button, &pending, feedback_ms),
                    Err(err) => gloo::console::warn!("copy code: clipboard write failed", js_err(err)),
                }
            });
        }));
        installed += 1;
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_block(document: &Document) -> Element {
        let root = document.create_element("div").expect("root");
        root.set_inner_html("<pre><code>cargo test</code></pre>");
        document.body().expect("body").append_child(&root).expect("append");
        root
    }

    #[wasm_bindgen_test]
    fn button_is_added_once_per_block() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = test_block(&document);
        let mut listeners = Vec::new();
        assert!(install(&document, &SiteConfig::default(), &mut listeners).expect("install") >= 1);
        install(&document, &SiteConfig::default(), &mut listeners).expect("install again");

        let pre = root
            .query_selector("pre")
            .expect("query")
            .expect("pre")
            .dyn_into::<HtmlElement>()
            .expect("html");
        let buttons = pre
            .query_selector_all(&format!(".{BUTTON_CLASS}"))
            .expect("buttons");
        assert_eq!(buttons.length(), 1);
        assert_eq!(pre.style().get_property_value("position").expect("position"), "relative");
        drop(listeners);
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn copied_label_reverts() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let button = create_html(&document, "button", BUTTON_CLASS).expect("button");
        button.set_text_content(Some(COPY_LABEL));
        let pending = Rc::new(RefCell::new(None));

        show_copied(&button, &pending, 10);
        assert_eq!(button.text_content().as_deref(), Some(COPIED_LABEL));
        assert!(button.class_list().contains(COPIED_CLASS));

        TimeoutFuture::new(50).await;
        assert_eq!(button.text_content().as_deref(), Some(COPY_LABEL));
        assert!(!button.class_list().contains(COPIED_CLASS));
    }
}
