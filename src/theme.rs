use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{Document, Event, Storage};

use crate::dom::js_err;
use pagelens_core::{SiteConfig, Theme, THEME_ATTRIBUTE};

pub(crate) const TOGGLE_ID: &str = "themeToggle";

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub(crate) fn load_theme(config: &SiteConfig) -> Theme {
    let stored = local_storage().and_then(|storage| {
        storage
            .get_item(&config.theme_storage_key)
            .ok()
            .flatten()
    });
    Theme::from_stored_or(stored.as_deref(), config.default_theme)
}

pub(crate) fn save_theme(config: &SiteConfig, theme: Theme) {
    let Some(storage) = local_storage() else {
        gloo::console::warn!("theme: storage unavailable");
        return;
    };
    if let Err(err) = storage.set_item(&config.theme_storage_key, theme.as_str()) {
        gloo::console::warn!("theme: storage set failed", js_err(err));
    }
}

pub(crate) fn current_theme(document: &Document, fallback: Theme) -> Theme {
    let attribute = document
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    Theme::from_stored_or(attribute.as_deref(), fallback)
}

pub(crate) fn apply_theme(document: &Document, theme: Theme) -> Result<(), JsValue> {
    if let Some(root) = document.document_element() {
        root.set_attribute(THEME_ATTRIBUTE, theme.as_str())?;
    }
    if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
        toggle.set_text_content(Some(theme.icon()));
    }
    Ok(())
}

pub(crate) fn install(
    document: &Document,
    config: &SiteConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<(), JsValue> {
    let theme = load_theme(config);
    apply_theme(document, theme)?;

    let Some(toggle) = document.get_element_by_id(TOGGLE_ID) else {
        return Ok(());
    };
    let document = document.clone();
    let config = config.clone();
    listeners.push(EventListener::new(&toggle, "click", move |_event: &Event| {
        let next = current_theme(&document, config.default_theme).toggled();
        if let Err(err) = apply_theme(&document, next) {
            gloo::console::warn!("theme: apply failed", js_err(err));
        }
        save_theme(&config, next);
    }));
    Ok(())
}
