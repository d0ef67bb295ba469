use std::cell::{Cell, RefCell};

use gloo::events::EventListener;
use wasm_bindgen::JsValue;

use crate::config::load_site_config;
use crate::dom::{self, js_err};
use crate::{code_copy, image_viewer, menu, progress, scroll, tables, theme};

thread_local! {
    static INSTALLED: Cell<bool> = Cell::new(false);
    static PAGE_LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

fn report(label: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        gloo::console::warn!(format!("{label}: install failed"), js_err(err));
    }
}

/// Wires every page behavior. Runs once per page; later calls are ignored.
pub(crate) fn install() {
    let first = INSTALLED.with(|flag| !flag.replace(true));
    if !first {
        return;
    }
    let (window, document) = match dom::window().and_then(|window| {
        let document = dom::document()?;
        Ok((window, document))
    }) {
        Ok(pair) => pair,
        Err(err) => {
            gloo::console::warn!("pagelens: no document", js_err(err));
            return;
        }
    };
    let config = load_site_config();
    let mut listeners = Vec::new();

    report("menu", menu::install(&document, &mut listeners));
    report("theme", theme::install(&document, &config, &mut listeners));
    report(
        "scroll to top",
        scroll::install_scroll_to_top(&window, &document, &config, &mut listeners).map(|_| ()),
    );
    let anchors = scroll::install_smooth_anchors(&window, &document, &config, &mut listeners);
    report("image viewer", image_viewer::install(&document, &config));
    match tables::wrap_tables(&document, &config) {
        Ok(wrapped) if wrapped > 0 => gloo::console::log!("tables: wrapped", wrapped),
        Ok(_) => {}
        Err(err) => gloo::console::warn!("tables: wrap failed", js_err(err)),
    }
    report(
        "copy buttons",
        code_copy::install(&document, &config, &mut listeners).map(|_| ()),
    );
    report(
        "reading progress",
        progress::install(&window, &document, &config, &mut listeners).map(|_| ()),
    );

    gloo::console::log!("pagelens: ready", anchors, listeners.len());
    PAGE_LISTENERS.with(|slot| slot.borrow_mut().extend(listeners));
}
