//! Interactive behaviors for a static blog: image/diagram viewer, mobile
//! menu, theme toggle, scroll helpers, reading progress, responsive tables
//! and code copy buttons.

mod app;
mod code_copy;
mod config;
mod dom;
mod image_viewer;
mod menu;
mod progress;
mod scroll;
mod tables;
mod theme;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        app::install();
        return;
    }
    let listener = EventListener::once(&document, "DOMContentLoaded", |_event| app::install());
    listener.forget();
}

fn with_viewer<F: FnOnce(&image_viewer::ImageViewer)>(action: F) {
    if let Some(viewer) = image_viewer::viewer() {
        action(&viewer);
    }
}

#[wasm_bindgen(js_name = openImageViewer)]
pub fn open_image_viewer(element: Element) {
    with_viewer(|viewer| {
        if let Err(err) = viewer.open(&element) {
            gloo::console::warn!("image viewer: open failed", dom::js_err(err));
        }
    });
}

#[wasm_bindgen(js_name = closeImageViewer)]
pub fn close_image_viewer() {
    with_viewer(|viewer| viewer.close());
}

#[wasm_bindgen(js_name = imageViewerZoomIn)]
pub fn image_viewer_zoom_in() {
    with_viewer(|viewer| viewer.zoom_in());
}

#[wasm_bindgen(js_name = imageViewerZoomOut)]
pub fn image_viewer_zoom_out() {
    with_viewer(|viewer| viewer.zoom_out());
}

#[wasm_bindgen(js_name = imageViewerReset)]
pub fn image_viewer_reset() {
    with_viewer(|viewer| viewer.reset());
}

/// Wires triggers added since the last pass; returns how many were new.
#[wasm_bindgen(js_name = discoverImageTriggers)]
pub fn discover_image_triggers() -> usize {
    image_viewer::viewer()
        .map(|viewer| viewer.discover())
        .unwrap_or(0)
}
