use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{Document, Event, HtmlElement, Window};

use crate::dom::{body, create_html, query_html, scroll_y, set_style};
use pagelens_core::{progress_width, reading_progress, ArticleMetrics, SiteConfig};

pub(crate) const PROGRESS_CLASS: &str = "reading-progress";

fn update_progress(window: &Window, article: &HtmlElement, bar: &HtmlElement) {
    let metrics = ArticleMetrics {
        top: article.offset_top() as f64,
        height: article.offset_height() as f64,
    };
    let window_height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let progress = reading_progress(metrics, scroll_y(window), window_height);
    set_style(bar, "width", &progress_width(progress));
}

/// Adds the progress bar only on pages with an article body.
pub(crate) fn install(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<Option<HtmlElement>, JsValue> {
    if query_html(document, &config.article_selector).is_none() {
        return Ok(None);
    }
    let bar = create_html(document, "div", PROGRESS_CLASS)?;
    body(document)?.append_child(&bar)?;

    let window_for_scroll = window.clone();
    let document_for_scroll = document.clone();
    let bar_for_scroll = bar.clone();
    let article_selector = config.article_selector.clone();
    listeners.push(EventListener::new(window, "scroll", move |_event: &Event| {
        let Some(article) = query_html(&document_for_scroll, &article_selector) else {
            return;
        };
        update_progress(&window_for_scroll, &article, &bar_for_scroll);
    }));
    Ok(Some(bar))
}
