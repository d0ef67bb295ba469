use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom::{create_html, query_all};
use pagelens_core::SiteConfig;

pub(crate) const WRAPPER_CLASS: &str = "table-wrapper";

/// Wraps each content table in a horizontally scrollable container, once.
pub(crate) fn wrap_tables(document: &Document, config: &SiteConfig) -> Result<usize, JsValue> {
    let mut wrapped = 0;
    for table in query_all(document, &config.table_selector()) {
        let Some(parent) = table.parent_node() else {
            continue;
        };
        let already_wrapped = table
            .parent_element()
            .map(|parent| parent.class_list().contains(WRAPPER_CLASS))
            .unwrap_or(false);
        if already_wrapped {
            continue;
        }
        let wrapper = create_html(document, "div", WRAPPER_CLASS)?;
        let before: &web_sys::Node = &table;
        parent.insert_before(&wrapper, Some(before))?;
        wrapper.append_child(&table)?;
        wrapped += 1;
    }
    Ok(wrapped)
}
