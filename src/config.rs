use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::dom::js_err;
use pagelens_core::SiteConfig;

pub(crate) const CONFIG_GLOBAL: &str = "__PAGELENS_CONFIG";

pub(crate) fn load_site_config() -> SiteConfig {
    let Some(window) = web_sys::window() else {
        return SiteConfig::default();
    };
    let Ok(value) = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
        return SiteConfig::default();
    };
    if value.is_null() || value.is_undefined() {
        return SiteConfig::default();
    }
    let raw = match js_sys::JSON::stringify(&value) {
        Ok(raw) => raw.as_string().unwrap_or_default(),
        Err(err) => {
            gloo::console::warn!("site config: not serializable", js_err(err));
            return SiteConfig::default();
        }
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            gloo::console::log!("site config: loaded", CONFIG_GLOBAL);
            config
        }
        Err(err) => {
            gloo::console::warn!("site config: invalid, using defaults", err.to_string());
            SiteConfig::default()
        }
    }
}
