use serde::{Deserialize, Serialize};

use crate::theme::Theme;

pub const DEFAULT_CONTENT_REGIONS: [&str; 2] = [".post-content", ".page-content"];
pub const DEFAULT_SCROLL_TOP_THRESHOLD: f64 = 300.0;
pub const DEFAULT_ANCHOR_SCROLL_MARGIN: f64 = 20.0;
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2000;
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub content_regions: Vec<String>,
    pub article_selector: String,
    pub header_selector: String,
    pub scroll_top_threshold: f64,
    pub anchor_scroll_margin: f64,
    pub copy_feedback_ms: u32,
    pub theme_storage_key: String,
    pub default_theme: Theme,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_regions: DEFAULT_CONTENT_REGIONS
                .iter()
                .map(|region| region.to_string())
                .collect(),
            article_selector: ".post-content".to_string(),
            header_selector: ".site-header".to_string(),
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
            anchor_scroll_margin: DEFAULT_ANCHOR_SCROLL_MARGIN,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            default_theme: Theme::Light,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn scoped(&self, suffix: &str) -> String {
        self.content_regions
            .iter()
            .map(|region| region.trim())
            .filter(|region| !region.is_empty())
            .map(|region| format!("{region} {suffix}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn image_selector(&self) -> String {
        self.scoped("img")
    }

    pub fn diagram_selector(&self) -> String {
        self.scoped(".mermaid svg")
    }

    pub fn table_selector(&self) -> String {
        self.scoped("table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selectors_cover_both_regions() {
        let config = SiteConfig::default();
        assert_eq!(config.image_selector(), ".post-content img, .page-content img");
        assert_eq!(
            config.diagram_selector(),
            ".post-content .mermaid svg, .page-content .mermaid svg"
        );
        assert_eq!(
            config.table_selector(),
            ".post-content table, .page-content table"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            SiteConfig::from_json(r#"{"contentRegions":["article"],"copyFeedbackMs":500}"#)
                .expect("config");
        assert_eq!(config.image_selector(), "article img");
        assert_eq!(config.copy_feedback_ms, 500);
        assert_eq!(config.header_selector, ".site-header");
        assert_eq!(config.default_theme, Theme::Light);
    }

    #[test]
    fn default_theme_parses_lowercase() {
        let config = SiteConfig::from_json(r#"{"defaultTheme":"dark"}"#).expect("config");
        assert_eq!(config.default_theme, Theme::Dark);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(SiteConfig::from_json(r#"{"scrollTopThreshold":"high"}"#).is_err());
    }

    #[test]
    fn blank_regions_are_skipped() {
        let config = SiteConfig {
            content_regions: vec![" ".to_string(), "main".to_string()],
            ..SiteConfig::default()
        };
        assert_eq!(config.table_selector(), "main table");
    }
}
