use std::fmt;

use serde::{Deserialize, Serialize};

pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle: the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "\u{263E}",
            Theme::Dark => "\u{2600}",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        Self::from_stored_or(value, Theme::default())
    }

    pub fn from_stored_or(value: Option<&str>, fallback: Theme) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or(fallback)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeParseError {
    pub value: String,
}

impl fmt::Display for ThemeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}'", self.value)
    }
}

impl std::error::Error for ThemeParseError {}
