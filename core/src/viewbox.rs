use std::fmt;

use crate::viewer::css_number;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    /// Builds a viewBox from a graphic's width/height attributes, falling back
    /// to the measured layout box for any attribute that is missing or not
    /// numeric.
    pub fn from_attributes(
        width_attr: Option<&str>,
        height_attr: Option<&str>,
        measured: (f64, f64),
    ) -> Self {
        let width = width_attr.and_then(parse_length).unwrap_or(measured.0);
        let height = height_attr.and_then(parse_length).unwrap_or(measured.1);
        Self::from_size(width, height)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            css_number(self.min_x),
            css_number(self.min_y),
            css_number(self.width),
            css_number(self.height)
        )
    }
}

/// Parses the leading number of a length attribute (`"200px"` -> 200).
pub fn parse_length(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_length_reads_numeric_prefix() {
        assert_eq!(parse_length("200"), Some(200.0));
        assert_eq!(parse_length("200px"), Some(200.0));
        assert_eq!(parse_length("  12.5em"), Some(12.5));
        assert_eq!(parse_length(".5"), Some(0.5));
        assert_eq!(parse_length("100%"), Some(100.0));
        assert_eq!(parse_length("1e2"), Some(100.0));
        assert_eq!(parse_length("3e"), Some(3.0));
        assert_eq!(parse_length("-4"), Some(-4.0));
    }

    #[test]
    fn parse_length_rejects_non_numbers() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("."), None);
        assert_eq!(parse_length("-"), None);
        assert_eq!(parse_length("px200"), None);
    }

    #[test]
    fn attributes_win_over_measurement() {
        let view_box = ViewBox::from_attributes(Some("200"), Some("100"), (640.0, 480.0));
        assert_eq!(view_box.to_string(), "0 0 200 100");
    }

    #[test]
    fn missing_or_malformed_attributes_use_measurement() {
        let view_box = ViewBox::from_attributes(None, Some("auto"), (320.5, 180.0));
        assert_eq!(view_box, ViewBox::from_size(320.5, 180.0));
        assert_eq!(view_box.to_string(), "0 0 320.5 180");
    }
}
