use crate::viewer::css_number;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArticleMetrics {
    pub top: f64,
    pub height: f64,
}

/// Fraction of the article scrolled past the bottom of the window, in `[0, 1]`.
pub fn reading_progress(article: ArticleMetrics, scroll_top: f64, window_height: f64) -> f64 {
    if article.height.is_nan() || article.height <= 0.0 {
        return 0.0;
    }
    let progress = (scroll_top - article.top + window_height) / article.height;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

pub fn progress_width(progress: f64) -> String {
    format!("{}%", css_number(progress * 100.0))
}

pub fn scroll_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64, margin: f64) -> f64 {
    target_offset_top - header_height - margin
}
