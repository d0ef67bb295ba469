use std::fmt;

use crate::command::ViewerCommand;

pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 5.0;
pub const DEFAULT_SCALE: f64 = 1.0;
pub const ZOOM_STEP: f64 = 1.3;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: DEFAULT_SCALE,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px,{}px) scale({})",
            css_number(self.translate_x),
            css_number(self.translate_y),
            css_number(self.scale)
        )
    }
}

/// Formats a number the way the browser stringifies it: integral values
/// carry no fractional part.
pub fn css_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub x: f64,
    pub y: f64,
}

/// Zoom/pan state of the image viewer. Scale is clamped on every write.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    transform: Transform,
    anchor: Option<DragAnchor>,
    open: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            anchor: None,
            open: false,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        (self.transform.translate_x, self.transform.translate_y)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.anchor
    }

    fn set_scale(&mut self, scale: f64) {
        self.transform.scale = if scale.is_nan() {
            DEFAULT_SCALE
        } else {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        };
    }

    pub fn open(&mut self) {
        self.anchor = None;
        self.reset();
        self.open = true;
    }

    /// Returns whether the viewer was open.
    pub fn close(&mut self) -> bool {
        self.anchor = None;
        std::mem::replace(&mut self.open, false)
    }

    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.transform.scale * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.transform.scale / ZOOM_STEP);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.set_scale(self.transform.scale * factor);
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.anchor = Some(DragAnchor {
            x: x - self.transform.translate_x,
            y: y - self.transform.translate_y,
        });
    }

    /// Moves the content under the pointer. Returns false when no drag is active.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        self.transform.translate_x = x - anchor.x;
        self.transform.translate_y = y - anchor.y;
        true
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }

    pub fn touch_start(&mut self, touches: &[(f64, f64)]) {
        match touches {
            [(x, y)] => self.begin_drag(*x, *y),
            _ => self.end_drag(),
        }
    }

    pub fn touch_move(&mut self, touches: &[(f64, f64)]) -> bool {
        match touches {
            [(x, y)] => self.drag_to(*x, *y),
            _ => false,
        }
    }

    /// Applies a command. Returns whether the viewer should be dismissed.
    pub fn apply(&mut self, command: ViewerCommand) -> bool {
        match command {
            ViewerCommand::ZoomIn => self.zoom_in(),
            ViewerCommand::ZoomOut => self.zoom_out(),
            ViewerCommand::Reset => self.reset(),
            ViewerCommand::Close => return self.close(),
        }
        false
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.9} got {:.9} (delta {:.9})",
            expected,
            actual,
            delta
        );
    }

    #[test]
    fn new_state_is_closed_identity() {
        let state = ViewerState::new();
        assert!(!state.is_open());
        assert!(!state.is_dragging());
        assert_eq!(state.transform(), Transform::IDENTITY);
    }

    #[test]
    fn zoom_out_saturates_at_min() {
        let mut state = ViewerState::new();
        for _ in 0..20 {
            state.zoom_out();
        }
        assert_eq!(state.scale(), MIN_SCALE);
    }

    #[test]
    fn wheel_zero_delta_zooms_in() {
        let mut state = ViewerState::new();
        state.wheel(0.0);
        assert_close(state.scale(), 1.1);
    }

    #[test]
    fn drag_to_without_drag_is_ignored() {
        let mut state = ViewerState::new();
        assert!(!state.drag_to(50.0, 50.0));
        assert_eq!(state.translate(), (0.0, 0.0));
    }

    #[test]
    fn drag_keeps_scale() {
        let mut state = ViewerState::new();
        state.zoom_in();
        let scale = state.scale();
        state.begin_drag(10.0, 10.0);
        state.drag_to(40.0, -5.0);
        assert_eq!(state.scale(), scale);
        assert_eq!(state.translate(), (30.0, -15.0));
    }

    #[test]
    fn second_drag_anchors_on_current_translate() {
        let mut state = ViewerState::new();
        state.begin_drag(0.0, 0.0);
        state.drag_to(20.0, 10.0);
        state.end_drag();
        state.begin_drag(100.0, 100.0);
        assert_eq!(state.drag_anchor(), Some(DragAnchor { x: 80.0, y: 90.0 }));
        state.drag_to(110.0, 100.0);
        assert_eq!(state.translate(), (30.0, 10.0));
    }

    #[test]
    fn multi_touch_ends_drag() {
        let mut state = ViewerState::new();
        state.touch_start(&[(5.0, 5.0)]);
        assert!(state.is_dragging());
        state.touch_start(&[(5.0, 5.0), (50.0, 50.0)]);
        assert!(!state.is_dragging());
        assert!(!state.touch_move(&[(10.0, 10.0), (60.0, 60.0)]));
        assert_eq!(state.translate(), (0.0, 0.0));
    }

    #[test]
    fn single_touch_pans() {
        let mut state = ViewerState::new();
        state.touch_start(&[(10.0, 20.0)]);
        assert!(state.touch_move(&[(15.0, 10.0)]));
        assert_eq!(state.translate(), (5.0, -10.0));
    }

    #[test]
    fn close_ends_drag_and_reports_previous_state() {
        let mut state = ViewerState::new();
        state.open();
        state.begin_drag(1.0, 1.0);
        assert!(state.close());
        assert!(!state.is_dragging());
        assert!(!state.close());
    }

    #[test]
    fn apply_close_only_dismisses_open_viewer() {
        let mut state = ViewerState::new();
        assert!(!state.apply(ViewerCommand::Close));
        state.open();
        assert!(!state.apply(ViewerCommand::ZoomIn));
        assert!(state.apply(ViewerCommand::Close));
    }

    #[test]
    fn transform_css_matches_browser_formatting() {
        let transform = Transform {
            scale: 1.3,
            translate_x: 30.0,
            translate_y: -20.0,
        };
        assert_eq!(transform.css(), "translate(30px,-20px) scale(1.3)");
        assert_eq!(Transform::IDENTITY.css(), "translate(0px,0px) scale(1)");
    }

    #[test]
    fn css_number_keeps_fractions() {
        assert_eq!(css_number(12.5), "12.5");
        assert_eq!(css_number(-0.25), "-0.25");
        assert_eq!(css_number(200.0), "200");
    }
}
