#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineStyle {
    pub transform: &'static str,
    pub opacity: &'static str,
}

const CLEARED: LineStyle = LineStyle {
    transform: "",
    opacity: "",
};

const OPEN_LINES: [LineStyle; 3] = [
    LineStyle {
        transform: "rotate(45deg) translate(5px, 5px)",
        opacity: "",
    },
    LineStyle {
        transform: "",
        opacity: "0",
    },
    LineStyle {
        transform: "rotate(-45deg) translate(7px, -6px)",
        opacity: "",
    },
];

/// Inline styles for the three hamburger bars; the open menu draws a cross.
pub fn hamburger_lines(open: bool) -> [LineStyle; 3] {
    if open {
        OPEN_LINES
    } else {
        [CLEARED; 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_menu_hides_middle_line() {
        let lines = hamburger_lines(true);
        assert_eq!(lines[1].opacity, "0");
        assert!(lines[0].transform.starts_with("rotate(45deg)"));
        assert!(lines[2].transform.starts_with("rotate(-45deg)"));
    }

    #[test]
    fn closed_menu_clears_styles() {
        for line in hamburger_lines(false) {
            assert_eq!(line, CLEARED);
        }
    }
}
