use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewerCommand {
    ZoomIn,
    ZoomOut,
    Reset,
    Close,
}

impl ViewerCommand {
    /// Control buttons in display order.
    pub const ALL: [ViewerCommand; 4] = [
        ViewerCommand::ZoomIn,
        ViewerCommand::ZoomOut,
        ViewerCommand::Reset,
        ViewerCommand::Close,
    ];

    pub fn action(self) -> &'static str {
        match self {
            ViewerCommand::ZoomIn => "zoom-in",
            ViewerCommand::ZoomOut => "zoom-out",
            ViewerCommand::Reset => "reset",
            ViewerCommand::Close => "close",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewerCommand::ZoomIn => "Zoom In",
            ViewerCommand::ZoomOut => "Zoom Out",
            ViewerCommand::Reset => "Reset",
            ViewerCommand::Close => "Close",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewerCommand::ZoomIn => "+",
            ViewerCommand::ZoomOut => "\u{2212}",
            ViewerCommand::Reset => "\u{21BA}",
            ViewerCommand::Close => "\u{2715}",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(ViewerCommand::Close),
            "+" | "=" => Some(ViewerCommand::ZoomIn),
            "-" => Some(ViewerCommand::ZoomOut),
            "0" => Some(ViewerCommand::Reset),
            _ => None,
        }
    }

    pub fn parse_action(value: &str) -> Result<Self, ViewerCommandError> {
        Self::ALL
            .into_iter()
            .find(|command| command.action() == value)
            .ok_or_else(|| ViewerCommandError::UnknownAction(value.to_string()))
    }
}

impl fmt::Display for ViewerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

impl std::str::FromStr for ViewerCommand {
    type Err = ViewerCommandError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_action(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommandError {
    UnknownAction(String),
}

impl fmt::Display for ViewerCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerCommandError::UnknownAction(action) => {
                write!(f, "unknown viewer action '{action}'")
            }
        }
    }
}

impl std::error::Error for ViewerCommandError {}
