//! Severity levels and their terminal colors

use crossterm::style::Color;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Background/foreground color pair used to highlight a level on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub background: Color,
    pub foreground: Color,
}

// 256-color palette entries
pub(crate) const BLACK: Color = Color::Black;
pub(crate) const RED: Color = Color::AnsiValue(1);
pub(crate) const GREEN: Color = Color::AnsiValue(2);
pub(crate) const YELLOW: Color = Color::AnsiValue(3);
pub(crate) const BLUE: Color = Color::AnsiValue(4);
pub(crate) const CYAN: Color = Color::AnsiValue(6);
pub(crate) const GREY: Color = Color::AnsiValue(7);
pub(crate) const WHITE: Color = Color::AnsiValue(231);

impl Level {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Get the terminal colors for this level
    pub fn tag(&self) -> Tag {
        match self {
            Level::Info => Tag {
                background: GREEN,
                foreground: WHITE,
            },
            Level::Warning => Tag {
                background: YELLOW,
                foreground: BLACK,
            },
            Level::Error => Tag {
                background: RED,
                foreground: WHITE,
            },
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Warning.as_str(), "WARNING");
        assert_eq!(Level::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_level_display_respects_padding() {
        assert_eq!(format!("{:<7}", Level::Info), "INFO   ");
        assert_eq!(format!("{:<7}", Level::Warning), "WARNING");
    }

    #[test]
    fn test_level_tags() {
        assert_eq!(Level::Info.tag().background, GREEN);
        assert_eq!(Level::Info.tag().foreground, WHITE);
        assert_eq!(Level::Warning.tag().background, YELLOW);
        assert_eq!(Level::Warning.tag().foreground, BLACK);
        assert_eq!(Level::Error.tag().background, RED);
        assert_eq!(Level::Error.tag().foreground, WHITE);
    }
}
