//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.
//! Display classes follow the vocabulary emitted by the shelf monitor
//! endpoint (`label label-success`, `label label-warning`, ...).

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Kind of display class, derived from the class string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Success,
    Warning,
    Danger,
    Info,
    Plain,
}

impl ClassKind {
    /// Classify a display class string.
    ///
    /// Matches on the endpoint's bootstrap-style suffixes; anything
    /// unrecognized (including the blank class) renders plain.
    pub fn classify(class: &str) -> Self {
        if class.contains("success") || class == "ok" {
            ClassKind::Success
        } else if class.contains("danger") || class.contains("error") {
            ClassKind::Danger
        } else if class.contains("warning") {
            ClassKind::Warning
        } else if class.contains("info") {
            ClassKind::Info
        } else {
            ClassKind::Plain
        }
    }
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-class elements.
    pub warning: Color,
    /// Color for danger-class elements.
    pub danger: Color,
    /// Color for success-class elements.
    pub success: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a display class
    pub fn class_style(&self, class: &str) -> Style {
        match ClassKind::classify(class) {
            ClassKind::Success => Style::default().fg(self.success),
            ClassKind::Warning => Style::default().fg(self.warning),
            ClassKind::Danger => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
            ClassKind::Info => Style::default().fg(self.highlight),
            ClassKind::Plain => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_endpoint_vocabulary() {
        assert_eq!(ClassKind::classify("label label-success"), ClassKind::Success);
        assert_eq!(ClassKind::classify("label label-warning"), ClassKind::Warning);
        assert_eq!(ClassKind::classify("label label-danger"), ClassKind::Danger);
        assert_eq!(ClassKind::classify("label label-info"), ClassKind::Info);
        assert_eq!(ClassKind::classify("label label-default"), ClassKind::Plain);
        assert_eq!(ClassKind::classify("ok"), ClassKind::Success);
        assert_eq!(ClassKind::classify(""), ClassKind::Plain);
    }
}
