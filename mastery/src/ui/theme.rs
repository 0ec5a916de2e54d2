//! Colors, layout sizes and shared styles for every screen.

use mastery_api::endpoints::Mastery;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Strong mastery, confirmations
pub const COLOR_POSITIVE: Color = Color::Green;

/// Weak mastery, errors
pub const COLOR_NEGATIVE: Color = Color::Red;

pub const COLOR_DEVELOPING: Color = Color::Yellow;

/// No mastery recorded yet
pub const COLOR_ZERO: Color = Color::DarkGray;

pub const COLOR_TITLE: Color = Color::Cyan;

pub const COLOR_LOADING: Color = Color::Yellow;

/// Debug log lines and the help popup border
pub const COLOR_BORDER_INFO: Color = Color::Blue;

// =============================================================================
// Layout
// =============================================================================

pub const SCREEN_MARGIN: u16 = 2;

pub const TITLE_HEIGHT: u16 = 1;

pub const HELP_BAR_HEIGHT: u16 = 3;

/// A bordered single-line input: one row of text plus two border rows
pub const TEXT_INPUT_HEIGHT: u16 = 3;

/// Width of the login and registration forms
pub const FORM_WIDTH: u16 = 50;

pub const TABLE_COLUMN_SPACING: u16 = 2;

/// Height of the roster stats cards on the dashboard
pub const SUMMARY_CARD_HEIGHT: u16 = 3;

/// Mastery at or above this fraction counts as strong
pub const STRONG_MASTERY: f64 = 0.8;

/// Mastery below this fraction counts as weak
pub const WEAK_MASTERY: f64 = 0.5;

// =============================================================================
// Styles
// =============================================================================

/// Highlighted row in the roster table
pub fn selection_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Table headers and insights section headings
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

/// Inline form errors and failed loads
pub fn error_style() -> Style {
    Style::default()
        .fg(COLOR_NEGATIVE)
        .add_modifier(Modifier::BOLD)
}

pub fn notice_style() -> Style {
    Style::default().fg(COLOR_POSITIVE)
}

/// Border of the text input that has focus
pub fn input_focused_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn input_style() -> Style {
    Style::default().fg(Color::White)
}

/// Border of a popup reporting a failure
pub fn danger_border_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Color band for a mastery level: strong, developing, weak, or none at all.
pub fn mastery_color(mastery: Mastery) -> Color {
    match mastery.fraction() {
        f if f >= STRONG_MASTERY => COLOR_POSITIVE,
        f if f >= WEAK_MASTERY => COLOR_DEVELOPING,
        f if f > 0.0 => COLOR_NEGATIVE,
        _ => COLOR_ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mastery_color_bands() {
        assert_eq!(mastery_color(Mastery::new(0.92)), COLOR_POSITIVE);
        assert_eq!(mastery_color(Mastery::new(0.8)), COLOR_POSITIVE);
        assert_eq!(mastery_color(Mastery::new(0.6)), COLOR_DEVELOPING);
        assert_eq!(mastery_color(Mastery::new(0.2)), COLOR_NEGATIVE);
        assert_eq!(mastery_color(Mastery::default()), COLOR_ZERO);
    }
}
