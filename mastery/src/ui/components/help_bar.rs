//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a help bar from `(keys, action)` hints, e.g. `("j/k", "move")`.
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    render_help_text(f, area, &format_hints(hints));
}

/// Render a help bar with preformatted text.
pub fn render_help_text(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

pub fn format_hints(hints: &[(&str, &str)]) -> String {
    itertools::join(
        hints.iter().map(|(keys, action)| format!("{}: {}", keys, action)),
        " | ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hints() {
        assert_eq!(
            format_hints(&[("j/k", "move"), ("?", "help")]),
            "j/k: move | ?: help"
        );
        assert_eq!(format_hints(&[]), "");
    }
}
