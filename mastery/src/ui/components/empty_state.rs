//! Shared placeholder blocks for lists and panels without data.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

/// Render an empty state message with an optional hint below it.
///
/// # Arguments
/// * `title` - The block title (e.g., "Children")
/// * `message` - The message to display (e.g., "No children linked yet")
/// * `hint` - Optional hint text below the message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    render_message(f, area, title, message, theme::loading_style(), hint);
}

/// Render a loading placeholder shown before any data has arrived.
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    render_message(f, area, title, message, theme::loading_style(), None);
}

/// Render a failed load, with a hint on how to retry.
pub fn render_error_state(f: &mut Frame, area: Rect, title: &str, error: &str, hint: &str) {
    render_message(f, area, title, error, theme::error_style(), Some(hint));
}

fn render_message(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    style: Style,
    hint: Option<&str>,
) {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(message, style))];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            theme::help_text_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
