//! Single-line text input used by the login and registration forms.

use ratatui::prelude::Rect;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::form::TextField;
use crate::ui::theme;

/// Render a labelled input box for `field`.
///
/// Masked fields show one bullet per character. The focused input gets a
/// highlighted border and a trailing cursor.
pub fn render_text_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    field: &TextField,
    focused: bool,
) {
    let border_style = if focused {
        theme::input_focused_style()
    } else {
        theme::input_style()
    };

    let mut spans = vec![Span::raw(field.display())];
    if focused {
        spans.push(Span::styled("▏", theme::input_focused_style()));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", label)),
    );

    f.render_widget(input, area);
}

/// Render the error or notice line under a form.
pub fn render_form_message(f: &mut Frame, area: Rect, error: Option<&str>, notice: Option<&str>) {
    let line = match (error, notice) {
        (Some(error), _) => Line::from(Span::styled(error.to_string(), theme::error_style())),
        (None, Some(notice)) => Line::from(Span::styled(notice.to_string(), theme::notice_style())),
        (None, None) => return,
    };

    f.render_widget(Paragraph::new(line).wrap(ratatui::widgets::Wrap { trim: true }), area);
}
