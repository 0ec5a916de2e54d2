//! Popup showing a freshly generated invite code.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::popup::Popup;
use crate::state::InviteCodeState;
use crate::ui::{layouts, theme};

pub fn render_invite_popup(f: &mut Frame, invite: &InviteCodeState) {
    let border_style = match invite {
        InviteCodeState::Failed(_) => theme::danger_border_style(),
        _ => theme::info_border_style(),
    };

    let inner = Popup::new(" Invite Code ", layouts::popup_sizes::MEDIUM)
        .border_style(border_style)
        .render(f);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let body = match invite {
        InviteCodeState::Generating(throbber_state) => {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Generating invite code...")
                .style(theme::loading_style())
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, chunks[1], &mut throbber_state.clone());
            return;
        }
        InviteCodeState::Ready(code) => vec![
            Line::from(Span::styled(
                code.clone(),
                Style::default()
                    .fg(theme::COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Have your child enter this code to link their account.",
                theme::help_text_style(),
            )),
        ],
        InviteCodeState::Failed(error) => vec![Line::from(Span::styled(
            error.clone(),
            theme::error_style(),
        ))],
    };

    f.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new("Enter/Esc: close")
            .style(theme::help_text_style())
            .alignment(Alignment::Center),
        chunks[2],
    );
}
