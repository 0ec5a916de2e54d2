use ratatui::prelude::*;

use crate::state::{form::LoginField, LoginState};
use crate::ui::{
    components::{help_bar, screen_title, text_input},
    layouts,
};

const HINTS: &[(&str, &str)] = &[
    ("Tab", "next field"),
    ("Enter", "log in"),
    ("Ctrl+R", "create account"),
    ("Ctrl+L", "logs"),
    ("Esc", "quit"),
];

pub fn render(f: &mut Frame, state: &LoginState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        "Mastery · Parent Portal",
        &state.submitting,
    );

    let (field_areas, message_area) = layouts::form_layout(content_area, 2);
    for (field, area) in [LoginField::Username, LoginField::Password]
        .into_iter()
        .zip(field_areas)
    {
        let value = match field {
            LoginField::Username => &state.form.username,
            LoginField::Password => &state.form.password,
        };
        text_input::render_text_input(f, area, field.label(), value, state.form.focus == field);
    }

    let status = state.submitting.is_loading().then_some("Logging in...");
    text_input::render_form_message(
        f,
        message_area,
        state.error.as_deref(),
        state.notice.as_deref().or(status),
    );

    help_bar::render_help_bar(f, help_area, HINTS);
}
