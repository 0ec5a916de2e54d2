use ratatui::prelude::*;

use crate::state::{form::RegisterField, RegisterState};
use crate::ui::{
    components::{help_bar, screen_title, text_input},
    layouts,
};

const HINTS: &[(&str, &str)] = &[
    ("Tab/↓", "next field"),
    ("Shift+Tab/↑", "previous field"),
    ("Enter", "next / register"),
    ("Esc", "back to login"),
];

pub fn render(f: &mut Frame, state: &RegisterState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        "Create a Parent Account",
        &state.submitting,
    );

    let (field_areas, message_area) = layouts::form_layout(content_area, RegisterField::ALL.len());
    for (field, area) in RegisterField::ALL.into_iter().zip(field_areas) {
        text_input::render_text_input(
            f,
            area,
            field.label(),
            state.form.field(field),
            state.form.focus == field,
        );
    }

    let status = state.submitting.is_loading().then_some("Creating account...");
    text_input::render_form_message(f, message_area, state.error.as_deref(), status);

    help_bar::render_help_bar(f, help_area, HINTS);
}
