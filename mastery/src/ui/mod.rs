pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    match state.current_screen() {
        Screen::Login(login_state) => {
            login_screen::render(f, login_state);
        }
        Screen::Register(register_state) => {
            register_screen::render(f, register_state);
        }
        Screen::Dashboard(dashboard_state) => {
            dashboard_screen::render(f, dashboard_state, state.identity.as_ref());

            if let Some(invite) = &dashboard_state.invite {
                components::invite_popup::render_invite_popup(f, invite);
            }
        }
        Screen::Insights(insights_state) => {
            insights_screen::render(f, insights_state);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
