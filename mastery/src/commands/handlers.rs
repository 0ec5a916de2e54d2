use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::form::LoginField;
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: Ctrl+C always quits
    if event.is_ctrl_char('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 1: Form screens take every printable key
    match state.current_screen() {
        Screen::Login(login_state) => return handle_login_keys(event, login_state),
        Screen::Register(register_state) => return handle_register_keys(event, register_state),
        _ => {}
    }

    // Priority 2: Help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 3: Invite code popup on the dashboard
    if let Screen::Dashboard(dashboard) = state.current_screen() {
        if dashboard.invite.is_some() {
            return match key {
                Key::Esc | Key::Enter | Key::Char('i') => Some(AppCommand::DismissInviteCode),
                Key::Char('q') => Some(AppCommand::Quit),
                _ => None,
            };
        }
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'g' -> navigate to top
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // 'g' followed by 'd' -> back to the dashboard
            ('g', Key::Char('d')) => Some(AppCommand::BackToDashboard),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Navigate to bottom: 'G' (Shift+g)
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Dashboard
        (Screen::Dashboard(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Dashboard(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Dashboard(dashboard), Key::Enter | Key::Right | Key::Char('l')) => {
            let child = dashboard.selected_child()?;
            Some(AppCommand::OpenInsights {
                child_id: child.id,
                child_name: child.display_name().to_string(),
            })
        }
        (Screen::Dashboard(..), Key::Char('r')) => Some(AppCommand::LoadRoster),
        (Screen::Dashboard(..), Key::Char('i')) => Some(AppCommand::GenerateInviteCode),
        (Screen::Dashboard(..), Key::Char('o')) => Some(AppCommand::Logout),
        (Screen::Dashboard(..), Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Child insights
        (Screen::Insights(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Insights(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Insights(insights_state), Key::Char('r')) => Some(AppCommand::LoadInsights {
            child_id: insights_state.child_id,
        }),
        (Screen::Insights(..), Key::Left | Key::Char('h') | Key::Char('b') | Key::Esc) => {
            Some(AppCommand::BackToDashboard)
        }
        (Screen::Insights(insights_state), Key::Enter) if insights_state.not_found => {
            Some(AppCommand::BackToDashboard)
        }

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Left | Key::Char('h') | Key::Esc) => {
            Some(AppCommand::NavigateBack)
        }

        _ => None,
    }
}

/// Keys shared by the login and registration forms.
fn handle_form_editing(event: KeyEvent) -> Option<AppCommand> {
    if event.is_ctrl_char('u') {
        return Some(AppCommand::ClearField);
    }
    if event.is_ctrl_char('l') {
        return Some(AppCommand::NavigateToLogs);
    }

    match event.key {
        Key::Tab | Key::Down => Some(AppCommand::FocusNextField),
        Key::BackTab | Key::Up => Some(AppCommand::FocusPreviousField),
        Key::Backspace => Some(AppCommand::DeleteFieldChar),
        _ => event.typed_char().map(AppCommand::AppendFieldChar),
    }
}

fn handle_login_keys(event: KeyEvent, state: &LoginState) -> Option<AppCommand> {
    if event.key == Key::Esc {
        return Some(AppCommand::Quit);
    }
    if state.submitting.is_loading() {
        return None;
    }
    if event.is_ctrl_char('r') {
        return Some(AppCommand::ShowRegister);
    }

    match (state.form.focus, event.key) {
        (LoginField::Username, Key::Enter) => Some(AppCommand::FocusNextField),
        (LoginField::Password, Key::Enter) => Some(AppCommand::SubmitLogin),
        _ => handle_form_editing(event),
    }
}

fn handle_register_keys(event: KeyEvent, state: &RegisterState) -> Option<AppCommand> {
    if event.key == Key::Esc {
        return Some(AppCommand::ShowLogin);
    }
    if state.submitting.is_loading() {
        return None;
    }

    match event.key {
        Key::Enter if state.form.focus.is_last() => Some(AppCommand::SubmitRegistration),
        Key::Enter => Some(AppCommand::FocusNextField),
        _ => handle_form_editing(event),
    }
}
