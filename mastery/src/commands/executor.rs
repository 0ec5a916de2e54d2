use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::validators::{validate_login, validate_registration};
use crate::state::*;
use crate::ui::screens::Screen;
use mastery_api::endpoints::ChildId;
use mastery_auth::RegistrationForm;
use secrecy::SecretString;

const LOG_PAGE_SIZE: usize = 20;
const INSIGHTS_TASK_PREFIX: &str = "insights_";

/// Work that has to leave the UI loop.
enum Task {
    Login {
        username: String,
        password: SecretString,
    },
    Register(Box<RegistrationForm>),
    RestoreSession,
    LoadRoster,
    GenerateInviteCode,
    LoadInsights(ChildId),
    Logout,
}

/// Execute a command by updating state and spawning any background work
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if command == AppCommand::BackToDashboard {
        task_manager.cancel_matching(INSIGHTS_TASK_PREFIX);
    }

    let Some(task) = apply(command, state) else {
        return;
    };

    let loader = data_loader.clone();
    match task {
        Task::Login { username, password } => {
            task_manager.spawn_load_task("login", async move {
                loader.login(username, password).await;
            });
        }
        Task::Register(form) => {
            task_manager.spawn_load_task("register", async move {
                loader.register(*form).await;
            });
        }
        Task::RestoreSession => {
            task_manager.spawn_load_task("restore_session", async move {
                loader.restore_session().await;
            });
        }
        Task::LoadRoster => {
            task_manager.spawn_load_task("load_roster", async move {
                loader.load_roster().await;
            });
        }
        Task::GenerateInviteCode => {
            task_manager.spawn_load_task("generate_invite_code", async move {
                loader.generate_invite_code().await;
            });
        }
        Task::LoadInsights(child_id) => {
            task_manager.spawn_load_task(
                format!("{}{}", INSIGHTS_TASK_PREFIX, child_id),
                async move {
                    loader.load_insights(child_id).await;
                },
            );
        }
        Task::Logout => {
            // Nothing started under the old session may report back.
            task_manager.cancel_all();
            loader.logout();
        }
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Applies exactly the state transitions `execute_command` would. Results of
/// background work are simulated by injecting `DataEvent`s.
///
/// NOTE: This is public for use by the testing module but should not be used in production code.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let _ = apply(command, state);
}

/// State transition for a command, plus the background task it needs.
fn apply(command: AppCommand, state: &mut AppState) -> Option<Task> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let task = match command {
        AppCommand::SelectNext => {
            match state.current_screen_mut() {
                Screen::Dashboard(dashboard) => dashboard.select_next(),
                Screen::Insights(insights_state) => {
                    insights_state.scroll = insights_state.scroll.saturating_add(1);
                }
                _ => {}
            }
            None
        }

        AppCommand::SelectPrevious => {
            match state.current_screen_mut() {
                Screen::Dashboard(dashboard) => dashboard.select_prev(),
                Screen::Insights(insights_state) => {
                    insights_state.scroll = insights_state.scroll.saturating_sub(1);
                }
                _ => {}
            }
            None
        }

        AppCommand::NavigateToTop => {
            match state.current_screen_mut() {
                Screen::Dashboard(dashboard) => dashboard.select_first(),
                Screen::Insights(insights_state) => insights_state.scroll = 0,
                Screen::Logs(logs_state) => {
                    // Scroll to oldest logs (top)
                    logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
                }
                _ => {}
            }
            None
        }

        AppCommand::NavigateToBottom => {
            match state.current_screen_mut() {
                Screen::Dashboard(dashboard) => dashboard.select_last(),
                Screen::Logs(logs_state) => {
                    // Scroll to newest logs (bottom)
                    logs_state.scroll_offset = 0;
                }
                _ => {}
            }
            None
        }

        AppCommand::NavigateBack => {
            state.navigate_back();
            None
        }

        AppCommand::ShowRegister => {
            if matches!(state.current_screen(), Screen::Login(_)) {
                state.navigate_to(Screen::Register(Box::default()));
            }
            None
        }

        AppCommand::ShowLogin => {
            if matches!(state.current_screen(), Screen::Register(_)) && !state.navigate_back() {
                state.reset_to(Screen::Login(LoginState::default()));
            }
            None
        }

        // Form editing
        AppCommand::FocusNextField => {
            match state.current_screen_mut() {
                Screen::Login(login_state) => {
                    login_state.form.focus = login_state.form.focus.next();
                }
                Screen::Register(register_state) => {
                    register_state.form.focus = register_state.form.focus.next();
                }
                _ => {}
            }
            None
        }

        AppCommand::FocusPreviousField => {
            match state.current_screen_mut() {
                Screen::Login(login_state) => {
                    login_state.form.focus = login_state.form.focus.previous();
                }
                Screen::Register(register_state) => {
                    register_state.form.focus = register_state.form.focus.previous();
                }
                _ => {}
            }
            None
        }

        AppCommand::AppendFieldChar(c) => {
            edit_focused_field(state, |field| field.push(c));
            None
        }

        AppCommand::DeleteFieldChar => {
            edit_focused_field(state, |field| field.pop());
            None
        }

        AppCommand::ClearField => {
            edit_focused_field(state, |field| field.clear());
            None
        }

        AppCommand::SubmitLogin => {
            let Screen::Login(login_state) = state.current_screen_mut() else {
                return None;
            };
            if login_state.submitting.is_loading() {
                return None;
            }

            match validate_login(&login_state.form) {
                Ok((username, password)) => {
                    tracing::info!("Submitting login for {}", username);
                    login_state.error = None;
                    login_state.notice = None;
                    login_state.submitting = LoadingState::loading();
                    Some(Task::Login { username, password })
                }
                Err(error) => {
                    login_state.error = Some(error);
                    None
                }
            }
        }

        AppCommand::SubmitRegistration => {
            let Screen::Register(register_state) = state.current_screen_mut() else {
                return None;
            };
            if register_state.submitting.is_loading() {
                return None;
            }

            match validate_registration(&register_state.form) {
                Ok(form) => {
                    tracing::info!("Submitting registration for {}", form.username);
                    register_state.error = None;
                    register_state.submitting = LoadingState::loading();
                    Some(Task::Register(Box::new(form)))
                }
                Err(error) => {
                    register_state.error = Some(error);
                    None
                }
            }
        }

        // Session
        AppCommand::RestoreSession => match state.current_screen_mut() {
            Screen::Login(login_state) => {
                login_state.submitting = LoadingState::loading();
                Some(Task::RestoreSession)
            }
            _ => None,
        },

        AppCommand::Logout => {
            tracing::info!("Logout requested");
            state.end_session(None);
            Some(Task::Logout)
        }

        // Dashboard
        AppCommand::LoadRoster => {
            let dashboard = state.dashboard_mut()?;
            dashboard.roster_loading = LoadingState::loading();
            Some(Task::LoadRoster)
        }

        AppCommand::GenerateInviteCode => match state.current_screen_mut() {
            Screen::Dashboard(dashboard) if dashboard.invite.is_none() => {
                dashboard.invite = Some(InviteCodeState::Generating(Default::default()));
                Some(Task::GenerateInviteCode)
            }
            _ => None,
        },

        AppCommand::DismissInviteCode => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                dashboard.invite = None;
            }
            None
        }

        AppCommand::OpenInsights {
            child_id,
            child_name,
        } => {
            state.navigate_to(Screen::Insights(Box::new(InsightsState::new(
                child_id, child_name,
            ))));
            Some(Task::LoadInsights(child_id))
        }

        AppCommand::LoadInsights { child_id } => match state.current_screen_mut() {
            Screen::Insights(insights_state) if insights_state.child_id == child_id => {
                insights_state.loading = LoadingState::loading();
                insights_state.not_found = false;
                Some(Task::LoadInsights(child_id))
            }
            _ => None,
        },

        AppCommand::BackToDashboard => {
            state.return_to_dashboard();
            None
        }

        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }

        // Log screen
        AppCommand::NavigateToLogs => {
            // Navigate to logs screen (no logging to avoid feedback loop)
            if !matches!(state.current_screen(), Screen::Logs(_)) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
            None
        }

        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
            None
        }

        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
            None
        }

        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = (logs_state.scroll_offset + LOG_PAGE_SIZE)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
            None
        }

        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
            None
        }

        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
            }
            None
        }

        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = 0;
            }
            None
        }

        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
            None
        }

        AppCommand::ClearPendingKey => {
            state.pending_key = None;
            None
        }

        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
    };

    // Clear pending key after any command except SetPendingKey
    // This ensures multi-key sequences are properly reset after completion
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    task
}

/// Apply an edit to whichever form field has focus and clear the stale error.
fn edit_focused_field(state: &mut AppState, edit: impl FnOnce(&mut form::TextField)) {
    match state.current_screen_mut() {
        Screen::Login(login_state) if !login_state.submitting.is_loading() => {
            edit(login_state.form.focused_mut());
            login_state.error = None;
        }
        Screen::Register(register_state) if !register_state.submitting.is_loading() => {
            edit(register_state.form.focused_mut());
            register_state.error = None;
        }
        _ => {}
    }
}
