use super::{AppState, DashboardState, InviteCodeState, LoadingState};
use crate::events::DataEvent;
use crate::ui::screens::Screen;
use mastery_auth::SessionEvent;

pub const REGISTRATION_COMPLETE: &str = "Registration complete, please log in.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::Session(event) => reduce_session_event(state, event),

        DataEvent::LoginFailed { error } => {
            if let Screen::Login(login_state) = state.current_screen_mut() {
                login_state.submitting = LoadingState::Error(error.clone());
                login_state.error = Some(error);
                login_state.form.password.clear();
            }
        }

        DataEvent::SessionRestoreFinished { restored } => {
            // A restored session has already moved to the dashboard.
            if !restored {
                if let Screen::Login(login_state) = state.current_screen_mut() {
                    login_state.submitting = LoadingState::NotStarted;
                }
            }
        }

        DataEvent::RegistrationSucceeded => {
            if matches!(state.current_screen(), Screen::Register(_)) {
                state.navigate_back();
                if let Screen::Login(login_state) = state.current_screen_mut() {
                    login_state.error = None;
                    login_state.notice = Some(REGISTRATION_COMPLETE.to_string());
                    login_state.submitting = LoadingState::NotStarted;
                }
            }
        }

        DataEvent::RegistrationFailed { error } => {
            if let Screen::Register(register_state) = state.current_screen_mut() {
                register_state.submitting = LoadingState::Error(error.clone());
                register_state.error = Some(error);
            }
        }

        DataEvent::InviteCodeGenerated { code } => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                if dashboard.invite.is_some() {
                    dashboard.invite = Some(InviteCodeState::Ready(code));
                }
            }
        }

        DataEvent::InviteCodeFailed { error } => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                if dashboard.invite.is_some() {
                    dashboard.invite = Some(InviteCodeState::Failed(error));
                }
            }
        }

        DataEvent::InsightsLoaded { child_id, report } => {
            if let Screen::Insights(insights_state) = state.current_screen_mut() {
                if insights_state.child_id == child_id {
                    insights_state.report = Some(*report);
                    insights_state.not_found = false;
                    insights_state.loading = LoadingState::Loaded;
                }
            }
        }

        DataEvent::InsightsNotFound { child_id } => {
            if let Screen::Insights(insights_state) = state.current_screen_mut() {
                if insights_state.child_id == child_id {
                    insights_state.report = None;
                    insights_state.not_found = true;
                    insights_state.loading = LoadingState::Loaded;
                }
            }
        }

        DataEvent::InsightsLoadFailed { child_id, error } => {
            if let Screen::Insights(insights_state) = state.current_screen_mut() {
                if insights_state.child_id == child_id {
                    insights_state.loading = LoadingState::Error(error);
                }
            }
        }
    }
}

fn reduce_session_event(state: &mut AppState, event: SessionEvent) {
    match event {
        SessionEvent::LoggedIn(identity) => {
            tracing::info!("Session established for {}", identity.display_name);
            state.identity = Some(identity);
            state.reset_to(Screen::Dashboard(DashboardState::loading()));
        }

        SessionEvent::LoggedOut => {
            if state.identity.is_some() || !matches!(state.current_screen(), Screen::Login(_)) {
                state.end_session(None);
            }
        }

        SessionEvent::SessionExpired => {
            state.end_session(Some(SESSION_EXPIRED.to_string()));
        }

        SessionEvent::RosterUpdated(roster) => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.set_roster(roster);
                // A failure reported alongside stays visible.
                if dashboard.roster_loading.is_loading() {
                    dashboard.roster_loading = LoadingState::Loaded;
                }
            }
        }

        SessionEvent::RosterLoadFailed(error) => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.set_roster(Default::default());
                dashboard.roster_loading = LoadingState::Error(error);
            }
        }
    }
}
