pub mod form;
pub mod reducer;
pub mod validators;

use crate::ui::screens::Screen;
use form::{LoginForm, RegisterForm};
use mastery_api::endpoints::{
    children::{ChildSummary, Roster},
    insights::InsightsReport,
    ChildId,
};
use mastery_auth::ParentIdentity;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // Session
    pub identity: Option<ParentIdentity>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Login(LoginState::default())],
            identity: None,
            help_visible: false,
            pending_key: None,
            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Replace the whole navigation stack with a single screen.
    pub fn reset_to(&mut self, screen: Screen) {
        tracing::debug!("Resetting navigation stack (depth {})", self.history.len());
        self.history.clear();
        self.history.push(screen);
        self.help_visible = false;
        self.pending_key = None;
    }

    /// Pop back to the dashboard if one is on the stack.
    pub fn return_to_dashboard(&mut self) -> bool {
        let Some(index) = self
            .history
            .iter()
            .rposition(|screen| matches!(screen, Screen::Dashboard(_)))
        else {
            return false;
        };
        self.history.truncate(index + 1);
        true
    }

    /// The dashboard, wherever it sits on the stack.
    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardState> {
        self.history.iter_mut().rev().find_map(|screen| match screen {
            Screen::Dashboard(dashboard) => Some(dashboard),
            _ => None,
        })
    }

    /// Leave the session: forget the parent and go back to the login screen.
    pub fn end_session(&mut self, notice: Option<String>) {
        self.identity = None;
        self.reset_to(Screen::Login(LoginState {
            notice,
            ..Default::default()
        }));
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Login(state) => &mut state.submitting,
            Screen::Register(state) => &mut state.submitting,
            Screen::Dashboard(state) => match &mut state.invite {
                Some(InviteCodeState::Generating(throbber_state)) => return Some(throbber_state),
                _ => &mut state.roster_loading,
            },
            Screen::Insights(state) => &mut state.loading,
            Screen::Logs(_) => return None,
        };

        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct LoginState {
    pub form: LoginForm,
    pub submitting: LoadingState,
    pub error: Option<String>,
    /// Informational message, e.g. after registering or when the session expired.
    pub notice: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            form: LoginForm::new(),
            submitting: LoadingState::default(),
            error: None,
            notice: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub submitting: LoadingState,
    pub error: Option<String>,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self {
            form: RegisterForm::new(),
            submitting: LoadingState::default(),
            error: None,
        }
    }
}

/// The invite-code popup on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InviteCodeState {
    Generating(ThrobberState),
    Ready(String),
    Failed(String),
}

#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub roster: Roster,
    pub roster_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub invite: Option<InviteCodeState>,
}

impl DashboardState {
    pub fn loading() -> Self {
        Self {
            roster_loading: LoadingState::loading(),
            ..Default::default()
        }
    }

    pub fn selected_child(&self) -> Option<&ChildSummary> {
        let index = self.table_state.borrow().selected()?;
        self.roster.children.get(index)
    }

    pub fn set_roster(&mut self, roster: Roster) {
        let selected = self.table_state.borrow().selected().unwrap_or(0);
        let selected = if roster.children.is_empty() {
            None
        } else {
            Some(selected.min(roster.children.len() - 1))
        };

        self.roster = roster;
        self.table_state = RefCell::new(TableState::default().with_selected(selected));
    }
}

#[derive(Debug, Clone)]
pub struct InsightsState {
    pub child_id: ChildId,
    pub child_name: String,
    pub report: Option<InsightsReport>,
    pub loading: LoadingState,
    /// The service has no insights for this child yet.
    pub not_found: bool,
    pub scroll: u16,
}

impl InsightsState {
    pub fn new(child_id: ChildId, child_name: impl Into<String>) -> Self {
        Self {
            child_id,
            child_name: child_name.into(),
            report: None,
            loading: LoadingState::loading(),
            not_found: false,
            scroll: 0,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }

    fn select_first(&mut self) {
        if self.num_items() > 0 {
            self.table_state().borrow_mut().select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let num_items = self.num_items();
        if num_items > 0 {
            self.table_state().borrow_mut().select(Some(num_items - 1));
        }
    }
}

impl Scrollable for DashboardState {
    fn num_items(&self) -> usize {
        self.roster.children.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_api::endpoints::Mastery;

    fn child(id: i64, name: &str) -> ChildSummary {
        ChildSummary {
            id: ChildId::from(id),
            username: name.to_string(),
            name: None,
            mastery: Mastery::default(),
            total_xp: 0,
            last_active: None,
        }
    }

    #[test]
    fn test_return_to_dashboard_truncates_stack() {
        let mut state = AppState::new();
        state.reset_to(Screen::Dashboard(DashboardState::default()));
        state.navigate_to(Screen::Insights(Box::new(InsightsState::new(
            ChildId::from(1_i64),
            "sam",
        ))));
        state.navigate_to(Screen::Logs(LogsState::default()));

        assert!(state.return_to_dashboard());
        assert_eq!(state.history.len(), 1);
        assert!(matches!(state.current_screen(), Screen::Dashboard(_)));
    }

    #[test]
    fn test_end_session_resets_to_login_with_notice() {
        let mut state = AppState::new();
        state.reset_to(Screen::Dashboard(DashboardState::default()));
        state.help_visible = true;

        state.end_session(Some("bye".to_string()));

        assert_eq!(state.history.len(), 1);
        assert!(!state.help_visible);
        let Screen::Login(login) = state.current_screen() else {
            panic!("Expected Login screen");
        };
        assert_eq!(login.notice.as_deref(), Some("bye"));
    }

    #[test]
    fn test_set_roster_keeps_selection_in_bounds() {
        let mut dashboard = DashboardState::default();
        dashboard.set_roster(Roster {
            children: vec![child(1, "sam"), child(2, "alex"), child(3, "kim")],
            ..Default::default()
        });
        dashboard.select_last();
        assert_eq!(dashboard.selected_child().map(|c| c.username.as_str()), Some("kim"));

        dashboard.set_roster(Roster {
            children: vec![child(1, "sam")],
            ..Default::default()
        });
        assert_eq!(dashboard.table_state.borrow().selected(), Some(0));

        dashboard.set_roster(Roster::default());
        assert_eq!(dashboard.selected_child(), None);
    }
}
