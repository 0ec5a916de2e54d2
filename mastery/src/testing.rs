use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;
use mastery_api::endpoints::children::Roster;
use mastery_auth::{ParentIdentity, SessionEvent};

/// Mock data event handler for tests (no real async tasks)
///
/// Commands go through `execute_command_sync`, so state changes exactly as in
/// production while results of background work are injected by the test.
#[derive(Default)]
pub struct MockDataHandler {
    executed: Vec<AppCommand>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        self.executed.push(command.clone());
        executor::execute_command_sync(command, state);
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// Start on the dashboard as `identity`, with `roster` already loaded
    pub fn logged_in(identity: ParentIdentity, roster: Roster) -> Self {
        let mut app = Self::new();
        app.send_session_event(SessionEvent::LoggedIn(identity));
        app.send_session_event(SessionEvent::RosterUpdated(roster));
        app
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text one character at a time, as a user would
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    pub fn send_command(&mut self, command: AppCommand) {
        self.core.handle_command(command);
    }

    /// Inject a data event (simulate the result of background work)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn send_session_event(&mut self, event: SessionEvent) {
        self.core.handle_session_event(event);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Every command executed so far, in order
    pub fn executed_commands(&self) -> &[AppCommand] {
        &self.core.handler().executed
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
