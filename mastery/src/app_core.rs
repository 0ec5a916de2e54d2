use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};
use mastery_auth::SessionEvent;

/// Trait for handling command execution (production = real loader + tasks, test = mock)
///
/// Tests inject a handler that applies state transitions without spawning
/// background tasks or talking to the learning service.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self {
            ui_state: AppState::new(),
            handler,
        }
    }

    /// Translate a key press to a command and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.handler.execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Execute a command directly, bypassing key translation
    pub fn handle_command(&mut self, command: AppCommand) {
        self.handler.execute_with_context(command, &mut self.ui_state);
    }

    /// Apply the result of background work
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    /// Apply a notification from the session context
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        self.handle_data_event(DataEvent::from(event));
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
