use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use mastery_api::CredentialStore;
use mastery_auth::{FileCredentialStore, SessionContext, Settings};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::events::DataEvent;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::state::AppState;
use crate::ui::screens::Screen;

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(5000);
        let (log_path, _log_guard) = init_logging_with_buffer(log_buffer.clone())?;

        tracing::info!("mastery starting, logging to {}", log_path.display());

        let store = Arc::new(match &self.settings.credentials_path {
            Some(path) => FileCredentialStore::at(path)?,
            None => FileCredentialStore::new()?,
        });
        tracing::info!("Credentials stored at {}", store.path().display());
        let has_credentials = matches!(store.access_token(), Ok(Some(_)));

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let (session_tx, mut session_rx) = tokio::sync::mpsc::unbounded_channel();

        let session = Arc::new(SessionContext::new(
            &self.settings.api_url,
            store,
            session_tx,
        ));
        let data_loader = DataLoader::new(session, data_tx);

        let mut terminal = self.init()?;
        let mut ui_state = AppState::new();
        let mut task_manager = BackgroundTaskManager::new();
        let mut event_stream = EventStream::new();

        if has_credentials {
            tracing::info!("Found stored credentials, restoring session");
            executor::execute_command(
                AppCommand::RestoreSession,
                &mut ui_state,
                &mut task_manager,
                &data_loader,
            );
        }

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            self.on_key(KeyEvent::from(key), &mut ui_state, &mut task_manager, &data_loader);
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
                Some(session_event) = session_rx.recv() => {
                    tracing::debug!("Received session event: {:?}", session_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, DataEvent::from(session_event));
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Cancel all background tasks
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn on_key(
        &self,
        key: KeyEvent,
        ui_state: &mut AppState,
        task_manager: &mut BackgroundTaskManager,
        data_loader: &DataLoader,
    ) {
        // Keys typed into the forms may be credentials, and logging on the
        // logs screen would feed back into it.
        let quiet = matches!(
            ui_state.current_screen(),
            Screen::Logs(_) | Screen::Login(_) | Screen::Register(_)
        );
        if !quiet {
            tracing::debug!("Key press: {:?}", key);
        }

        let Some(command) = handlers::handle_key_input(key, ui_state) else {
            return;
        };
        if !command.carries_input() && !matches!(ui_state.current_screen(), Screen::Logs(_)) {
            tracing::info!("Executing command: {:?}", command);
        }
        executor::execute_command(command, ui_state, task_manager, data_loader);
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
