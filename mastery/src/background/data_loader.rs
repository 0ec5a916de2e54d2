use crate::events::DataEvent;
use mastery_api::endpoints::ChildId;
use mastery_auth::{RegistrationForm, SessionContext};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs session operations off the UI loop and reports results as
/// [`DataEvent`]s. Navigation-relevant changes (login, logout, expiry, roster)
/// arrive separately as session events.
#[derive(Clone)]
pub struct DataLoader {
    pub session: Arc<SessionContext>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(session: Arc<SessionContext>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { session, data_tx }
    }

    fn emit(&self, event: DataEvent) {
        if self.data_tx.send(event).is_err() {
            tracing::debug!("UI loop has stopped, dropping data event");
        }
    }

    pub async fn login(&self, username: String, password: SecretString) {
        let outcome = self.session.login(&username, password.expose_secret()).await;
        if let Err(error) = outcome.into_result() {
            self.emit(DataEvent::LoginFailed { error });
        }
    }

    pub async fn register(&self, form: RegistrationForm) {
        match self.session.register(form).await.into_result() {
            Ok(()) => self.emit(DataEvent::RegistrationSucceeded),
            Err(error) => self.emit(DataEvent::RegistrationFailed { error }),
        }
    }

    /// Re-establish the session from stored credentials, if any.
    pub async fn restore_session(&self) {
        let restored = self.session.fetch_identity().await.is_some();
        self.emit(DataEvent::SessionRestoreFinished { restored });
    }

    /// Reload the roster. Success and failure both arrive as session events.
    pub async fn load_roster(&self) {
        if let Err(e) = self.session.fetch_children().await {
            tracing::debug!("Roster reload failed: {}", e);
        }
    }

    pub async fn generate_invite_code(&self) {
        match self.session.generate_invite_code().await {
            Ok(code) => {
                self.emit(DataEvent::InviteCodeGenerated { code });
                // New codes show up in the pending invites list.
                self.load_roster().await;
            }
            Err(e) if e.is_session_expired() => {}
            Err(e) => {
                tracing::error!("Failed to generate invite code: {}", e);
                self.emit(DataEvent::InviteCodeFailed {
                    error: e.user_message(),
                });
            }
        }
    }

    pub async fn load_insights(&self, child_id: ChildId) {
        match self.session.fetch_insights(child_id).await {
            Ok(report) => self.emit(DataEvent::InsightsLoaded {
                child_id,
                report: Box::new(report),
            }),
            Err(e) if e.is_not_found() => {
                tracing::info!("No insights for child {} yet", child_id);
                self.emit(DataEvent::InsightsNotFound { child_id });
            }
            Err(e) if e.is_session_expired() => {}
            Err(e) => {
                tracing::error!("Failed to load insights for child {}: {}", child_id, e);
                self.emit(DataEvent::InsightsLoadFailed {
                    child_id,
                    error: e.user_message(),
                });
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
