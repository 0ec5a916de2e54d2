//! Process-wide session state: who is logged in and which children are linked.

use crate::common::{AuthOutcome, ParentIdentity, RegistrationForm, SessionEvent};
use mastery_api::endpoints::{
    ChildId,
    auth::CheckResponse,
    children::Roster,
    insights::InsightsReport,
};
use mastery_api::{ApiError, Client, CredentialStore, Request};
use secrecy::ExposeSecret;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

const LOGIN_FAILED: &str = "Login failed. Please check your username and password.";
const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Debug, Default)]
struct SessionState {
    identity: Option<ParentIdentity>,
    roster: Option<Roster>,
}

impl SessionState {
    fn reset(&mut self) {
        self.identity = None;
        self.roster = None;
    }
}

fn read(state: &RwLock<SessionState>) -> RwLockReadGuard<'_, SessionState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(state: &RwLock<SessionState>) -> RwLockWriteGuard<'_, SessionState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Single source of truth for the authenticated parent and their roster.
///
/// These operations are the only places that write stored credentials or
/// emit the session events the front-end navigates on.
pub struct SessionContext {
    client: Client,
    store: Arc<dyn CredentialStore>,
    state: Arc<RwLock<SessionState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionContext {
    pub fn new(
        api_url: &str,
        store: Arc<dyn CredentialStore>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let state = Arc::new(RwLock::new(SessionState::default()));

        let expired_state = state.clone();
        let expired_events = events.clone();
        let client = Client::new(api_url, store.clone()).on_session_expired(move || {
            tracing::warn!("Session expired, returning to login");
            write(&expired_state).reset();
            let _ = expired_events.send(SessionEvent::SessionExpired);
        });

        Self {
            client,
            store,
            state,
            events,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn identity(&self) -> Option<ParentIdentity> {
        read(&self.state).identity.clone()
    }

    pub fn roster(&self) -> Option<Roster> {
        read(&self.state).roster.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        read(&self.state).identity.is_some()
    }

    /// Log in and, on success, persist the credential pair and load the roster.
    ///
    /// A failed login leaves stored credentials untouched.
    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        tracing::info!("Logging in as {}", username);

        let mut response = match self
            .client
            .send_anonymous(Request::auth().login(username, password))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Login rejected: {}", e);
                return AuthOutcome::failed(non_empty_or(e.user_message(), LOGIN_FAILED));
            }
        };

        let (Some(access), Some(refresh)) = (response.access.take(), response.refresh.take())
        else {
            let message = response.error.unwrap_or_else(|| LOGIN_FAILED.to_string());
            tracing::warn!("Login response carried no credentials: {}", message);
            return AuthOutcome::failed(message);
        };

        if let Err(e) = self.store.store_pair(&access, &refresh) {
            tracing::error!("Failed to persist credentials: {}", e);
            return AuthOutcome::failed("Could not save your session");
        }

        let identity = ParentIdentity::from_parts(
            response.user.as_ref(),
            response.parent_profile.as_ref(),
            username,
        );
        tracing::info!("Logged in as parent {}", identity.id);
        self.establish(identity).await;

        AuthOutcome::succeeded()
    }

    /// Create a parent account. Does not log in.
    pub async fn register(&self, form: RegistrationForm) -> AuthOutcome {
        tracing::info!("Registering parent account {}", form.username);

        let mut request = Request::auth()
            .register(form.username, form.email)
            .password(form.password.expose_secret())
            .password2(form.password_confirmation.expose_secret())
            .first_name(form.first_name)
            .last_name(form.last_name);
        if let Some(display_name) = form.display_name.filter(|name| !name.trim().is_empty()) {
            request = request.display_name(display_name);
        }

        match self.client.send_anonymous(request).await {
            Ok(_) => {
                tracing::info!("Registration succeeded");
                AuthOutcome::succeeded()
            }
            Err(e) => {
                tracing::warn!("Registration rejected: {}", e);
                AuthOutcome::failed(non_empty_or(e.user_message(), REGISTRATION_FAILED))
            }
        }
    }

    /// Forget the session entirely. Safe to call when already logged out.
    pub fn logout(&self) {
        tracing::info!("Logging out");
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored credentials: {}", e);
        }
        write(&self.state).reset();
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Reload the roster. On failure the roster is reset to an empty one,
    /// `RosterLoadFailed` follows the update and the error is returned.
    pub async fn fetch_children(&self) -> Result<Roster, ApiError> {
        match self.client.send(Request::parents().children()).await {
            Ok(roster) => {
                tracing::info!(
                    "Loaded {} children, {} pending invites",
                    roster.children.len(),
                    roster.pending_invites.len()
                );
                write(&self.state).roster = Some(roster.clone());
                let _ = self.events.send(SessionEvent::RosterUpdated(roster.clone()));
                Ok(roster)
            }
            Err(e) => {
                tracing::error!("Failed to fetch children: {}", e);
                if !e.is_session_expired() {
                    write(&self.state).roster = Some(Roster::default());
                    let _ = self.events.send(SessionEvent::RosterUpdated(Roster::default()));
                    let _ = self
                        .events
                        .send(SessionEvent::RosterLoadFailed(e.user_message()));
                }
                Err(e)
            }
        }
    }

    /// Restore a session from a stored access credential.
    ///
    /// Makes no network call when nothing is stored. An invalid credential is
    /// cleared; a transport failure leaves it in place for the next start.
    pub async fn fetch_identity(&self) -> Option<ParentIdentity> {
        match self.store.access_token() {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!("No stored credential, starting logged out");
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to read stored credentials: {}", e);
                return None;
            }
        }

        tracing::info!("Verifying stored credential");
        match self.client.send(Request::auth().check()).await {
            Ok(CheckResponse {
                is_parent: true,
                parent_profile,
                user,
            }) => {
                let fallback = parent_profile
                    .as_ref()
                    .and_then(|profile| profile.username())
                    .unwrap_or_default()
                    .to_string();
                let identity =
                    ParentIdentity::from_parts(user.as_ref(), parent_profile.as_ref(), &fallback);
                tracing::info!("Restored session for parent {}", identity.id);
                self.establish(identity.clone()).await;
                Some(identity)
            }
            Ok(_) => {
                tracing::warn!("Stored credential does not belong to a parent account");
                self.discard_credentials();
                None
            }
            Err(ApiError::Transport(e)) => {
                tracing::error!("Could not verify stored credential: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Stored credential rejected: {}", e);
                self.discard_credentials();
                None
            }
        }
    }

    /// Ask the service for a new invite code a child can use to link accounts.
    pub async fn generate_invite_code(&self) -> Result<String, ApiError> {
        let response = self.client.send(Request::parents().link_child()).await?;
        match response.invite_code {
            Some(code) if !code.is_empty() => {
                tracing::info!("Generated invite code");
                Ok(code)
            }
            _ => Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "No invite code was returned".to_string()),
            )),
        }
    }

    pub async fn fetch_insights(&self, child_id: ChildId) -> Result<InsightsReport, ApiError> {
        tracing::info!("Loading insights for child {}", child_id);
        self.client
            .send(Request::parents().insights(child_id))
            .await
    }

    async fn establish(&self, identity: ParentIdentity) {
        write(&self.state).identity = Some(identity.clone());
        let _ = self.events.send(SessionEvent::LoggedIn(identity));

        // The failure has already been announced with RosterLoadFailed.
        if let Err(e) = self.fetch_children().await {
            tracing::warn!("Session established without a roster: {}", e);
        }
    }

    fn discard_credentials(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored credentials: {}", e);
        }
        write(&self.state).reset();
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
