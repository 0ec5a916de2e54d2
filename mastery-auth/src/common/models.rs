use mastery_api::endpoints::{
    auth::{ParentProfile, User},
    children::Roster,
};
use secrecy::SecretString;

/// The authenticated parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentIdentity {
    pub id: i64,
    pub display_name: String,
    pub username: String,
}

impl ParentIdentity {
    /// Build the identity from whatever parts of the profile the service sent.
    ///
    /// `fallback_username` is used when neither the user nor the profile
    /// carries a username (the login identifier, typically).
    pub fn from_parts(
        user: Option<&User>,
        profile: Option<&ParentProfile>,
        fallback_username: &str,
    ) -> Self {
        let username = user
            .map(|u| u.username.clone())
            .or_else(|| profile.and_then(|p| p.username()).map(str::to_string))
            .unwrap_or_else(|| fallback_username.to_string());

        let full_name = user.and_then(|u| {
            let name = [u.first_name.as_deref(), u.last_name.as_deref()]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!name.is_empty()).then_some(name)
        });

        let display_name = profile
            .and_then(|p| p.display_name.clone())
            .filter(|name| !name.is_empty())
            .or(full_name)
            .unwrap_or_else(|| username.clone());

        let id = profile
            .map(|p| p.id)
            .or_else(|| user.map(|u| u.id))
            .unwrap_or_default();

        Self {
            id,
            display_name,
            username,
        }
    }
}

/// Result of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error.unwrap_or_default())
        }
    }
}

/// Fields collected by the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
}

/// Session state changes the front-end reacts to (navigation, re-render).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(ParentIdentity),
    LoggedOut,
    SessionExpired,
    RosterUpdated(Roster),
    /// A roster load failed; carries the message to show. Sent after the
    /// empty `RosterUpdated` that replaces the stale roster.
    RosterLoadFailed(String),
}
