// Identity and session types shared with the front-end
pub mod common;

// Client-side session management (settings, credential file, session context)
mod client;
mod error;

pub use client::{FileCredentialStore, SessionContext, Settings};
pub use common::{AuthOutcome, ParentIdentity, RegistrationForm, SessionEvent};
pub use error::AuthError;
