mod models;

pub use models::{AuthOutcome, ParentIdentity, RegistrationForm, SessionEvent};
