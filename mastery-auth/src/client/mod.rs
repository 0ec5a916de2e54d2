mod config;
mod session;
mod token_storage;

pub use config::Settings;
pub use session::SessionContext;
pub use token_storage::FileCredentialStore;
