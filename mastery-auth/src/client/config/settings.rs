use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Base address of the learning platform service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where to keep the credential pair. Defaults to the user cache directory.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            credentials_path: None,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (or `$MASTERY_CONFIG`) and then from
    /// `MASTERY_*` environment variables, e.g. `MASTERY_API_URL`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MASTERY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                Environment::with_prefix("MASTERY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }
}
