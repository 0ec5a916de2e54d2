use crate::credentials::CredentialError;
use serde_json::Value;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("({status}) {body}")]
    Service { status: StatusCode, body: ServiceError },

    /// The refresh exchange failed; stored credentials have been cleared.
    #[error("session expired: {0}")]
    SessionExpired(Box<ApiError>),

    /// A success status whose body carried an `error` instead of the payload.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("credential store error: {0}")]
    Credentials(#[from] CredentialError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status whose body did not match the expected payload.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    /// A message suitable for showing next to the form or view that failed.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Service { status, body } => {
                let message = body.display_message();
                if message.is_empty() {
                    format!("Request failed ({})", status)
                } else {
                    message
                }
            }
            ApiError::SessionExpired(_) => "Your session has expired. Please log in again.".into(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Credentials(_) => "Could not access stored credentials".into(),
            ApiError::Transport(_) => "Unable to reach the server. Please try again.".into(),
            ApiError::Decode(_) => "The server sent an unexpected response".into(),
        }
    }
}

/// Decoded body of an error response.
///
/// The service reports failures either as a single message under `error`,
/// `detail` or `message`, or as a map of field name to messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    Message(String),
    Fields(Vec<(String, Vec<String>)>),
    Raw(String),
}

const MESSAGE_KEYS: [&str; 3] = ["error", "detail", "message"];
const NON_FIELD_KEY: &str = "non_field_errors";

impl ServiceError {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                for key in MESSAGE_KEYS {
                    if let Some(Value::String(message)) = map.get(key) {
                        return ServiceError::Message(message.clone());
                    }
                }

                let fields: Vec<(String, Vec<String>)> = map
                    .into_iter()
                    .map(|(field, value)| {
                        let mut messages = Vec::new();
                        collect_messages(value, &mut messages);
                        (field, messages)
                    })
                    .filter(|(_, messages)| !messages.is_empty())
                    .collect();

                if fields.is_empty() {
                    ServiceError::Raw(body.trim().to_string())
                } else {
                    ServiceError::Fields(fields)
                }
            }
            Ok(Value::String(message)) => ServiceError::Message(message),
            _ => ServiceError::Raw(body.trim().to_string()),
        }
    }

    /// Flatten the error into one displayable string.
    ///
    /// Field errors become `field: message` lines; `non_field_errors` are
    /// shown without a prefix.
    pub fn display_message(&self) -> String {
        match self {
            ServiceError::Message(message) | ServiceError::Raw(message) => message.clone(),
            ServiceError::Fields(fields) => fields
                .iter()
                .map(|(field, messages)| {
                    let joined = messages.join(" ");
                    if field == NON_FIELD_KEY {
                        joined
                    } else {
                        format!("{}: {}", field, joined)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        match self {
            ServiceError::Fields(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, messages)| messages.as_slice()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_message())
    }
}

fn collect_messages(value: Value, out: &mut Vec<String>) {
    match value {
        Value::String(message) => out.push(message),
        Value::Array(items) => items.into_iter().for_each(|item| collect_messages(item, out)),
        Value::Object(map) => map.into_iter().for_each(|(_, item)| collect_messages(item, out)),
        Value::Null => {}
        other => out.push(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message_keys() {
        assert_eq!(
            ServiceError::from_body(r#"{"error": "Invalid credentials"}"#),
            ServiceError::Message("Invalid credentials".into())
        );
        assert_eq!(
            ServiceError::from_body(r#"{"detail": "Not found."}"#).display_message(),
            "Not found."
        );
    }

    #[test]
    fn test_field_map_is_aggregated() {
        let body = r#"{
            "password": ["Password fields didn't match."],
            "username": ["A user with that username already exists."]
        }"#;
        let error = ServiceError::from_body(body);

        assert_eq!(
            error.field("password"),
            Some(&["Password fields didn't match.".to_string()][..])
        );
        let message = error.display_message();
        assert!(message.contains("password: Password fields didn't match."));
        assert!(message.contains("username: A user with that username already exists."));
    }

    #[test]
    fn test_non_field_errors_have_no_prefix() {
        let error = ServiceError::from_body(r#"{"non_field_errors": ["Something went wrong"]}"#);
        assert_eq!(error.display_message(), "Something went wrong");
    }

    #[test]
    fn test_non_json_body_is_kept_raw() {
        let error = ServiceError::from_body("  Bad Gateway\n");
        assert_eq!(error, ServiceError::Raw("Bad Gateway".into()));
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let error = ApiError::Service {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ServiceError::Raw(String::new()),
        };
        assert!(error.user_message().contains("500"));
        assert!(!error.is_unauthorized());
    }
}
