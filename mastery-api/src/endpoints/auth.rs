use super::serialize_secret;
use crate::macros::setter;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentProfile {
    pub id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl ParentProfile {
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or_else(|| self.user.as_ref().map(|user| user.username.as_str()))
    }
}

// Requests

#[derive(Debug, Serialize)]
pub struct ParentLogin {
    username: String,
    #[serde(serialize_with = "serialize_secret")]
    password: SecretString,
}

impl ParentLogin {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Request for ParentLogin {
    type Data = Self;
    type Response = LoginResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/api/parent/login/".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Serialize)]
pub struct ParentRegister {
    username: String,
    email: String,
    #[serde(serialize_with = "serialize_secret")]
    password: SecretString,
    #[serde(serialize_with = "serialize_secret")]
    password2: SecretString,
    first_name: String,
    last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl ParentRegister {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(String::new()),
            password2: SecretString::from(String::new()),
            first_name: String::new(),
            last_name: String::new(),
            display_name: None,
        }
    }

    setter!(secret password);
    setter!(secret password2);
    setter!(first_name: String);
    setter!(last_name: String);
    setter!(opt display_name: String);
}

impl Request for ParentRegister {
    type Data = Self;
    type Response = RegisterResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/api/parent/register/".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ParentCheck;

impl ParentCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ParentCheck {
    type Data = ();
    type Response = CheckResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/api/parent/check/".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshAccessToken {
    refresh: String,
}

impl RefreshAccessToken {
    pub fn new(refresh: impl Into<String>) -> Self {
        Self {
            refresh: refresh.into(),
        }
    }
}

impl Request for RefreshAccessToken {
    type Data = Self;
    type Response = RefreshResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/api/token/refresh/".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

// Responses

/// Either the issued credential pair with the identity, or an `error`.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub parent_profile: Option<ParentProfile>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub parent_profile: Option<ParentProfile>,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub is_parent: bool,
    #[serde(default)]
    pub parent_profile: Option<ParentProfile>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present when the service rotates refresh credentials.
    #[serde(default)]
    pub refresh: Option<String>,
}
