pub mod credentials;
pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::credentials::{
    ACCESS_TOKEN_KEY, CredentialError, CredentialStore, MemoryCredentialStore, REFRESH_TOKEN_KEY,
};
pub use crate::error::{ApiError, ServiceError};
pub use reqwest::StatusCode;

use endpoints::auth::RefreshAccessToken;
use repositories::*;
use std::sync::Arc;
use tower_api_client::{Request as ApiRequest, RequestData};

/// Called once each time a failed refresh ends the session.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// HTTP client for the learning platform service.
///
/// Every request sent through [`Client::send`] carries the stored access
/// credential as a bearer header. A 401 triggers one refresh exchange and one
/// retry of the original request; a second 401 is returned to the caller.
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    on_session_expired: Option<SessionExpiredHook>,
}

/// A request on its way through [`Client::send`].
struct Outgoing<R> {
    request: R,
    authorization: Option<String>,
    retried: bool,
}

impl<R> Outgoing<R> {
    fn new(request: R, authorization: Option<String>) -> Self {
        Self {
            request,
            authorization,
            retried: false,
        }
    }

    fn into_retry(self, access_token: String) -> Self {
        Self {
            request: self.request,
            authorization: Some(access_token),
            retried: true,
        }
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            on_session_expired: None,
        }
    }

    /// Register the action to take when the session can no longer be refreshed.
    pub fn on_session_expired<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Send an authenticated request, refreshing the access credential once if
    /// the service rejects it.
    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let mut outgoing = Outgoing::new(request, self.store.access_token()?);

        loop {
            tracing::debug!(
                endpoint = %outgoing.request.endpoint(),
                authorized = outgoing.authorization.is_some(),
                retried = outgoing.retried,
                "Dispatching request"
            );

            let error = match self
                .dispatch(&outgoing.request, outgoing.authorization.as_deref())
                .await
            {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if !error.is_unauthorized() || outgoing.retried {
                return Err(error);
            }

            let Some(access_token) = self.refresh_access_token().await? else {
                tracing::debug!("No refresh credential stored, not retrying");
                return Err(error);
            };

            outgoing = outgoing.into_retry(access_token);
        }
    }

    /// Send a request without credentials and without the refresh path.
    ///
    /// Used for login, registration and the refresh exchange itself.
    pub async fn send_anonymous<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        tracing::debug!(endpoint = %request.endpoint(), "Dispatching anonymous request");
        self.dispatch(&request, None).await
    }

    /// Exchange the stored refresh credential for a new access credential.
    ///
    /// Returns `Ok(None)` without any network call when no refresh credential
    /// is stored. If the exchange fails, both credentials are cleared, the
    /// session-expired hook runs and [`ApiError::SessionExpired`] is returned.
    pub async fn refresh_access_token(&self) -> Result<Option<String>, ApiError> {
        let Some(refresh_token) = self.store.refresh_token()? else {
            return Ok(None);
        };

        tracing::warn!("Access credential rejected, refreshing");
        match self
            .send_anonymous(RefreshAccessToken::new(refresh_token))
            .await
        {
            Ok(tokens) => {
                self.store.set(ACCESS_TOKEN_KEY, &tokens.access)?;
                if let Some(rotated) = tokens.refresh.as_deref() {
                    self.store.set(REFRESH_TOKEN_KEY, rotated)?;
                }
                tracing::info!("Access credential refreshed");
                Ok(Some(tokens.access))
            }
            Err(e) => {
                tracing::error!("Refresh failed, ending session: {}", e);
                if let Err(clear_err) = self.store.clear() {
                    tracing::error!("Failed to clear stored credentials: {}", clear_err);
                }
                if let Some(hook) = &self.on_session_expired {
                    hook();
                }
                Err(ApiError::SessionExpired(Box::new(e)))
            }
        }
    }

    /// The full URL for an endpoint. Endpoint paths are appended verbatim so
    /// their trailing slash reaches the service.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    async fn dispatch<R>(
        &self,
        request: &R,
        access_token: Option<&str>,
    ) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let url = self.url_for(&request.endpoint());
        let mut builder = self.http_client.request(method_of::<R>(), &url);

        for (name, value) in request.headers().iter() {
            builder = builder.header(name.as_str(), value.as_bytes());
        }
        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Json(data) => builder.json(data),
            RequestData::Form(data) => builder.form(data),
            RequestData::Query(data) => builder.query(data),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%url, %status, "Request failed");
            return Err(ApiError::Service {
                status,
                body: ServiceError::from_body(&body),
            });
        }

        let payload = if body.trim().is_empty() { "null" } else { &body };
        Ok(serde_json::from_str(payload)?)
    }
}

fn method_of<R: ApiRequest>() -> reqwest::Method {
    match R::METHOD.as_str() {
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        "PATCH" => reqwest::Method::PATCH,
        "DELETE" => reqwest::Method::DELETE,
        "HEAD" => reqwest::Method::HEAD,
        _ => reqwest::Method::GET,
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn parents() -> ParentRepository {
        ParentRepository::new()
    }
}
