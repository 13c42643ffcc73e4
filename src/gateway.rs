//! API Gateway Module
//!
//! Single HTTP entry point to the Exógena API. Every request carries the
//! session's bearer token when there is one. A 401/403 is reported to the
//! registered [`AuthFailureObserver`] before the error is handed back to
//! the caller.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionStore;

/// Receives authorization failures from the gateway. Exactly one observer
/// is registered; it owns the "session expired" reaction.
pub trait AuthFailureObserver: Send + Sync {
    fn on_auth_failure(&self, status: StatusCode);
}

/// HTTP client for the Exógena backend
pub struct ApiGateway {
    base_url: String,
    client: reqwest::Client,
    sessions: Arc<SessionStore>,
    observer: Option<Arc<dyn AuthFailureObserver>>,
}

impl ApiGateway {
    pub fn new(base_url: &str, sessions: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            sessions,
            observer: None,
        })
    }

    /// Register the authorization-failure observer
    pub fn with_auth_observer(mut self, observer: Arc<dyn AuthFailureObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.dispatch(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(self.request(Method::PUT, path).json(body)).await
    }

    /// DELETE; whatever body comes back is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch::<IgnoredAny>(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let request = self.client.request(method, url);
        match self.sessions.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        // No response at all: the session is left alone
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = error_message(response).await;
            warn!(%status, "Session rejected by API");
            // Observer runs to completion (session cleared, redirect issued)
            // before the caller sees the error
            if let Some(observer) = &self.observer {
                observer.on_auth_failure(status);
            }
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let message = error_message(response).await;
            debug!(%status, ?message, "API error response");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };

        serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// `message` wins over `error`; anything else yields `None`
async fn error_message(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// API errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Rejected locally, never sent
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized ({status})")]
    Unauthorized { status: u16, message: Option<String> },

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } | ApiError::Unauthorized { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
