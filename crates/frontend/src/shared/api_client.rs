//! HTTP client wrapper for frontend-backend communication
//!
//! Every request carries browser credentials (the session cookie) and the
//! `X-Requested-With` marker. Failures are returned to the caller as
//! [`ApiError`]; nothing is retried.

use contracts::system::auth::ErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::shared::config::ApiConfig;

pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("failed to send request: {0}")]
    Network(String),
    #[error("HTTP {status}{}", describe(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("failed to build request: {0}")]
    Encode(String),
}

fn describe(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `error` field of the server's response body, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Successful response: decoded body plus HTTP status
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    requested_with: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            requested_with: config.requested_with.clone(),
        }
    }

    /// Build a full URL from a path like `/api/documents`.
    ///
    /// With an empty base URL the path stays relative to the current origin.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .credentials(RequestCredentials::Include)
            .header(REQUESTED_WITH_HEADER, &self.requested_with)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .prepare(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .prepare(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(response).await
    }

    /// Multipart POST; the browser sets the boundary header itself
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .prepare(Request::post(&self.url(path)))
            .body(form)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(response).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self
            .prepare(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(response).await
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();

    if !response.ok() {
        let message = response.text().await.ok().and_then(|body| error_message(&body));
        return Err(ApiError::Status { status, message });
    }

    let data = response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ApiResponse { data, status })
}

/// Extract `{"error": "..."}` from a failed response body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

/// Hook to access the shared client provided by `App`
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_same_origin() {
        let client = ApiClient::default();
        assert_eq!(client.url("/api/documents"), "/api/documents");
        assert_eq!(client.url("api/chat"), "/api/chat");
    }

    #[test]
    fn test_url_with_base() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            requested_with: "XMLHttpRequest".to_string(),
        });
        assert_eq!(
            client.url("/api/documents/abc"),
            "http://localhost:5000/api/documents/abc"
        );
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(r#"{"error": "Document not found"}"#).as_deref(),
            Some("Document not found")
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"error": ""}"#), None);
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: Some("Document not found".into()),
        };
        assert_eq!(err.to_string(), "HTTP 404: Document not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), Some("Document not found"));

        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 500");
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }
}
