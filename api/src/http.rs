// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with bearer authentication and error mapping.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;

/// HTTP client for backend calls.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ApiConfig,
    session: Session,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Builds an authenticated request for an API path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredential`] without building anything when
    /// the session holds no token.
    pub fn build_request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token()?;
        let url = self.config.url(path);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// A `401` clears the session before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire().await;
            return Err(ApiError::Unauthorized);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = server_message(&text).unwrap_or_else(|| generic_message(status));
        tracing::debug!(%status, %message, "request failed");
        Err(ApiError::Api { status, message })
    }
}

/// Picks the `message` (or `error`) string out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn generic_message(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "Record not found".to_string(),
        StatusCode::FORBIDDEN => "You are not allowed to do that".to_string(),
        s if s.is_server_error() => "Server error, please try again later".to_string(),
        s => format!("Request failed ({s})"),
    }
}
