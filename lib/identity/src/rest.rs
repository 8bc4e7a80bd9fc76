//! REST client for the hosted identity provider.
//!
//! The provider exposes a small JSON API keyed by a project API key:
//!
//! - `POST {base}/v1/sessions` verifies credentials and issues a session
//! - `POST {base}/v1/accounts` creates an account and issues a session
//! - `DELETE {base}/v1/sessions/current` revokes the bearer session
//!
//! Failures come back as `{"error": {"message": "..."}}`; the message is
//! a terse upper-case code for credential problems and a human-readable
//! sentence for account-creation rejections.

use crate::error::ProviderError;
use crate::provider::IdentityProvider;
use crate::session::{Persistence, Session, Uid};
use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;
use std::sync::Mutex;

/// Provider error codes that mean "the credentials were wrong".
const CREDENTIAL_CODES: &[&str] = &[
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "USER_DISABLED",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionBody {
    uid: String,
    email: String,
    id_token: String,
    refresh_token: Option<String>,
    /// Lifetime of the issued token, in seconds.
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// [`IdentityProvider`] backed by the hosted REST API.
pub struct RestIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    persistence: Mutex<Persistence>,
}

impl RestIdentityProvider {
    /// Builds a provider client.
    ///
    /// `base_url` is taken without a trailing slash; `timeout` bounds
    /// every request to the provider.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            persistence: Mutex::new(Persistence::default()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn current_persistence(&self) -> Persistence {
        *self.persistence.lock().expect("persistence lock poisoned")
    }

    /// Sends a credential-bearing request and decodes the session body.
    async fn issue_session(
        &self,
        path: &str,
        email: &str,
        password: &str,
        credential_failure: bool,
    ) -> Result<Session, ProviderError> {
        let response = self
            .client
            .post(self.url(path))
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            let body: SessionBody =
                response
                    .json()
                    .await
                    .map_err(|e| ProviderError::InvalidResponse {
                        reason: e.to_string(),
                    })?;
            return Ok(Session::new(
                Uid::from(body.uid),
                body.email,
                body.id_token,
                body.refresh_token,
                Duration::seconds(body.expires_in),
                self.current_persistence(),
            ));
        }

        let status = response.status();
        let body: ErrorBody = response
            .json()
            .await
            .map_err(|_| ProviderError::InvalidResponse {
                reason: format!("undecodable error body for status {status}"),
            })?;
        let message = body.error.message;

        if credential_failure && CREDENTIAL_CODES.contains(&message.as_str()) {
            tracing::debug!(code = %message, "credential rejection");
            return Err(ProviderError::InvalidCredentials);
        }
        Err(ProviderError::Rejected { message })
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    fn configure_persistence(&self, mode: Persistence) {
        *self.persistence.lock().expect("persistence lock poisoned") = mode;
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.issue_session("/v1/sessions", email, password, true)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.issue_session("/v1/accounts", email, password, false)
            .await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(self.url("/v1/sessions/current"))
            .query(&[("key", self.api_key.as_str())])
            .bearer_auth(session.id_token())
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(ProviderError::Rejected {
                message: body.error.message,
            }),
            Err(_) => Err(ProviderError::InvalidResponse {
                reason: format!("undecodable error body for status {status}"),
            }),
        }
    }
}
