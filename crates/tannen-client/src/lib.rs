//! HTTP client for the hosted backend.
//!
//! Wraps the backend's auth REST surface in a small client with the anon
//! API key applied to every request and an explicit [`Session`] carried by
//! the caller. Storage access against the same backend lives in
//! `tannen-storage`; this crate only owns identity.

pub mod auth;
pub mod error;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tannen_core::Config;

pub use auth::{AuthUser, Credentials, Session};
pub use error::AuthError;

/// Client for the hosted backend with the anon key applied to every request.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(base_url: String, anon_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend_url.clone(), config.backend_anon_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Apply the anon API key. Session-authenticated requests additionally
    /// carry a bearer token via [`Self::authorize`].
    pub(crate) fn apply_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", self.anon_key.as_str())
    }

    pub(crate) fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        self.apply_key(request)
            .header("Authorization", format!("Bearer {}", session.access_token))
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

/// Extract the provider's own error message from a failed auth response.
///
/// The backend reports errors under a handful of keys depending on the
/// endpoint; fall back to the raw body, then to the status code.
pub(crate) fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ProviderError {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ProviderError>(body) {
        if let Some(message) = parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
        {
            return message;
        }
    }

    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    }
}
