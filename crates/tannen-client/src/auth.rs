//! Email/password auth against the hosted provider.
//!
//! Credentials are validated client-side before any request goes out; the
//! provider enforces the same rules again server-side. All session state is
//! explicit: callers hold the [`Session`] and pass it into every operation
//! that needs identity, nothing fetches a current user ambiently.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AuthError;
use crate::{provider_message, BackendClient};

/// Email/password pair, validated before submission.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Authenticated identity as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// A signed-in session: the provider-issued identity and access token.
///
/// Serializable so the CLI can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= Utc::now(),
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: AuthUser,
}

impl BackendClient {
    /// Register a new account. The provider sends a confirmation email;
    /// the account is not usable until the link in it is followed.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError> {
        credentials.validate()?;

        let url = self.build_url("/auth/v1/signup");
        let request = self.apply_key(self.client().post(&url)).json(credentials);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status, &body)));
        }

        tracing::info!(email = %credentials.email, "sign-up submitted");
        Ok(())
    }

    /// Exchange email/password for a [`Session`].
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        credentials.validate()?;

        let url = self.build_url("/auth/v1/token?grant_type=password");
        let request = self.apply_key(self.client().post(&url)).json(credentials);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status, &body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        let session = Session {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        };

        tracing::info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Revoke the session's token. The caller discards the session
    /// regardless of the outcome.
    pub async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let url = self.build_url("/auth/v1/logout");
        let request = self.authorize(self.client().post(&url), session);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status, &body)));
        }

        tracing::info!(user_id = %session.user_id, "signed out");
        Ok(())
    }

    /// Fetch the identity behind a session's token.
    pub async fn get_user(&self, session: &Session) -> Result<AuthUser, AuthError> {
        let url = self.build_url("/auth/v1/user");
        let request = self.authorize(self.client().get(&url), session);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server: &mockito::ServerGuard) -> BackendClient {
        BackendClient::new(server.url(), "anon-key".to_string()).unwrap()
    }

    fn test_session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: Some("elf@example.com".to_string()),
            access_token: "token-123".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn sign_in_builds_a_session_from_the_token_response() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "password".into(),
            ))
            .match_header("apikey", "anon-key")
            .with_status(200)
            .with_body(format!(
                r#"{{"access_token":"abc","token_type":"bearer","expires_in":3600,"user":{{"id":"{}","email":"elf@example.com"}}}}"#,
                user_id
            ))
            .create_async()
            .await;

        let client = test_client(&server);
        let session = client
            .sign_in(&Credentials::new("elf@example.com", "secret1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.access_token, "abc");
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn sign_in_surfaces_the_provider_message_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_description":"Invalid login credentials"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client
            .sign_in(&Credentials::new("elf@example.com", "wrong-pass"))
            .await
            .unwrap_err();

        match err {
            AuthError::Provider(message) => assert_eq!(message, "Invalid login credentials"),
            other => panic!("expected Provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn short_password_is_rejected_without_a_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/signup")
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client
            .sign_up(&Credentials::new("elf@example.com", "short"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_out_sends_the_session_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer token-123")
            .with_status(204)
            .create_async()
            .await;

        let client = test_client(&server);
        client.sign_out(&test_session()).await.unwrap();
        mock.assert_async().await;
    }
}
