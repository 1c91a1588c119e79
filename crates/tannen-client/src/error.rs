use thiserror::Error;

/// Auth operation errors.
///
/// Provider messages are surfaced verbatim; the backend's wording is what
/// the user needs to see ("Invalid login credentials", "User already
/// registered", …).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Provider(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Auth request failed: {0}")]
    Transport(String),

    #[error("Unexpected auth response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::InvalidCredentials(err.to_string())
    }
}
