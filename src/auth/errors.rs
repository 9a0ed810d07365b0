//! Authentication Errors
//! Mission: One closed set of login and access failures, mapped to HTTP

use crate::auth::jwt::TokenError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Auth error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password at login
    InvalidCredentials,
    /// No `Authorization: Bearer` header on a protected request
    MissingToken,
    /// Malformed, unsigned or tampered token
    InvalidToken,
    ExpiredToken,
    /// Token is fine but its subject no longer resolves
    UnknownSubject,
    DisabledAccount,
    /// Hashing or signing failed
    Internal,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::DisabledAccount => StatusCode::FORBIDDEN,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Client-facing message. Token failures share one message so callers
    /// cannot tell a forged token from a vanished user.
    fn detail(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Incorrect username or password",
            AuthError::MissingToken => "Not authenticated",
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::UnknownSubject => {
                "Could not validate credentials"
            }
            AuthError::DisabledAccount => "Inactive user",
            AuthError::Internal => "Internal server error",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Expired => AuthError::ExpiredToken,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
            AuthError::MissingToken => write!(f, "missing bearer token"),
            AuthError::InvalidToken => write!(f, "invalid token"),
            AuthError::ExpiredToken => write!(f, "expired token"),
            AuthError::UnknownSubject => write!(f, "token subject not found"),
            AuthError::DisabledAccount => write!(f, "account disabled"),
            AuthError::Internal => write!(f, "internal authentication failure"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.detail() }));

        if self.status() == StatusCode::UNAUTHORIZED {
            (
                self.status(),
                [(header::WWW_AUTHENTICATE, "Bearer")],
                body,
            )
                .into_response()
        } else {
            (self.status(), body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_responses() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::UnknownSubject,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{err}");
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
        }

        let disabled = AuthError::DisabledAccount.into_response();
        assert_eq!(disabled.status(), StatusCode::FORBIDDEN);
        assert!(disabled.headers().get(header::WWW_AUTHENTICATE).is_none());

        let internal = AuthError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_subject_indistinguishable_from_invalid_token() {
        assert_eq!(
            AuthError::UnknownSubject.detail(),
            AuthError::InvalidToken.detail()
        );
        assert_eq!(
            AuthError::UnknownSubject.status(),
            AuthError::InvalidToken.status()
        );
    }

    #[test]
    fn test_token_error_conversion() {
        assert_eq!(AuthError::from(TokenError::Invalid), AuthError::InvalidToken);
        assert_eq!(AuthError::from(TokenError::Expired), AuthError::ExpiredToken);
    }
}
