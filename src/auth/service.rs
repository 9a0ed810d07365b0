//! Authenticator
//! Mission: Turn a username/password pair into a signed bearer token

use crate::auth::{
    errors::AuthError,
    jwt::JwtHandler,
    models::{Token, User},
    password::PasswordHasher,
    user_store::UserStore,
};
use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default access token lifetime
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Credential checker and token issuer
#[derive(Debug, Clone)]
pub struct Authenticator {
    user_store: Arc<UserStore>,
    hasher: PasswordHasher,
    jwt_handler: Arc<JwtHandler>,
    token_ttl: Duration,
}

impl Authenticator {
    pub fn new(
        user_store: Arc<UserStore>,
        hasher: PasswordHasher,
        jwt_handler: Arc<JwtHandler>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_store,
            hasher,
            jwt_handler,
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Verify username and password.
    ///
    /// Unknown usernames and wrong passwords return the same error. An
    /// unknown username skips the bcrypt work, so the two cases are not
    /// timing-equivalent.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.user_store.get_user_by_username(username) else {
            debug!("Login for unknown user {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            warn!("❌ Failed login attempt: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.clone())
    }

    /// Issue a bearer token for an authenticated user
    pub fn issue_token(&self, user: &User) -> Result<Token> {
        let access_token = self.jwt_handler.encode(&user.username, self.token_ttl)?;
        info!("✅ Token issued: {}", user.username);
        Ok(Token::bearer(access_token))
    }

    /// `authenticate` followed by `issue_token`
    pub fn login(&self, username: &str, password: &str) -> Result<Token, AuthError> {
        let user = self.authenticate(username, password)?;
        self.issue_token(&user).map_err(|e| {
            warn!("Failed to issue token for {}: {:#}", username, e);
            AuthError::Internal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{models::TokenType, password::MIN_COST};
    use jsonwebtoken::Algorithm;

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        let store = Arc::new(UserStore::demo(&hasher).unwrap());
        let jwt = Arc::new(JwtHandler::new("test-secret-key-12345", Algorithm::HS256).unwrap());
        Authenticator::new(
            store,
            hasher,
            jwt,
            Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        )
    }

    #[test]
    fn test_valid_credentials_authenticate() {
        let auth = authenticator();

        let john = auth.authenticate("johndoe", "secret").unwrap();
        assert_eq!(john.username, "johndoe");
        assert_eq!(john.email, "johndoe@example.com");

        // Disabled accounts can still log in; the guard rejects them on use
        let alice = auth.authenticate("alice", "secret2").unwrap();
        assert!(alice.disabled);
    }

    #[test]
    fn test_wrong_password_fails() {
        let auth = authenticator();
        assert_eq!(
            auth.authenticate("johndoe", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.authenticate("johndoe", "secret2"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.authenticate("johndoe", ""),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_unknown_user_matches_wrong_password() {
        let auth = authenticator();
        assert_eq!(
            auth.authenticate("nobody", "secret"),
            auth.authenticate("johndoe", "wrong")
        );
    }

    #[test]
    fn test_issue_token_is_bearer() {
        let auth = authenticator();
        let token = auth.login("johndoe", "secret").unwrap();

        assert_eq!(token.token_type, TokenType::Bearer);
        let claims = auth.jwt_handler.decode(&token.access_token).unwrap();
        assert_eq!(claims.sub, "johndoe");

        let ttl = (claims.exp - claims.iat) as i64;
        assert_eq!(ttl, DEFAULT_TOKEN_TTL_MINUTES * 60);
    }

    #[test]
    fn test_login_failure_issues_nothing() {
        let auth = authenticator();
        assert_eq!(
            auth.login("johndoe", "nope"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
