//! Access Guard
//! Mission: Resolve the account behind a bearer token, or refuse the request

use crate::auth::{
    errors::AuthError, jwt::JwtHandler, models::AuthenticatedUser, user_store::UserStore,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-request authorization. Each call is independent; nothing is cached
/// between requests.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    user_store: Arc<UserStore>,
    jwt_handler: Arc<JwtHandler>,
}

impl AccessGuard {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }

    /// Decode the token, re-resolve its subject and check the account is active
    pub fn authorize(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.jwt_handler.decode(token).map_err(|e| {
            debug!("Rejected token: {}", e);
            AuthError::from(e)
        })?;

        let user = self
            .user_store
            .get_user_by_username(&claims.sub)
            .ok_or_else(|| {
                warn!("Valid token for unknown subject {}", claims.sub);
                AuthError::UnknownSubject
            })?;

        if user.disabled {
            warn!("Token presented for disabled account {}", user.username);
            return Err(AuthError::DisabledAccount);
        }

        Ok(AuthenticatedUser(user.clone()))
    }
}
