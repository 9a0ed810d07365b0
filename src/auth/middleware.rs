//! Authentication Middleware
//! Mission: Protect API endpoints with bearer token validation

use crate::auth::{errors::AuthError, guard::AccessGuard, models::AuthenticatedUser};
use crate::middleware::logging::RequestUser;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

/// Auth middleware that validates `Authorization: Bearer <token>`, stores
/// the resolved identity in the request extensions and tags the response
/// with the username for request logging
pub async fn auth_middleware(
    State(guard): State<Arc<AccessGuard>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AuthError::MissingToken)?;

    let identity = guard.authorize(bearer.token())?;

    let username = identity.user().username.clone();
    req.extensions_mut().insert(identity);

    let mut response = next.run(req).await;
    response.extensions_mut().insert(RequestUser(username));
    Ok(response)
}

/// Extract the identity placed by `auth_middleware`.
///
/// Rejects with `MissingToken` when used on a route the middleware does not
/// cover.
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
