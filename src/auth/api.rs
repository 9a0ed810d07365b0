//! Authentication API Endpoints
//! Mission: Provide token issuance and current-user endpoints

use crate::api::error::ApiError;
use crate::auth::{
    errors::AuthError,
    guard::AccessGuard,
    models::{AuthenticatedUser, LoginForm, OwnedItem, Token, UserResponse},
    service::Authenticator,
};
use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use std::sync::Arc;
use tracing::{error, info};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
    pub guard: Arc<AccessGuard>,
}

impl AuthState {
    pub fn new(authenticator: Arc<Authenticator>, guard: Arc<AccessGuard>) -> Self {
        Self {
            authenticator,
            guard,
        }
    }
}

/// Login endpoint - POST /token
///
/// A malformed or incomplete form is a validation failure (422), not a
/// credential failure.
pub async fn login(
    State(state): State<AuthState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<Token>, Response> {
    let Form(form) =
        form.map_err(|e| ApiError::Validation(e.body_text()).into_response())?;
    info!("🔐 Login attempt: {}", form.username);

    // bcrypt is deliberately slow; keep it off the async workers
    let authenticator = state.authenticator.clone();
    let token = tokio::task::spawn_blocking(move || {
        authenticator.login(&form.username, &form.password)
    })
    .await
    .map_err(|e| {
        error!("Login task failed: {}", e);
        AuthError::Internal.into_response()
    })?
    .map_err(IntoResponse::into_response)?;

    Ok(Json(token))
}

/// Current user profile - GET /users/me
pub async fn read_users_me(user: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse::from_user(user.user()))
}

/// Items owned by the current user - GET /users/me/items
pub async fn read_own_items(user: AuthenticatedUser) -> Json<Vec<OwnedItem>> {
    Json(vec![OwnedItem {
        item_id: "Foo".to_string(),
        owner: user.user().username.clone(),
    }])
}
