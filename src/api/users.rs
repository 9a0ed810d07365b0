//! User listing and header-guarded lookup

use crate::api::{error::ApiError, ApiState};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters shared by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommonParams {
    pub q: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub include_all: bool,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserIdResponse {
    pub user_id: String,
}

/// GET /users/
pub async fn read_users(
    params: Result<Query<CommonParams>, QueryRejection>,
) -> Result<Json<CommonParams>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
    Ok(Json(params))
}

/// GET /users/:user_id - requires matching `X-Token` and `X-Key` headers
pub async fn get_user(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserIdResponse>, ApiError> {
    verify_header(&headers, "x-token", &state.header_keys.x_token, "X-Token")?;
    verify_header(&headers, "x-key", &state.header_keys.x_key, "X-Key")?;
    Ok(Json(UserIdResponse { user_id }))
}

fn verify_header(
    headers: &HeaderMap,
    name: &str,
    expected: &str,
    display: &str,
) -> Result<(), ApiError> {
    let value = headers
        .get(name)
        .ok_or_else(|| ApiError::Validation(format!("{display} header missing")))?;

    if value.as_bytes() != expected.as_bytes() {
        return Err(ApiError::BadRequest(format!("{display} header invalid")));
    }
    Ok(())
}
