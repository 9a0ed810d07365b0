pub mod error;
pub mod items;
pub mod models;
pub mod notifications;
pub mod users;

use crate::config::HeaderKeys;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub use error::ApiError;
pub use notifications::NotificationLog;

/// Shared state for the unprotected tutorial endpoints
#[derive(Clone)]
pub struct ApiState {
    pub header_keys: Arc<HeaderKeys>,
    pub notification_log: Arc<NotificationLog>,
}

/// Create the tutorial router
#[allow(deprecated)]
pub fn api_router() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/items/", post(items::create_item))
        .route(
            "/items/:item_id",
            get(items::read_item).put(items::update_item),
        )
        .route("/models/:model_name", get(models::get_model))
        .route("/models/id/:model_id", get(models::get_model_by_id))
        .route("/users/", get(users::read_users))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/notifications/send-notification/:email",
            post(notifications::send_notification),
        )
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}
