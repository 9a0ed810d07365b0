//! Application wiring
//! Mission: Build shared state from config and assemble the router

use crate::{
    api::{api_router, ApiState, NotificationLog},
    auth::{
        api as auth_api, auth_middleware, AccessGuard, AuthState, Authenticator, JwtHandler,
        UserStore,
    },
    config::AppConfig,
    middleware::{cors_layer, handle_panic, process_time, request_logging},
};
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

/// Construct auth and tutorial state. Fails on bad users file or signing setup.
pub fn build_state(config: &AppConfig) -> Result<(AuthState, ApiState)> {
    let user_store = Arc::new(match &config.users_file {
        Some(path) => UserStore::load(path)?,
        None => UserStore::demo(&config.hasher)?,
    });
    let jwt_handler = Arc::new(JwtHandler::new(&config.jwt_secret, config.jwt_algorithm)?);

    let authenticator = Arc::new(Authenticator::new(
        user_store.clone(),
        config.hasher,
        jwt_handler.clone(),
        config.token_ttl,
    ));
    let guard = Arc::new(AccessGuard::new(user_store.clone(), jwt_handler));

    info!(
        "🔐 Authentication initialized: {} users, {:?}, {} min tokens",
        user_store.len(),
        config.jwt_algorithm,
        config.token_ttl.num_minutes()
    );

    let api_state = ApiState {
        header_keys: Arc::new(config.header_keys.clone()),
        notification_log: Arc::new(NotificationLog::new(config.notification_log.clone())),
    };

    Ok((AuthState::new(authenticator, guard), api_state))
}

/// Assemble public, protected and auth routes plus app-wide layers
pub fn router(auth_state: AuthState, api_state: ApiState, config: &AppConfig) -> Router {
    let auth_router = Router::new()
        .route("/token", post(auth_api::login))
        .with_state(auth_state.clone());

    let protected_routes = Router::new()
        .route("/users/me", get(auth_api::read_users_me))
        .route("/users/me/items", get(auth_api::read_own_items))
        .route_layer(middleware::from_fn_with_state(
            auth_state.guard.clone(),
            auth_middleware,
        ));

    let public_routes = api_router().with_state(api_state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(process_time))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(config.cors_origins.clone()))
}

/// `build_state` followed by `router`
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let (auth_state, api_state) = build_state(config)?;
    Ok(router(auth_state, api_state, config))
}
