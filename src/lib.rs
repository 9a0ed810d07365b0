//! Tutorial API Library
//!
//! Exposes the auth core, tutorial endpoints and router assembly for use by
//! the binary and integration tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod middleware;

pub use app::{build_app, build_state, router};
pub use config::{AppConfig, Cli};
