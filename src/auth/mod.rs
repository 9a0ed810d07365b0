//! Authentication Module
//! Mission: OAuth2 password-flow login and bearer token access control

pub mod api;
pub mod errors;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod user_store;

pub use api::AuthState;
pub use errors::AuthError;
pub use guard::AccessGuard;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use password::PasswordHasher;
pub use service::Authenticator;
pub use user_store::UserStore;
