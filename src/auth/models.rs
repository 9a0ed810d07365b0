//! Authentication Models
//! Mission: Define user records, token claims and login payloads

use serde::{Deserialize, Serialize};

/// User account, keyed by `username`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // subject (username)
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued-at timestamp
}

/// Form-encoded login body - POST /token
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token type advertised to clients. Only bearer tokens are issued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Bearer,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: TokenType,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TokenType::Bearer,
        }
    }
}

/// Identity resolved by the access guard for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// User response (sanitized)
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub disabled: bool,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
        }
    }
}

/// Item owned by the current user - GET /users/me/items
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnedItem {
    pub item_id: String,
    pub owner: String,
}
