//! JWT Token Handler
//! Mission: Generate and validate signed, expiring bearer tokens

use crate::auth::models::Claims;
use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;
use tracing::debug;

/// Why a token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, wrong algorithm, or signature mismatch
    Invalid,
    /// Signature fine but `exp` is not in the future
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "Invalid token"),
            TokenError::Expired => write!(f, "Token expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// JWT Handler for token operations.
///
/// Holds the process-wide signing secret; only HMAC algorithms are accepted
/// since the same secret both signs and verifies.
pub struct JwtHandler {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: &str, algorithm: Algorithm) -> Result<Self> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!("Unsupported JWT algorithm {algorithm:?}, expected HS256, HS384 or HS512");
        }
        if secret.is_empty() {
            bail!("JWT secret must not be empty");
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign a token for `subject` that expires `ttl` from now
    pub fn encode(&self, subject: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .context("Invalid timestamp")?
            .timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            exp: usize::try_from(expiration).context("Expiry before epoch")?,
            iat: now.timestamp() as usize,
        };

        debug!(
            "Generating JWT for {}, expires in {}s",
            subject,
            ttl.num_seconds()
        );

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .context("Failed to generate JWT")
    }

    /// Validate a JWT token and extract claims.
    ///
    /// The signature and algorithm are checked before any claim is trusted.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        // exp must be strictly in the future
        if decoded.claims.exp as i64 <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        debug!("Validated JWT for {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
