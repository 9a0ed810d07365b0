//! Configuration
//! Mission: Parse CLI flags / environment once at startup into a typed config

use crate::auth::password::PasswordHasher;
use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use bcrypt::DEFAULT_COST;
use chrono::Duration;
use clap::{Parser, Subcommand};
use jsonwebtoken::Algorithm;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const MIN_SECRET_LEN: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "tutorial-api")]
#[command(about = "Tutorial HTTP API with OAuth2 password-flow bearer tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a bcrypt hash for a users file entry
    HashPassword {
        password: String,

        /// bcrypt cost factor
        #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
        cost: u32,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// HMAC secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Token signing algorithm (HS256, HS384, HS512)
    #[arg(long, env = "JWT_ALGORITHM", default_value = "HS256")]
    pub jwt_algorithm: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "ACCESS_TOKEN_EXPIRE_MINUTES", default_value_t = 30)]
    pub access_token_expire_minutes: i64,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// Comma-separated list of allowed CORS origins
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost,http://localhost:8080"
    )]
    pub cors_origins: Vec<String>,

    /// TOML users file; the demo users are seeded when absent
    #[arg(long, env = "USERS_FILE")]
    pub users_file: Option<PathBuf>,

    /// File the notification background task appends to
    #[arg(long, env = "NOTIFICATION_LOG", default_value = "log.txt")]
    pub notification_log: PathBuf,

    /// bcrypt cost factor for seeded passwords
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
    pub bcrypt_cost: u32,

    /// Expected X-Token header on GET /users/{user_id}
    #[arg(long, env = "X_TOKEN", default_value = "fake-super-secret-token")]
    pub x_token: String,

    /// Expected X-Key header on GET /users/{user_id}
    #[arg(long, env = "X_KEY", default_value = "fake-super-secret-key")]
    pub x_key: String,
}

/// Validated application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
    pub users_file: Option<PathBuf>,
    pub notification_log: PathBuf,
    pub hasher: PasswordHasher,
    pub header_keys: HeaderKeys,
}

/// Shared values the tutorial header checks compare against
#[derive(Debug, Clone)]
pub struct HeaderKeys {
    pub x_token: String,
    pub x_key: String,
}

impl AppConfig {
    pub fn from_args(args: ServeArgs) -> Result<Self> {
        let jwt_secret = args
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .context("JWT_SECRET must be set")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        let jwt_algorithm = parse_algorithm(&args.jwt_algorithm)?;

        if args.access_token_expire_minutes <= 0 {
            bail!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be positive, got {}",
                args.access_token_expire_minutes
            );
        }
        let token_ttl = Duration::try_minutes(args.access_token_expire_minutes)
            .context("ACCESS_TOKEN_EXPIRE_MINUTES out of range")?;

        let bind_addr = args
            .bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDR {}", args.bind_addr))?;

        let cors_origins = args
            .cors_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin {o}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let hasher = PasswordHasher::new(args.bcrypt_cost)?;

        Ok(Self {
            jwt_secret,
            jwt_algorithm,
            token_ttl,
            bind_addr,
            cors_origins,
            users_file: args.users_file,
            notification_log: args.notification_log,
            hasher,
            header_keys: HeaderKeys {
                x_token: args.x_token,
                x_key: args.x_key,
            },
        })
    }
}

/// Accept only the HMAC family; the secret both signs and verifies
pub fn parse_algorithm(raw: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(&raw.trim().to_ascii_uppercase())
        .with_context(|| format!("Unknown JWT algorithm {raw}"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => bail!("Unsupported JWT algorithm {other:?}, expected HS256, HS384 or HS512"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> ServeArgs {
        let mut argv = vec!["tutorial-api"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().serve
    }

    fn with_secret(extra: &[&str]) -> ServeArgs {
        let mut argv = vec!["--jwt-secret", "0123456789abcdef0123"];
        argv.extend_from_slice(extra);
        parse(&argv)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_args(with_secret(&[])).unwrap();

        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.token_ttl, Duration::minutes(30));
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("http://localhost"),
                HeaderValue::from_static("http://localhost:8080"),
            ]
        );
        assert_eq!(config.hasher.cost(), DEFAULT_COST);
        assert_eq!(config.header_keys.x_token, "fake-super-secret-token");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let args = ServeArgs {
            jwt_secret: None,
            ..with_secret(&[])
        };
        assert!(AppConfig::from_args(args).is_err());
    }

    #[test]
    fn test_short_secret_is_fatal() {
        let args = ServeArgs {
            jwt_secret: Some("short".to_string()),
            ..with_secret(&[])
        };
        assert!(AppConfig::from_args(args).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_args(with_secret(&[
            "--jwt-algorithm",
            "hs512",
            "--access-token-expire-minutes",
            "5",
            "--bind-addr",
            "127.0.0.1:9000",
            "--cors-origins",
            "https://a.example,https://b.example",
            "--bcrypt-cost",
            "4",
        ]))
        .unwrap();

        assert_eq!(config.jwt_algorithm, Algorithm::HS512);
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.hasher.cost(), 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_args(with_secret(&["--jwt-algorithm", "RS256"])).is_err());
        assert!(AppConfig::from_args(with_secret(&["--jwt-algorithm", "none"])).is_err());
        assert!(
            AppConfig::from_args(with_secret(&["--access-token-expire-minutes", "0"])).is_err()
        );
        assert!(AppConfig::from_args(with_secret(&["--bind-addr", "nowhere"])).is_err());
        assert!(AppConfig::from_args(with_secret(&["--bcrypt-cost", "2"])).is_err());
    }

    #[test]
    fn test_hash_password_subcommand() {
        let cli = Cli::try_parse_from(["tutorial-api", "hash-password", "secret", "--cost", "4"])
            .unwrap();
        match cli.command {
            Some(Command::HashPassword { password, cost }) => {
                assert_eq!(password, "secret");
                assert_eq!(cost, 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
