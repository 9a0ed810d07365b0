//! User Storage
//! Mission: Hold the read-only set of accounts for the lifetime of the process

use crate::auth::{models::User, password::PasswordHasher};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// In-memory user storage, keyed by username.
///
/// Seeded once at startup and never mutated afterwards, so it can be shared
/// across request handlers behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
}

/// On-disk users file layout
#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

impl UserStore {
    /// Build a store from user records. Usernames must be unique.
    pub fn new(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let mut map = HashMap::new();
        for user in users {
            if user.username.is_empty() {
                bail!("User with empty username");
            }
            if map.contains_key(&user.username) {
                bail!("Duplicate username: {}", user.username);
            }
            map.insert(user.username.clone(), user);
        }
        Ok(Self { users: map })
    }

    /// Tutorial accounts: `johndoe` / `secret` and the disabled `alice` / `secret2`
    pub fn demo(hasher: &PasswordHasher) -> Result<Self> {
        let users = [
            ("johndoe", "John Doe", "johndoe@example.com", "secret", false),
            ("alice", "Alice Wonderson", "alice@example.com", "secret2", true),
        ]
        .into_iter()
        .map(|(username, full_name, email, password, disabled)| -> Result<User> {
            Ok(User {
                username: username.to_string(),
                email: email.to_string(),
                full_name: full_name.to_string(),
                disabled,
                password_hash: hasher.hash(password)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

        info!("🔐 Demo users seeded (johndoe, alice)");
        warn!("⚠️  DEMO CREDENTIALS IN USE - SET USERS_FILE IN PRODUCTION!");

        Self::new(users)
    }

    /// Parse a TOML users file (`[[users]]` tables with a bcrypt `password_hash`)
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: UsersFile = toml::from_str(raw).context("Failed to parse users file")?;
        for user in &file.users {
            if !user.password_hash.starts_with("$2") {
                warn!(
                    "User {} has a password_hash that is not bcrypt; logins will fail",
                    user.username
                );
            }
        }
        Self::new(file.users)
    }

    /// Load a TOML users file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read users file {}", path.display()))?;
        let store = Self::from_toml_str(&raw)?;
        info!("🔐 Loaded {} users from {}", store.len(), path.display());
        Ok(store)
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::MIN_COST;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST).unwrap()
    }

    fn user(username: &str) -> User {
        User {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: username.to_uppercase(),
            disabled: false,
            password_hash: "$2b$04$placeholder".to_string(),
        }
    }

    #[test]
    fn test_demo_users_seeded() {
        let hasher = hasher();
        let store = UserStore::demo(&hasher).unwrap();
        assert_eq!(store.len(), 2);

        let john = store.get_user_by_username("johndoe").unwrap();
        assert!(!john.disabled);
        assert!(hasher.verify("secret", &john.password_hash));

        let alice = store.get_user_by_username("alice").unwrap();
        assert!(alice.disabled);
        assert!(hasher.verify("secret2", &alice.password_hash));
    }

    #[test]
    fn test_unknown_user_absent() {
        let store = UserStore::new([user("johndoe")]).unwrap();
        assert!(store.get_user_by_username("nobody").is_none());
        assert!(store.get_user_by_username("JohnDoe").is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        assert!(UserStore::new([user("bob"), user("bob")]).is_err());
        assert!(UserStore::new([user("")]).is_err());
    }

    #[test]
    fn test_users_file_parsing() {
        let raw = r#"
            [[users]]
            username = "carol"
            email = "carol@example.com"
            full_name = "Carol"
            password_hash = "$2b$04$abcdefghijklmnopqrstuu"

            [[users]]
            username = "dave"
            email = "dave@example.com"
            full_name = "Dave"
            disabled = true
            password_hash = "$2b$04$abcdefghijklmnopqrstuu"
        "#;

        let store = UserStore::from_toml_str(raw).unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.get_user_by_username("carol").unwrap().disabled);
        assert!(store.get_user_by_username("dave").unwrap().disabled);
    }

    #[test]
    fn test_users_file_missing_field_rejected() {
        let raw = r#"
            [[users]]
            username = "carol"
            email = "carol@example.com"
        "#;
        assert!(UserStore::from_toml_str(raw).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let hasher = hasher();
        let hash = hasher.hash("pw").unwrap();

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[users]]\nusername = \"erin\"\nemail = \"erin@example.com\"\nfull_name = \"Erin\"\npassword_hash = \"{hash}\""
        )
        .unwrap();

        let store = UserStore::load(file.path()).unwrap();
        let erin = store.get_user_by_username("erin").unwrap();
        assert!(hasher.verify("pw", &erin.password_hash));

        assert!(UserStore::load(Path::new("/nonexistent/users.toml")).is_err());
    }
}
