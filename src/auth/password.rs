//! Password Hashing
//! Mission: Salted, slow one-way hashes for stored credentials

use anyhow::{bail, Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            bail!("bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {cost}");
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. A fresh salt is generated per call and
    /// embedded in the returned string together with the cost.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        hash(plaintext, self.cost).context("Failed to hash password")
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed hashes verify as `false`.
    pub fn verify(&self, plaintext: &str, password_hash: &str) -> bool {
        verify(plaintext, password_hash).unwrap_or(false)
    }
}
