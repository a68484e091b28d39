//! Password hashing and verification utilities
//!
//! Uses Argon2id for password hashing. Whether stored credentials are hashed
//! at all is decided by the configured [`CredentialPolicy`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// How credentials are stored and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Stored as given, compared by exact equality
    #[default]
    Plaintext,
    /// Stored as an Argon2id PHC string
    Argon2,
}

impl CredentialPolicy {
    /// Turn a presented password into its stored form
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn encode(self, password: &str) -> Result<String, AppError> {
        match self {
            Self::Plaintext => Ok(password.to_string()),
            Self::Argon2 => hash_password(password),
        }
    }

    /// Compare a presented password against the stored form.
    ///
    /// A stored value that is not a valid hash under `Argon2` never matches.
    pub fn matches(self, presented: &str, stored: &str) -> bool {
        match self {
            Self::Plaintext => presented == stored,
            Self::Argon2 => verify_password(presented, stored).unwrap_or(false),
        }
    }
}

impl FromStr for CredentialPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plaintext" | "plain" => Ok(Self::Plaintext),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            other => Err(format!("unknown credential policy: {other}")),
        }
    }
}

impl fmt::Display for CredentialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext => f.write_str("plaintext"),
            Self::Argon2 => f.write_str("argon2"),
        }
    }
}
