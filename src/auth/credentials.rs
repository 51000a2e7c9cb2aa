use anyhow::Result;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::config::Config;

/// The single configured admin identity: a username and the argon2 PHC hash
/// of the accepted password. Built once from config, immutable afterwards.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    username: String,
    password_hash: String,
}

/// Hash a password with a fresh random salt.
///
/// Two calls with the same password produce different encodings; only
/// verification against the hash is meaningful, never hash equality.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// A malformed hash is a verification failure, not an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Rejecting login against malformed password hash: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

impl AdminCredential {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.admin_user.clone(),
            config.admin_password_hash.clone(),
        )
    }

    /// Check a login attempt against the configured admin identity.
    ///
    /// An unknown username fails before any hashing work. The caller only
    /// sees a boolean; the reason is logged here.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            warn!("Login attempt for unknown user: {}", username);
            return false;
        }

        if verify_password(password, &self.password_hash) {
            info!("Successful login for user: {}", username);
            true
        } else {
            warn!("Failed login attempt for user: {}", username);
            false
        }
    }
}
