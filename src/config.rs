//! Application configuration management.
//!
//! Configuration is read from environment variables, with `.env` support via
//! dotenvy (loaded in `main`). Every variable has a default so `load` cannot
//! fail; `validate` is the startup gate that refuses to run with a missing
//! admin password hash or an unchanged signing secret.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Sentinel value the secret key must be changed from before startup passes
const DEFAULT_SECRET_KEY: &str = "default-secret-key";

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub debug: bool,
    /// Signing secret reserved for the serving layer's session cookies
    pub secret_key: String,
    /// Session timeout in seconds
    pub session_timeout: u64,
    pub admin_user: String,
    /// Argon2 PHC hash of the admin password
    pub admin_password_hash: String,
    pub log_level: String,
    pub log_file: String,
}

/// Configuration problems found by [`Config::validate`], joined into a
/// single message for the operator.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

impl Config {
    pub fn load() -> Self {
        Self {
            app_name: env_or("APP_NAME", "Ops Dashboard"),
            debug: parse_bool(&env_or("DEBUG", "false")),
            secret_key: env_or("SECRET_KEY", DEFAULT_SECRET_KEY),
            session_timeout: env_parse("SESSION_TIMEOUT", 3600),
            admin_user: env_or("ADMIN_USER", "admin"),
            admin_password_hash: env_or("ADMIN_PASSWORD_HASH", ""),
            log_level: env_or("LOG_LEVEL", "info"),
            log_file: env_or("LOG_FILE", "opsdash.log"),
        }
    }

    /// Validate the deployment-supplied values. Fatal at startup: running
    /// with the compiled-in defaults would accept no logins at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.secret_key.is_empty() || self.secret_key == DEFAULT_SECRET_KEY {
            problems.push("SECRET_KEY is not set or uses the default value");
        }
        if self.admin_password_hash.is_empty() {
            problems.push("ADMIN_PASSWORD_HASH is not set");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError(problems.join("; ")))
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an env var, falling back to the default on missing or bad input
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Case-insensitive "true"; anything else is false
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
