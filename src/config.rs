// Config module: loads the three WordPress secrets the run needs.
// Values come from the process environment, optionally seeded from a
// `.env` file. Nothing here touches the network or the drafts folder.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

pub const SITE_VAR: &str = "SITE";
pub const USER_VAR: &str = "WP_USER";
pub const APP_PASS_VAR: &str = "WP_APP_PASS";

/// Credentials for one WordPress site. Built once at startup and passed
/// explicitly to the client; never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub site_url: String,
    pub username: String,
    pub app_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("site_url", &self.site_url)
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// Raised when one or more required settings are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub missing: Vec<&'static str>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing required settings: {} (set them in the environment or in .env)",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for ConfigError {}

impl Credentials {
    /// Read the credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the credentials through `lookup`. Every missing or empty
    /// value is reported at once rather than one per run.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |key: &'static str| match lookup(key) {
            Some(v) if !v.is_empty() => v,
            _ => {
                missing.push(key);
                String::new()
            }
        };

        let site_url = fetch(SITE_VAR);
        let username = fetch(USER_VAR);
        let app_password = fetch(APP_PASS_VAR);

        if !missing.is_empty() {
            return Err(ConfigError { missing });
        }
        Ok(Credentials {
            site_url,
            username,
            app_password,
        })
    }
}

/// Seed the environment from a dotenv file. Variables already set in the
/// real environment take precedence. A missing file is fine.
pub fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded env file");
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "no env file");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to parse env file {}", path.display())),
    }
}
