use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;

static SESSION_FILE_NAME: &str = "session.toml";
static ENV_API_URL: &str = "WANDER_API_URL";
static ENV_API_KEY: &str = "WANDER_API_KEY";
static ENV_ACCESS_TOKEN: &str = "WANDER_ACCESS_TOKEN";
static ENV_USER_ID: &str = "WANDER_USER_ID";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "wander-cli", "wander"));

/// Connection settings for the hosted quest store. The URL and API key
/// are required to talk to the store at all; the access token and user
/// id describe the signed-in session (issued elsewhere) and are only
/// needed for likes and preferences.
#[derive(Debug, Clone)]
pub struct AppConfig {
    api_url: String,
    api_key: String,
    access_token: Option<String>,
    user_id: Option<String>,
}

/// Optional on-disk session written by the sign-in tooling.
#[derive(Debug, Clone, Default, Deserialize)]
struct SessionFile {
    api_url: Option<String>,
    api_key: Option<String>,
    access_token: Option<String>,
    user_id: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from the provided override, environment
    /// variables, and the platform session file, in that order.
    pub fn discover(api_url_override: Option<String>) -> Result<Self> {
        let session = load_session_file()?;

        let api_url = api_url_override
            .or_else(|| env::var(ENV_API_URL).ok())
            .or(session.api_url)
            .ok_or_else(|| anyhow!("No store URL configured: set {ENV_API_URL} or sign in"))?;
        let api_key = env::var(ENV_API_KEY)
            .ok()
            .or(session.api_key)
            .ok_or_else(|| anyhow!("No API key configured: set {ENV_API_KEY} or sign in"))?;
        let access_token = env::var(ENV_ACCESS_TOKEN).ok().or(session.access_token);
        let user_id = env::var(ENV_USER_ID).ok().or(session.user_id);

        Ok(Self {
            api_url,
            api_key,
            access_token,
            user_id,
        })
    }

    /// Construct [`AppConfig`] directly from resolved values.
    pub fn from_parts(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            access_token,
            user_id,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The signed-in user id, or an error for operations that need one.
    pub fn require_user(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| anyhow!("No user session configured: set {ENV_USER_ID} or sign in"))
    }
}

fn session_file_path() -> Option<PathBuf> {
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.config_dir().join(SESSION_FILE_NAME))
}

fn load_session_file() -> Result<SessionFile> {
    let Some(path) = session_file_path() else {
        return Ok(SessionFile::default());
    };
    if !path.exists() {
        return Ok(SessionFile::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session file at {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("Failed to parse session file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_exposes_resolved_values() {
        let config = AppConfig::from_parts(
            "https://store.example",
            "anon-key",
            Some("token".to_string()),
            Some("user-9".to_string()),
        );

        assert_eq!(config.api_url(), "https://store.example");
        assert_eq!(config.api_key(), "anon-key");
        assert_eq!(config.access_token(), Some("token"));
        assert_eq!(config.require_user().unwrap(), "user-9");
    }

    #[test]
    fn require_user_fails_without_a_session() {
        let config = AppConfig::from_parts("https://store.example", "anon-key", None, None);
        assert!(config.user_id().is_none());
        assert!(config.require_user().is_err());
    }

    #[test]
    fn session_file_parses_partial_contents() {
        let session: SessionFile = toml::from_str(
            "api_url = \"https://store.example\"\nuser_id = \"user-1\"\n",
        )
        .expect("parse session");
        assert_eq!(session.api_url.as_deref(), Some("https://store.example"));
        assert_eq!(session.user_id.as_deref(), Some("user-1"));
        assert!(session.api_key.is_none());
    }
}
