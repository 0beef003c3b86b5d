//! Local configuration and credential files under `~/.wts`.
//!
//! `config.json` holds defaults merged under whatever the user has stored;
//! `session.json` holds the auth token written by `login`. A missing or
//! unreadable file is never an error, it just means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.toonstudy.app/";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Contents of `config.json`: the typed fields plus any free-form keys the
/// user has stored through `config set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: None,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Value behind `config get`. Unknown keys read as null.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match key {
            "baseUrl" => Value::String(self.base_url.clone()),
            "userId" => self.user_id.clone().map_or(Value::Null, Value::String),
            other => self.extra.get(other).cloned().unwrap_or(Value::Null),
        }
    }

    /// Store a key for `config set`. The typed keys update their fields;
    /// anything else lands in the free-form section.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "baseUrl" => self.base_url = value.to_string(),
            "userId" => self.user_id = Some(value.to_string()),
            other => {
                self.extra
                    .insert(other.to_string(), Value::String(value.to_string()));
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// On-disk home for `config.json` and `session.json`.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// The standard location, `~/.wts`.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be determined.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().context("could not determine the home directory")?;
        Ok(Self {
            dir: home.join(".wts"),
        })
    }

    /// A store rooted at an explicit directory.
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. Stored values override defaults key by key.
    #[must_use]
    pub fn load(&self) -> Settings {
        read_json(&self.config_path()).unwrap_or_default()
    }

    /// Persist settings as pretty-printed JSON, creating the directory on
    /// demand.
    ///
    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        self.write_json(&self.config_path(), settings)
    }

    /// The stored session token, if the user is logged in.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        read_json::<StoredSession>(&self.session_path()).map(|session| session.token)
    }

    /// Write the token obtained from a login.
    ///
    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn store_session_token(&self, token: &str) -> Result<()> {
        let session = StoredSession {
            token: token.to_string(),
        };
        self.write_json(&self.session_path(), &session)
    }

    /// Remove the stored token. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Fails when an existing session file cannot be removed.
    pub fn clear_session_token(&self) -> Result<()> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("failed to remove the session file"),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let body = serde_json::to_string_pretty(value)?;
        fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Base URL for this invocation: the environment override wins over settings.
#[must_use]
pub fn effective_base_url(settings: &Settings, env_override: Option<String>) -> String {
    env_override.unwrap_or_else(|| settings.base_url.clone())
}
