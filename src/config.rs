//! Configuration management for the Zammad CLI.
//!
//! Connection settings come from two sources, resolved field by field:
//!
//! 1. The `ZAMMAD_URL` and `ZAMMAD_TOKEN` environment variables
//! 2. Credentials saved by `zammad auth login` in the platform config directory

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ZammadError;

/// Environment variable holding the instance URL.
pub const URL_ENV: &str = "ZAMMAD_URL";

/// Environment variable holding the API access token.
pub const TOKEN_ENV: &str = "ZAMMAD_TOKEN";

/// File name of the stored credentials inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Connection settings for a Zammad instance.
///
/// The token is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the instance (e.g., `https://support.example.com`).
    pub url: String,

    /// API access token. Must never be logged.
    token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Creates a configuration from explicit values.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    /// Returns the access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resolves the configuration from the environment, falling back to the store.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Config` if the URL or the token cannot be resolved,
    /// or `ZammadError::Storage` if the stored credentials cannot be read.
    pub fn load(store: &ConfigStore) -> Result<Self, ZammadError> {
        let stored = store.load()?;
        Self::resolve(read_env(URL_ENV), read_env(TOKEN_ENV), stored)
    }

    /// Combines environment values with stored credentials.
    ///
    /// Environment values win; blank values count as absent.
    pub fn resolve(
        env_url: Option<String>,
        env_token: Option<String>,
        stored: StoredCredentials,
    ) -> Result<Self, ZammadError> {
        let url = non_blank(env_url).or_else(|| non_blank(stored.url));
        let token = non_blank(env_token).or_else(|| non_blank(stored.token));

        match (url, token) {
            (Some(url), Some(token)) => Ok(Self { url, token }),
            _ => Err(ZammadError::not_configured()),
        }
    }

    /// Validates and normalizes a base URL entered at login.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Config` if the URL has no `http(s)://` scheme.
    pub fn validate_url(url: &str) -> Result<String, ZammadError> {
        let url = url.trim().trim_end_matches('/');

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ZammadError::invalid_config(
                "URL must start with http:// or https://",
            ));
        }

        Ok(url.to_string())
    }

    /// Validates that a token entered at login is not blank or a placeholder.
    pub fn validate_token(token: &str) -> Result<(), ZammadError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ZammadError::invalid_config("Token is required"));
        }

        let lower = token.to_lowercase();
        let placeholder_patterns = ["your_token", "your-token", "placeholder", "changeme"];
        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(ZammadError::invalid_config(
                "token appears to be a placeholder value",
            ));
        }

        Ok(())
    }
}

/// Returns true if both the URL and the token can be resolved.
pub fn has_config(store: &ConfigStore) -> bool {
    Config::load(store).is_ok()
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Credentials persisted on disk. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Saved instance URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Saved access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// On-disk credential store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store that reads and writes the given file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Storage` if no home directory can be determined.
    pub fn default_location() -> Result<Self, ZammadError> {
        let dirs = ProjectDirs::from("", "", "zammad-cli")
            .ok_or_else(|| ZammadError::storage("could not determine config directory"))?;
        Ok(Self::at(dirs.config_dir().join(CONFIG_FILE_NAME)))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads stored credentials. A missing file yields empty credentials.
    pub fn load(&self) -> Result<StoredCredentials, ZammadError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredCredentials::default());
            }
            Err(e) => {
                return Err(ZammadError::storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        toml::from_str(&contents).map_err(|e| {
            ZammadError::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Saves credentials, stripping trailing slashes from the URL.
    pub fn save(&self, url: &str, token: &str) -> Result<(), ZammadError> {
        let credentials = StoredCredentials {
            url: Some(url.trim_end_matches('/').to_string()),
            token: Some(token.to_string()),
        };

        let contents = toml::to_string(&credentials)
            .map_err(|e| ZammadError::storage(format!("failed to encode credentials: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ZammadError::storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&self.path, contents).map_err(|e| {
            ZammadError::storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        restrict_permissions(&self.path)?;

        tracing::debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    /// Removes stored credentials. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), ZammadError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ZammadError::storage(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), ZammadError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
        ZammadError::storage(format!(
            "failed to set permissions on {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), ZammadError> {
    Ok(())
}
