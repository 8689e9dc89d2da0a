//! core::profile
//!
//! The local profile: which controller to talk to and the credentials to use.
//!
//! # Locations
//!
//! The active profile is resolved in this order:
//! 1. The `-c/--config` option
//! 2. `$DRYDOCK_PROFILE`
//! 3. The default name, `config`
//!
//! A value containing a path separator is used as a file path verbatim.
//! Any other value names `~/.drydock/<value>.json`.
//!
//! # Security
//!
//! The profile holds a bearer token. It is written with mode 0600 inside a
//! 0700 directory, through a temp file and an atomic rename. The token is
//! never printed or logged.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::controller::{ApiError, ControllerClient};

/// Environment variable naming the default profile.
pub const PROFILE_ENV: &str = "DRYDOCK_PROFILE";

/// Profile name used when nothing else selects one.
pub const DEFAULT_PROFILE: &str = "config";

/// Page size used when the profile does not set one.
pub const DEFAULT_LIMIT: usize = 100;

const PROFILE_DIR: &str = ".drydock";

/// Errors from profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Client configuration file not found at: {path}\nAre you logged in? Use 'drydock login' or 'drydock register' to get started.")]
    NotFound { path: PathBuf },

    #[error("failed to read profile '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse profile '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to write profile '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("home directory not found")]
    NoHomeDir,
}

/// A saved controller session.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Controller URL, e.g. `http://drydock.example.com`
    pub controller: String,

    #[serde(default)]
    pub username: String,

    /// Bearer token; empty until a successful login
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    /// Page size for list commands; 0 means [`DEFAULT_LIMIT`]
    #[serde(default)]
    pub response_limit: usize,
}

fn default_true() -> bool {
    true
}

// Custom Debug to avoid exposing the token
impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("controller", &self.controller)
            .field("username", &self.username)
            .field("has_token", &!self.token.is_empty())
            .field("ssl_verify", &self.ssl_verify)
            .field("response_limit", &self.response_limit)
            .finish()
    }
}

impl Profile {
    /// Create an unauthenticated profile for a controller.
    pub fn new(controller: impl Into<String>, ssl_verify: bool) -> Self {
        Self {
            controller: controller.into(),
            username: String::new(),
            token: String::new(),
            ssl_verify,
            response_limit: 0,
        }
    }

    /// Load the profile selected by `config` (or the environment).
    pub fn load(config: Option<&str>) -> Result<(Self, PathBuf), ProfileError> {
        let path = locate(config)?;
        let profile = Self::read(&path)?;
        Ok((profile, path))
    }

    /// Read a profile from an explicit path.
    pub fn read(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            return Err(ProfileError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded profile");
        serde_json::from_str(&content).map_err(|e| ProfileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write to an explicit path with owner-only permissions.
    pub fn write(&self, path: &Path) -> Result<(), ProfileError> {
        let write_err = |source| ProfileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_err)?;
                #[cfg(unix)]
                fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                    .map_err(write_err)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let temp_path = path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;

            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }

        fs::rename(&temp_path, path).map_err(write_err)?;
        debug!(path = %path.display(), "saved profile");
        Ok(())
    }

    /// Remove the profile selected by `config`. A missing file is not an error.
    pub fn delete(config: Option<&str>) -> Result<(), ProfileError> {
        let path = locate(config)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ProfileError::Write { path, source }),
        }
    }

    /// Effective page size for list commands.
    pub fn limit(&self) -> usize {
        if self.response_limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.response_limit
        }
    }

    /// Build an API client from this profile.
    pub fn client(&self) -> Result<ControllerClient, ApiError> {
        let token = (!self.token.is_empty()).then(|| self.token.clone());
        ControllerClient::new(&self.controller, token, self.ssl_verify)
    }
}

/// Resolve the profile file path from the option and the environment.
pub fn locate(config: Option<&str>) -> Result<PathBuf, ProfileError> {
    let env = std::env::var(PROFILE_ENV).ok();
    let home = dirs::home_dir().ok_or(ProfileError::NoHomeDir)?;
    Ok(locate_in(config, env.as_deref(), &home))
}

/// Resolve a profile path against an explicit environment value and home.
pub fn locate_in(config: Option<&str>, env: Option<&str>, home: &Path) -> PathBuf {
    let name = config
        .filter(|c| !c.is_empty())
        .or(env.filter(|e| !e.is_empty()))
        .unwrap_or(DEFAULT_PROFILE);

    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        return PathBuf::from(name);
    }

    home.join(PROFILE_DIR).join(format!("{}.json", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Profile {
        Profile {
            controller: "http://drydock.example.com".into(),
            username: "jkirk".into(),
            token: "abc123secret".into(),
            ssl_verify: true,
            response_limit: 0,
        }
    }

    #[test]
    fn locate_defaults_to_config_json() {
        let home = Path::new("/home/u");
        assert_eq!(
            locate_in(None, None, home),
            PathBuf::from("/home/u/.drydock/config.json")
        );
    }

    #[test]
    fn locate_prefers_flag_over_env() {
        let home = Path::new("/home/u");
        assert_eq!(
            locate_in(Some("staging"), Some("prod"), home),
            PathBuf::from("/home/u/.drydock/staging.json")
        );
        assert_eq!(
            locate_in(None, Some("prod"), home),
            PathBuf::from("/home/u/.drydock/prod.json")
        );
    }

    #[test]
    fn locate_uses_paths_verbatim() {
        let home = Path::new("/home/u");
        assert_eq!(
            locate_in(Some("/tmp/p.json"), None, home),
            PathBuf::from("/tmp/p.json")
        );
        assert_eq!(
            locate_in(Some("./local.json"), None, home),
            PathBuf::from("./local.json")
        );
    }

    #[test]
    fn write_then_read_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("p.json");

        sample().write(&path).unwrap();
        assert_eq!(Profile::read(&path).unwrap(), sample());
    }

    #[cfg(unix)]
    #[test]
    fn write_restricts_permissions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        sample().write(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Profile::read(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ProfileError::NotFound { .. }));
        assert!(err.to_string().contains("Are you logged in?"));
    }

    #[test]
    fn limit_defaults_when_unset() {
        let mut profile = sample();
        assert_eq!(profile.limit(), DEFAULT_LIMIT);
        profile.response_limit = 25;
        assert_eq!(profile.limit(), 25);
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("abc123secret"));
        assert!(rendered.contains("has_token: true"));
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"controller": "http://c.example.com"}"#).unwrap();
        assert!(profile.ssl_verify);
        assert!(profile.token.is_empty());
        assert_eq!(profile.limit(), DEFAULT_LIMIT);
    }
}
