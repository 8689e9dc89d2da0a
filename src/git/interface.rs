//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to git for drydock. Only remote
//! configuration is touched: apps are bound to a repository through a remote
//! pointing at the controller's builder.
//!
//! # Remote convention
//!
//! For a controller at `drydock.example.com` the builder lives at
//! `drydock-builder.example.com` and the remote for app `foo` is
//! `ssh://git@drydock-builder.example.com:2222/foo.git`.
//!
//! # Example
//!
//! ```ignore
//! use drydock::git::Git;
//! use std::path::Path;
//!
//! let cwd = Path::new(".");
//! let git = Git::open(cwd)?;
//! let app = git.detect_app_name("drydock.example.com", cwd)?;
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Port the builder accepts git pushes on.
pub const BUILDER_PORT: u16 = 2222;

/// Remote name used when none is given.
pub const DEFAULT_REMOTE: &str = "drydock";

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// A remote with this name already exists with a different URL.
    #[error("A git remote with the name {remote} already exists. To overwrite this remote run:\ndrydock git:remote --force --remote {remote} --app {app}")]
    RemoteExists {
        /// The remote name
        remote: String,
        /// The app the caller tried to bind
        app: String,
    },

    /// The app name could not be worked out from the working directory.
    #[error("could not determine the app name from the current directory; pass --app")]
    NoAppName,

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// What [`Git::create_remote`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    Created,
    Replaced,
    /// The remote already pointed at the right URL.
    Unchanged,
}

/// Interface to a Git repository.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// inside the work tree.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// All remotes with a URL.
    pub fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        let names = self.repo.remotes()?;
        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            if let Some(url) = self.remote_url(name)? {
                remotes.push(Remote {
                    name: name.to_string(),
                    url,
                });
            }
        }
        Ok(remotes)
    }

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Bind `app` to this repository through remote `name`.
    ///
    /// An existing remote with another URL is replaced only with `force`.
    pub fn create_remote(
        &self,
        controller_host: &str,
        name: &str,
        app: &str,
        force: bool,
    ) -> Result<RemoteOutcome, GitError> {
        let url = remote_url_for(controller_host, app);

        let outcome = match self.remote_url(name)? {
            Some(existing) if existing == url => return Ok(RemoteOutcome::Unchanged),
            Some(_) if !force => {
                return Err(GitError::RemoteExists {
                    remote: name.to_string(),
                    app: app.to_string(),
                })
            }
            Some(_) => {
                self.repo.remote_delete(name)?;
                RemoteOutcome::Replaced
            }
            None => RemoteOutcome::Created,
        };

        self.repo.remote(name, &url)?;
        debug!(remote = name, %url, "created git remote");
        Ok(outcome)
    }

    /// Delete every remote pointing at `app`. Returns the names removed.
    pub fn remove_app_remotes(
        &self,
        controller_host: &str,
        app: &str,
    ) -> Result<Vec<String>, GitError> {
        let url = remote_url_for(controller_host, app);
        let mut removed = Vec::new();

        for remote in self.remotes()? {
            if remote.url == url {
                self.repo.remote_delete(&remote.name)?;
                removed.push(remote.name);
            }
        }

        Ok(removed)
    }

    /// Work out the app bound to this repository.
    ///
    /// A remote pointing at the controller's builder names the app; without
    /// one the name of `cwd` is used, not the work tree root.
    pub fn detect_app_name(&self, controller_host: &str, cwd: &Path) -> Result<String, GitError> {
        let prefix = remote_prefix(controller_host);
        for remote in self.remotes()? {
            if let Some(app) = app_from_remote_url(&prefix, &remote.url) {
                return Ok(app);
            }
        }

        let app = dir_app_name(cwd).ok_or(GitError::NoAppName)?;
        debug!(cwd = %cwd.display(), app = %app, "detected app name from directory");
        Ok(app)
    }
}

/// The builder host for a controller host: first label suffixed `-builder`.
pub fn builder_host(controller_host: &str) -> String {
    match controller_host.split_once('.') {
        Some((first, rest)) => format!("{}-builder.{}", first, rest),
        None => format!("{}-builder", controller_host),
    }
}

fn remote_prefix(controller_host: &str) -> String {
    format!("ssh://git@{}:{}/", builder_host(controller_host), BUILDER_PORT)
}

/// The git remote URL for an app.
pub fn remote_url_for(controller_host: &str, app: &str) -> String {
    format!("{}{}.git", remote_prefix(controller_host), app)
}

fn app_from_remote_url(prefix: &str, url: &str) -> Option<String> {
    let rest = url.strip_prefix(prefix)?;
    let app = rest.rsplit('/').next()?.trim_end_matches(".git");
    (!app.is_empty()).then(|| app.to_string())
}

fn dir_app_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase())
}

/// The app name for a directory that is not bound through a remote.
pub fn app_name_from_dir(dir: &Path) -> Option<String> {
    dir_app_name(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git) {
        let dir = TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let git = Git::open(dir.path()).unwrap();
        (dir, git)
    }

    #[test]
    fn builder_host_replaces_first_label() {
        assert_eq!(builder_host("drydock.example.com"), "drydock-builder.example.com");
        assert_eq!(builder_host("localhost"), "localhost-builder");
    }

    #[test]
    fn remote_url_uses_builder_port() {
        assert_eq!(
            remote_url_for("drydock.example.com", "foo"),
            "ssh://git@drydock-builder.example.com:2222/foo.git"
        );
    }

    #[test]
    fn open_outside_repo_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Git::open(dir.path()),
            Err(GitError::NotARepo { .. })
        ));
    }

    #[test]
    fn create_then_detect_app() {
        let (dir, git) = init_repo();
        let outcome = git
            .create_remote("drydock.example.com", DEFAULT_REMOTE, "foo", false)
            .unwrap();
        assert_eq!(outcome, RemoteOutcome::Created);
        let cwd = dir.path();
        assert_eq!(git.detect_app_name("drydock.example.com", cwd).unwrap(), "foo");
    }

    #[test]
    fn existing_remote_needs_force() {
        let (_dir, git) = init_repo();
        git.create_remote("drydock.example.com", "drydock", "foo", false)
            .unwrap();

        let err = git
            .create_remote("drydock.example.com", "drydock", "bar", false)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("drydock git:remote --force --remote drydock --app bar"));

        let outcome = git
            .create_remote("drydock.example.com", "drydock", "bar", true)
            .unwrap();
        assert_eq!(outcome, RemoteOutcome::Replaced);
        assert_eq!(
            git.remote_url("drydock").unwrap().unwrap(),
            remote_url_for("drydock.example.com", "bar")
        );
    }

    #[test]
    fn same_url_is_unchanged() {
        let (_dir, git) = init_repo();
        git.create_remote("c.example.com", "drydock", "foo", false)
            .unwrap();
        assert_eq!(
            git.create_remote("c.example.com", "drydock", "foo", false)
                .unwrap(),
            RemoteOutcome::Unchanged
        );
    }

    #[test]
    fn remove_deletes_all_matching_remotes() {
        let (_dir, git) = init_repo();
        git.create_remote("c.example.com", "drydock", "foo", false)
            .unwrap();
        git.create_remote("c.example.com", "other", "foo", false)
            .unwrap();
        git.create_remote("c.example.com", "keep", "bar", false)
            .unwrap();

        let mut removed = git.remove_app_remotes("c.example.com", "foo").unwrap();
        removed.sort();
        assert_eq!(removed, vec!["drydock", "other"]);
        assert!(git.remote_url("keep").unwrap().is_some());
    }

    #[test]
    fn detect_falls_back_to_directory_name() {
        let parent = TempDir::new().unwrap();
        let path = parent.path().join("MyApp");
        std::fs::create_dir(&path).unwrap();
        git2::Repository::init(&path).unwrap();

        let git = Git::open(&path).unwrap();
        assert_eq!(git.detect_app_name("c.example.com", &path).unwrap(), "myapp");
    }

    #[test]
    fn detect_from_subdirectory_uses_that_directory() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("MyRepo");
        let sub = root.join("Sub");
        std::fs::create_dir_all(&sub).unwrap();
        git2::Repository::init(&root).unwrap();

        let git = Git::open(&sub).unwrap();
        assert_eq!(git.detect_app_name("c.example.com", &sub).unwrap(), "sub");
    }

    #[test]
    fn remote_wins_over_subdirectory_name() {
        let (dir, git) = init_repo();
        git.create_remote("c.example.com", "drydock", "foo", false)
            .unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        assert_eq!(git.detect_app_name("c.example.com", &sub).unwrap(), "foo");
    }
}
