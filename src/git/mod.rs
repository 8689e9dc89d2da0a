//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`. drydock reads and writes remotes and nothing else; history,
//! refs and the work tree are never touched.
//!
//! # Responsibilities
//!
//! - Repository discovery
//! - Deriving the builder remote URL for an app
//! - Creating and removing app remotes
//! - Detecting the app bound to the current repository
//!
//! # Example
//!
//! ```ignore
//! use drydock::git::{Git, DEFAULT_REMOTE};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! git.create_remote("drydock.example.com", DEFAULT_REMOTE, "foo", false)?;
//! ```

mod interface;

pub use interface::{
    app_name_from_dir, builder_host, remote_url_for, Git, GitError, Remote, RemoteOutcome,
    BUILDER_PORT, DEFAULT_REMOTE,
};
