//! cli::commands::git_cmd
//!
//! Binding the current repository to an app through git remotes.

use std::io::Write;

use anyhow::{bail, Context as _, Result};

use super::{parse_args, Session};
use crate::cli::args::{GitRemote, GitRemove};
use crate::git::{Git, RemoteOutcome};
use crate::ui::Console;

pub async fn remote(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<GitRemote>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let git = open_cwd()?;
    let outcome = git.create_remote(session.client.host(), &args.remote, &app, args.force)?;

    let message = match outcome {
        RemoteOutcome::Unchanged => format!(
            "Remote {} already exists and is correctly configured for app {}.",
            args.remote, app
        ),
        RemoteOutcome::Created | RemoteOutcome::Replaced => format!(
            "Git remote {} successfully created for app {}.",
            args.remote, app
        ),
    };
    writeln!(console.out(), "{}", message)?;
    Ok(())
}

pub async fn remove(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<GitRemove>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    remove_remotes(console, &session, &app)
}

/// Delete every remote bound to `app`; shared with `apps:destroy`.
pub(super) fn remove_remotes(console: &mut Console, session: &Session, app: &str) -> Result<()> {
    let git = open_cwd()?;
    let removed = git.remove_app_remotes(session.client.host(), app)?;
    if removed.is_empty() {
        bail!("No remotes for app {} found.", app);
    }

    tracing::debug!(app, remotes = ?removed, "removed git remotes");
    writeln!(console.out(), "Git remotes for app {} removed.", app)?;
    Ok(())
}

fn open_cwd() -> Result<Git> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    Ok(Git::open(&cwd)?)
}
