//! cli::commands::perms
//!
//! App collaborators and system administrators. `--admin` switches every
//! verb from the app's collaborator list to the administrator list.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{PermsCreate, PermsDelete, PermsList};
use crate::ui::output::list_header;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PermsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let (header, users) = if args.admin {
        let admins = session
            .call(console, session.client.list_admins(session.limit(&args.limit)))
            .await?;
        let header = list_header("Administrators", admins.items.len(), admins.total);
        let users: Vec<String> = admins.items.into_iter().map(|admin| admin.username).collect();
        (header, users)
    } else {
        let app = session.app(&args.app)?;
        let users = session
            .call(console, session.client.list_app_perms(&app))
            .await?;
        (format!("=== {}'s Users\n", app), users)
    };

    let out = console.out();
    write!(out, "{}", header)?;
    for user in &users {
        writeln!(out, "{}", user)?;
    }
    Ok(())
}

pub async fn create(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PermsCreate>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    if args.admin {
        write!(console.out(), "Adding {} to system administrators... ", args.username)?;
        session
            .call_with_progress(console, session.client.add_admin(&args.username))
            .await?;
    } else {
        let app = session.app(&args.app)?;
        write!(console.out(), "Adding {} to {} collaborators... ", args.username, app)?;
        session
            .call_with_progress(console, session.client.add_app_perm(&app, &args.username))
            .await?;
    }

    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn delete(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PermsDelete>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    if args.admin {
        write!(
            console.out(),
            "Removing {} from system administrators... ",
            args.username
        )?;
        session
            .call_with_progress(console, session.client.remove_admin(&args.username))
            .await?;
    } else {
        let app = session.app(&args.app)?;
        write!(
            console.out(),
            "Removing {} from {} collaborators... ",
            args.username, app
        )?;
        session
            .call_with_progress(console, session.client.remove_app_perm(&app, &args.username))
            .await?;
    }

    writeln!(console.out(), "done")?;
    Ok(())
}
