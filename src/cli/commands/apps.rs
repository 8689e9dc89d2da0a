//! cli::commands::apps
//!
//! Application lifecycle: create, inspect, open, tail logs, run one-off
//! commands, destroy and transfer.
//!
//! # Git remotes
//!
//! `apps:create` binds the new app to the current repository through a git
//! remote unless `--no-remote` is given. `apps:destroy` without `--app`
//! removes the remotes of the app it detected.

use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Context as _, Result};

use super::{domains, parse_args, ps, Session};
use crate::cli::args::{
    AppsCreate, AppsDestroy, AppsInfo, AppsList, AppsLogs, AppsOpen, AppsRun, AppsTransfer,
};
use crate::cli::ExitStatus;
use crate::controller::types::ConfigUpdate;
use crate::core::kv::KeyValueSet;
use crate::git::Git;
use crate::ui::output::list_header;
use crate::ui::Console;

pub async fn create(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsCreate>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    write!(console.out(), "Creating Application... ")?;
    let app = session
        .call_with_progress(console, session.client.create_app(args.id.as_deref()))
        .await?;
    writeln!(console.out(), "done, created {}", app.id)?;

    if let Some(buildpack) = &args.buildpack {
        let mut values = KeyValueSet::new();
        values.insert("BUILDPACK_URL".to_string(), Some(buildpack.clone()));
        let update = ConfigUpdate {
            values: Some(values),
            ..Default::default()
        };
        session
            .call(console, session.client.set_config(&app.id, &update))
            .await?;
    }

    if args.no_remote {
        writeln!(
            console.out(),
            "If you want to add a git remote for this app later, use `drydock git:remote -a {}`",
            app.id
        )?;
        return Ok(());
    }

    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let git = Git::open(&cwd)?;
    git.create_remote(session.client.host(), &args.remote, &app.id, false)?;
    writeln!(
        console.out(),
        "Git remote {} successfully created for app {}.",
        args.remote,
        app.id
    )?;
    Ok(())
}

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let apps = session
        .call(console, session.client.list_apps(session.limit(&args.limit)))
        .await?;

    let out = console.out();
    write!(out, "{}", list_header("Apps", apps.items.len(), apps.total))?;
    for app in &apps.items {
        writeln!(out, "{}", app.id)?;
    }
    Ok(())
}

pub async fn info(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsInfo>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app_id = session.app(&args.app)?;

    let app = session
        .call(console, session.client.get_app(&app_id))
        .await?;
    let url = app_url(console, &session, &app_id)
        .await?
        .unwrap_or_else(|| no_domain_message(&app_id));

    {
        let out = console.out();
        writeln!(out, "=== {} Application", app.id)?;
        writeln!(out, "updated:  {}", app.updated)?;
        writeln!(out, "uuid:     {}", app.uuid)?;
        writeln!(out, "created:  {}", app.created)?;
        writeln!(out, "url:      {}", url)?;
        writeln!(out, "owner:    {}", app.owner)?;
        writeln!(out, "id:       {}", app.id)?;
        writeln!(out)?;
    }

    let limit = session.profile.limit();
    ps::print_list(console, &session, &app.id, limit).await?;
    writeln!(console.out())?;
    domains::print_list(console, &session, &app.id, limit).await?;
    writeln!(console.out())?;
    Ok(())
}

pub async fn open(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsOpen>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let Some(url) = app_url(console, &session, &app).await? else {
        bail!(no_domain_message(&app));
    };

    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{}", url)
    };

    open::that(&url).with_context(|| format!("failed to open {} in a browser", url))?;
    Ok(())
}

pub async fn logs(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsLogs>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let logs = session
        .call(console, session.client.app_logs(&app, args.lines.unwrap_or(0)))
        .await?;

    let out = console.out();
    for line in logs.trim_end_matches('\n').lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub async fn run(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsRun>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let command = args.command.join(" ");

    writeln!(console.out(), "Running '{}'...", command)?;
    let result = session
        .call(console, session.client.run_command(&app, &command))
        .await?;

    if result.exit_code == 0 {
        write!(console.out(), "{}", result.output)?;
        return Ok(());
    }

    write!(console.err(), "{}", result.output)?;
    Err(ExitStatus(result.exit_code).into())
}

pub async fn destroy(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsDestroy>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let (app, detected) = match args.app.app.as_deref().filter(|app| !app.is_empty()) {
        Some(app) => (app.to_string(), false),
        None => (session.detect_app()?, true),
    };

    let confirm = match args.confirm.filter(|confirm| !confirm.is_empty()) {
        Some(confirm) => confirm,
        None => {
            write!(
                console.out(),
                " !    WARNING: Potentially Destructive Action\n \
                 !    This command will destroy the application: {app}\n \
                 !    To proceed, type \"{app}\" or re-run this command with --confirm={app}\n\n> ",
                app = app
            )?;
            console.out().flush()?;
            console.read_line()?.trim().to_string()
        }
    };

    if confirm != app {
        bail!("App {} does not match confirm {}, aborting.", app, confirm);
    }

    let started = Instant::now();
    writeln!(console.out(), "Destroying {}...", app)?;
    session
        .call_with_progress(console, session.client.delete_app(&app))
        .await?;
    writeln!(console.out(), "done in {}s", started.elapsed().as_secs())?;

    if detected {
        super::git_cmd::remove_remotes(console, &session, &app)?;
    }
    Ok(())
}

pub async fn transfer(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<AppsTransfer>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    write!(console.out(), "Transferring {} to {}... ", app, args.username)?;
    session
        .call_with_progress(console, session.client.transfer_app(&app, &args.username))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

fn no_domain_message(app: &str) -> String {
    format!("No domain assigned to {}", app)
}

/// The app's first domain, expanded against the controller host.
async fn app_url(console: &mut Console, session: &Session, app: &str) -> Result<Option<String>> {
    let domains = session
        .call(console, session.client.list_domains(app, 1))
        .await?;
    Ok(domains
        .items
        .first()
        .map(|domain| expand_url(session.client.host(), &domain.domain)))
}

/// A bare subdomain replaces the first label of the controller host.
fn expand_url(host: &str, domain: &str) -> String {
    if domain.contains('.') {
        return domain.to_string();
    }

    match host.split_once('.') {
        Some((_, rest)) => format!("{}.{}", domain, rest),
        None => domain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_domains_are_kept() {
        assert_eq!(expand_url("drydock.example.com", "foo.com"), "foo.com");
    }

    #[test]
    fn subdomains_take_the_controller_suffix() {
        assert_eq!(
            expand_url("drydock.example.com", "foo"),
            "foo.example.com"
        );
        assert_eq!(expand_url("localhost", "foo"), "foo");
    }
}
