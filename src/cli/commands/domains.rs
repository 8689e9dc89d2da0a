//! cli::commands::domains
//!
//! Binding domain names to an app.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{DomainsAdd, DomainsList, DomainsRemove};
use crate::ui::output::list_header;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<DomainsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    print_list(console, &session, &app, session.limit(&args.limit)).await
}

/// Fetch and print the domain list; shared with `apps:info`.
pub(super) async fn print_list(
    console: &mut Console,
    session: &Session,
    app: &str,
    limit: usize,
) -> Result<()> {
    let domains = session
        .call(console, session.client.list_domains(app, limit))
        .await?;

    let out = console.out();
    write!(
        out,
        "{}",
        list_header(&format!("{} Domains", app), domains.items.len(), domains.total)
    )?;
    for domain in &domains.items {
        writeln!(out, "{}", domain.domain)?;
    }
    Ok(())
}

pub async fn add(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<DomainsAdd>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    write!(console.out(), "Adding {} to {}... ", args.domain, app)?;
    session
        .call_with_progress(console, session.client.add_domain(&app, &args.domain))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn remove(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<DomainsRemove>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    write!(console.out(), "Removing {} from {}... ", args.domain, app)?;
    session
        .call_with_progress(console, session.client.remove_domain(&app, &args.domain))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}
