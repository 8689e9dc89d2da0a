//! cli::commands::tags
//!
//! Scheduler tags that pin an app's containers to matching nodes.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{TagsList, TagsSet, TagsUnset};
use crate::controller::types::{stringify, ConfigUpdate};
use crate::core::kv::{parse_tags, unset_keys, KeyValueSet};
use crate::ui::output::pretty_tabs;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<TagsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    print_list(console, &session, &app).await
}

async fn print_list(console: &mut Console, session: &Session, app: &str) -> Result<()> {
    let config = session
        .call(console, session.client.get_config(app))
        .await?;
    write!(
        console.out(),
        "=== {} Tags\n{}",
        app,
        pretty_tabs(&stringify(&config.tags), 5)
    )?;
    Ok(())
}

pub async fn set(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<TagsSet>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let tags = parse_tags(&args.tags)?;
    apply(console, &session, &app, tags).await
}

pub async fn unset(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<TagsUnset>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    apply(console, &session, &app, unset_keys(&args.keys)).await
}

async fn apply(console: &mut Console, session: &Session, app: &str, tags: KeyValueSet) -> Result<()> {
    let update = ConfigUpdate {
        tags: Some(tags),
        ..Default::default()
    };

    write!(console.out(), "Applying tags... ")?;
    session
        .call_with_progress(console, session.client.set_config(app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, session, app).await
}
