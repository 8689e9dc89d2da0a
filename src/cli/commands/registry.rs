//! cli::commands::registry
//!
//! Credentials for pulling an app's image from a private registry.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{RegistryList, RegistrySet, RegistryUnset};
use crate::controller::types::{stringify, ConfigUpdate};
use crate::core::kv::{parse_registry, unset_keys, KeyValueSet};
use crate::ui::output::pretty_tabs;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RegistryList>(console, argv)? else {
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
        "=== {} Registry\n{}",
        app,
        pretty_tabs(&stringify(&config.registry), 5)
    )?;
    Ok(())
}

pub async fn set(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RegistrySet>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let credentials = parse_registry(&args.pairs)?;
    apply(console, &session, &app, credentials).await
}

pub async fn unset(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RegistryUnset>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    apply(console, &session, &app, unset_keys(&args.keys)).await
}

async fn apply(
    console: &mut Console,
    session: &Session,
    app: &str,
    credentials: KeyValueSet,
) -> Result<()> {
    let update = ConfigUpdate {
        registry: Some(credentials),
        ..Default::default()
    };

    write!(console.out(), "Applying registry information... ")?;
    session
        .call_with_progress(console, session.client.set_config(app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, session, app).await
}
