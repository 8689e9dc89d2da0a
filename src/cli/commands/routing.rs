//! cli::commands::routing
//!
//! Whether the router exposes an app.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{RoutingDisable, RoutingEnable, RoutingInfo};
use crate::controller::types::ConfigUpdate;
use crate::ui::Console;

pub async fn info(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RoutingInfo>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    print_info(console, &session, &app).await
}

async fn print_info(console: &mut Console, session: &Session, app: &str) -> Result<()> {
    let config = session
        .call(console, session.client.get_config(app))
        .await?;
    let state = if config.routable.unwrap_or(false) {
        "enabled"
    } else {
        "disabled"
    };
    writeln!(console.out(), "Routing is {}.", state)?;
    Ok(())
}

pub async fn enable(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RoutingEnable>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    write!(console.out(), "Enabling routing for {}... ", app)?;
    set_routable(console, &session, &app, true).await
}

pub async fn disable(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RoutingDisable>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    write!(console.out(), "Disabling routing for {}... ", app)?;
    set_routable(console, &session, &app, false).await
}

async fn set_routable(console: &mut Console, session: &Session, app: &str, routable: bool) -> Result<()> {
    let update = ConfigUpdate {
        routable: Some(routable),
        ..Default::default()
    };
    session
        .call_with_progress(console, session.client.set_config(app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_info(console, session, app).await
}
