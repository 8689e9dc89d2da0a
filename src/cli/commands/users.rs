//! cli::commands::users

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::UsersList;
use crate::ui::output::list_header;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<UsersList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let users = session
        .call(console, session.client.list_users(session.limit(&args.limit)))
        .await?;

    let out = console.out();
    write!(out, "{}", list_header("Users", users.items.len(), users.total))?;
    for user in &users.items {
        writeln!(out, "{}", user.username)?;
    }
    Ok(())
}
