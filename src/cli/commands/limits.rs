//! cli::commands::limits
//!
//! Per-process-type memory and CPU limits.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{LimitsList, LimitsSet, LimitsUnset};
use crate::controller::types::{stringify, Config, ConfigUpdate};
use crate::core::kv::{unset_keys, KeyValueSet};
use crate::core::types::{parse_limits, LimitKind};
use crate::ui::output::pretty_tabs;
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<LimitsList>(console, argv)? else {
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
    write!(console.out(), "{}", format_limits(app, &config))?;
    Ok(())
}

pub async fn set(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<LimitsSet>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let kind = args.kind.kind();
    let limits = parse_limits(&args.limits, kind)?;
    apply(console, &session, &app, kind, limits).await
}

pub async fn unset(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<LimitsUnset>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let kind = args.kind.kind();
    apply(console, &session, &app, kind, unset_keys(&args.types)).await
}

async fn apply(
    console: &mut Console,
    session: &Session,
    app: &str,
    kind: LimitKind,
    limits: KeyValueSet,
) -> Result<()> {
    let update = match kind {
        LimitKind::Memory => ConfigUpdate {
            memory: Some(limits),
            ..Default::default()
        },
        LimitKind::Cpu => ConfigUpdate {
            cpu: Some(limits),
            ..Default::default()
        },
    };

    write!(console.out(), "Applying limits... ")?;
    session
        .call_with_progress(console, session.client.set_config(app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, session, app).await
}

fn format_limits(app: &str, config: &Config) -> String {
    let section = |values: &BTreeMap<String, serde_json::Value>| {
        if values.is_empty() {
            "Unlimited\n".to_string()
        } else {
            pretty_tabs(&stringify(values), 5)
        }
    };

    format!(
        "=== {} Limits\n\n--- Memory\n{}\n--- CPU\n{}",
        app,
        section(&config.memory),
        section(&config.cpu)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sections_are_unlimited() {
        assert_eq!(
            format_limits("foo", &Config::default()),
            "=== foo Limits\n\n--- Memory\nUnlimited\n\n--- CPU\nUnlimited\n"
        );
    }

    #[test]
    fn limits_are_tabbed() {
        let mut config = Config::default();
        config.memory.insert("web".into(), json!("1G"));
        config.memory.insert("worker".into(), json!("512M"));
        config.cpu.insert("web".into(), json!("500m"));

        assert_eq!(
            format_limits("foo", &config),
            "=== foo Limits\n\n\
             --- Memory\n\
             web        1G\n\
             worker     512M\n\
             \n--- CPU\n\
             web     500m\n"
        );
    }
}
