//! cli::commands::config_cmd
//!
//! Environment variables for an application.
//!
//! # Merge
//!
//! `config:set` sends only the new entries and `config:unset` sends nulls;
//! the controller merges them into the stored config and the merged result
//! is listed afterwards. `config:pull` reconciles the remote values with a
//! local `.env` file, and `config:push` feeds a file through `config:set`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::{parse_args, Session};
use crate::cli::args::{ConfigList, ConfigPull, ConfigPush, ConfigSet, ConfigUnset};
use crate::controller::types::ConfigUpdate;
use crate::core::kv::{
    encode_ssh_key, format_assignments, legacy_healthcheck_keys, parse_assignments,
    parse_env_file, unset_keys, KeyValueSet,
};
use crate::ui::output::pretty_tabs;
use crate::ui::{prompts, Console};

const ENV_FILE: &str = ".env";

const HEALTHCHECK_NOTICE: &str = "Hey there! We've noticed that you're using 'drydock config:set HEALTHCHECK_URL'
to set up healthchecks. This functionality has been deprecated. In the future, please use
'drydock healthchecks' to set up application health checks. Thanks!";

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ConfigList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    print_list(console, &session, &app, args.oneline).await
}

async fn print_list(console: &mut Console, session: &Session, app: &str, oneline: bool) -> Result<()> {
    let config = session
        .call(console, session.client.get_config(app))
        .await?;
    let values = config.value_strings();

    if oneline {
        write!(console.out(), "{}", format_oneline(&values))?;
    } else {
        write!(console.out(), "=== {} Config\n{}", app, pretty_tabs(&values, 6))?;
    }
    Ok(())
}

pub async fn set(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ConfigSet>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let values = parse_assignments(&args.assignments)?;
    apply_values(console, &session, &app, values).await
}

/// Send new values to the controller and list the merged config.
async fn apply_values(
    console: &mut Console,
    session: &Session,
    app: &str,
    mut values: KeyValueSet,
) -> Result<()> {
    encode_ssh_key(&mut values)?;

    for _ in 0..legacy_healthcheck_keys(&values) {
        writeln!(console.out(), "{}", HEALTHCHECK_NOTICE)?;
    }

    let update = ConfigUpdate {
        values: Some(values),
        ..Default::default()
    };

    write!(console.out(), "Creating config... ")?;
    session
        .call_with_progress(console, session.client.set_config(app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, session, app, false).await
}

pub async fn unset(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ConfigUnset>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let update = ConfigUpdate {
        values: Some(unset_keys(&args.keys)),
        ..Default::default()
    };

    write!(console.out(), "Removing config... ")?;
    session
        .call_with_progress(console, session.client.set_config(&app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, &session, &app, false).await
}

pub async fn pull(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ConfigPull>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let config = session
        .call(console, session.client.get_config(&app))
        .await?;
    let remote = config.value_strings();

    if !console.stdout_is_tty() {
        write!(console.out(), "{}", format_assignments(&remote))?;
        return Ok(());
    }

    let path = Path::new(ENV_FILE);
    if path.exists() && !args.overwrite && !args.interactive {
        bail!("{} already exists, pass -o to overwrite", ENV_FILE);
    }

    let merged = if args.interactive {
        let local = read_env_file(path)?;
        reconcile(&remote, local, |key, local, remote| {
            let question = format!("{}: overwrite {} with {}? (y/N) ", key, local, remote);
            Ok(prompts::confirm(console, &question)?)
        })?
    } else {
        remote
    };

    std::fs::write(path, format_assignments(&merged))
        .with_context(|| format!("failed to write {}", ENV_FILE))?;
    tracing::debug!(app = %app, keys = merged.len(), "wrote {}", ENV_FILE);
    Ok(())
}

pub async fn push(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ConfigPush>(console, argv)? else {
        return Ok(());
    };

    let contents = if console.stdin_is_tty() {
        std::fs::read_to_string(&args.path)
            .with_context(|| format!("failed to read {}", args.path))?
    } else {
        console.read_to_string()?
    };
    let values = parse_env_file(&contents)?;

    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    apply_values(console, &session, &app, values).await
}

/// `K=V` pairs on one line, sorted by key. Nothing at all when empty.
fn format_oneline(values: &BTreeMap<String, String>) -> String {
    if values.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = values
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{}\n", pairs.join(" "))
}

fn read_env_file(path: &Path) -> Result<KeyValueSet> {
    if !path.exists() {
        return Ok(KeyValueSet::new());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_env_file(&contents)?)
}

/// Merge remote values into local ones.
///
/// Keys missing locally are added. A key whose local value differs is
/// replaced only when `overwrite` agrees. Local-only keys are kept.
fn reconcile<F>(
    remote: &BTreeMap<String, String>,
    local: KeyValueSet,
    mut overwrite: F,
) -> Result<BTreeMap<String, String>>
where
    F: FnMut(&str, &str, &str) -> Result<bool>,
{
    let mut merged: BTreeMap<String, String> = local
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect();

    for (key, value) in remote {
        let replace = match merged.get(key) {
            None => true,
            Some(existing) if existing != value => overwrite(key, existing, value)?,
            Some(_) => false,
        };
        if replace {
            merged.insert(key.clone(), value.clone());
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn oneline_is_space_separated() {
        let values = map(&[("TRUE", "false"), ("NCC", "1701"), ("FLOAT", "12.34")]);
        assert_eq!(format_oneline(&values), "FLOAT=12.34 NCC=1701 TRUE=false\n");
    }

    #[test]
    fn oneline_of_empty_config_is_empty() {
        assert_eq!(format_oneline(&BTreeMap::new()), "");
    }

    #[test]
    fn reconcile_adds_missing_and_asks_on_conflict() {
        let remote = map(&[("A", "1"), ("B", "remote"), ("C", "same")]);
        let local = parse_env_file("B=local\nC=same\nD=mine\n").unwrap();

        let mut asked = Vec::new();
        let merged = reconcile(&remote, local, |key, local, remote| {
            asked.push(format!("{}:{}->{}", key, local, remote));
            Ok(false)
        })
        .unwrap();

        assert_eq!(asked, vec!["B:local->remote".to_string()]);
        assert_eq!(
            merged,
            map(&[("A", "1"), ("B", "local"), ("C", "same"), ("D", "mine")])
        );
    }

    #[test]
    fn reconcile_overwrites_when_accepted() {
        let remote = map(&[("B", "remote")]);
        let local = parse_env_file("B=local\n").unwrap();
        let merged = reconcile(&remote, local, |_, _, _| Ok(true)).unwrap();
        assert_eq!(merged, map(&[("B", "remote")]));
    }

    #[test]
    fn missing_env_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_env_file(&dir.path().join(ENV_FILE)).unwrap().is_empty());
    }
}
