//! cli::commands::builds
//!
//! Build history and image imports.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{parse_args, Session};
use crate::cli::args::{BuildsCreate, BuildsList};
use crate::controller::types::CreateBuild;
use crate::core::types::parse_procfile;
use crate::ui::output::list_header;
use crate::ui::Console;

const PROCFILE: &str = "Procfile";

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<BuildsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let builds = session
        .call(console, session.client.list_builds(&app, session.limit(&args.limit)))
        .await?;

    let out = console.out();
    write!(
        out,
        "{}",
        list_header(&format!("{} Builds", app), builds.items.len(), builds.total)
    )?;
    for build in &builds.items {
        writeln!(out, "{} {}", build.uuid, build.created)?;
    }
    Ok(())
}

pub async fn create(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<BuildsCreate>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let procfile = load_procfile(args.procfile.as_deref(), Path::new(PROCFILE))?;

    let build = CreateBuild {
        image: args.image,
        procfile,
    };

    write!(console.out(), "Creating build... ")?;
    session
        .call_with_progress(console, session.client.create_build(&app, &build))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

/// Process types from `--procfile`, else from a Procfile at `fallback`.
fn load_procfile(inline: Option<&str>, fallback: &Path) -> Result<BTreeMap<String, String>> {
    if let Some(inline) = inline {
        return Ok(parse_procfile(inline)?);
    }

    if !fallback.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = std::fs::read_to_string(fallback)
        .with_context(|| format!("failed to read {}", fallback.display()))?;
    parse_procfile(&contents).with_context(|| format!("invalid {}", fallback.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_procfile_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROCFILE);
        std::fs::write(&path, "web: ./server\n").unwrap();

        let procfile = load_procfile(Some("worker: ./queue"), &path).unwrap();
        assert_eq!(procfile.get("worker").map(String::as_str), Some("./queue"));
        assert!(!procfile.contains_key("web"));
    }

    #[test]
    fn local_procfile_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROCFILE);
        std::fs::write(&path, "web: ./server\n").unwrap();

        let procfile = load_procfile(None, &path).unwrap();
        assert_eq!(procfile.get("web").map(String::as_str), Some("./server"));
    }

    #[test]
    fn missing_procfile_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_procfile(None, &dir.path().join(PROCFILE))
            .unwrap()
            .is_empty());
    }
}
