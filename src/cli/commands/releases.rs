//! cli::commands::releases
//!
//! Release history and rollbacks.

use std::io::Write;

use anyhow::Result;

use super::{parse_args, Session};
use crate::cli::args::{ReleasesInfo, ReleasesList, ReleasesRollback};
use crate::controller::types::Release;
use crate::core::types::parse_version;
use crate::ui::output::{list_header, tab_align};
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ReleasesList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let releases = session
        .call(console, session.client.list_releases(&app, session.limit(&args.limit)))
        .await?;

    write!(
        console.out(),
        "{}{}",
        list_header(&format!("{} Releases", app), releases.items.len(), releases.total),
        format_releases(&releases.items)
    )?;
    Ok(())
}

pub async fn info(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ReleasesInfo>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let version = parse_version(&args.version)?;

    let release = session
        .call(console, session.client.get_release(&app, version))
        .await?;
    write!(console.out(), "{}", format_release(&app, version, &release))?;
    Ok(())
}

pub async fn rollback(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<ReleasesRollback>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let version = args.version.as_deref().map(parse_version).transpose()?;

    match version {
        Some(version) => write!(console.out(), "Rolling back to v{}... ", version)?,
        None => write!(console.out(), "Rolling back one release... ")?,
    }
    let new_version = session
        .call_with_progress(console, session.client.rollback(&app, version))
        .await?;
    writeln!(console.out(), "done, v{}", new_version)?;
    Ok(())
}

fn format_releases(releases: &[Release]) -> String {
    if releases.is_empty() {
        return String::new();
    }

    let rows: String = releases
        .iter()
        .map(|release| {
            format!(
                "v{}\t{}\t{}\n",
                release.version, release.created, release.summary
            )
        })
        .collect();
    tab_align(&rows)
}

fn format_release(app: &str, version: u32, release: &Release) -> String {
    let mut output = format!("=== {} Release v{}\n", app, version);
    if let Some(build) = release.build.as_deref().filter(|build| !build.is_empty()) {
        output.push_str(&format!("build:    {}\n", build));
    }
    output.push_str(&format!("config:   {}\n", release.config));
    output.push_str(&format!("owner:    {}\n", release.owner));
    output.push_str(&format!("created:  {}\n", release.created));
    output.push_str(&format!("summary:  {}\n", release.summary));
    output.push_str(&format!("updated:  {}\n", release.updated));
    output.push_str(&format!("uuid:     {}\n", release.uuid));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: u32, summary: &str, build: Option<&str>) -> Release {
        Release {
            version,
            app: "foo".into(),
            build: build.map(String::from),
            config: "95bd6dea-1685-4f78-a03d-fd7270b058d1".into(),
            owner: "jkirk".into(),
            summary: summary.into(),
            created: "2014-01-01T00:00:00UTC".into(),
            updated: "2014-01-01T00:00:00UTC".into(),
            uuid: "de1bf5b5-4a72-4f94-a10c-d2a3741cdf75".into(),
        }
    }

    #[test]
    fn releases_are_tab_aligned() {
        let rows = format_releases(&[
            release(2, "jkirk deployed foo", None),
            release(1, "jkirk created initial release", None),
        ]);
        assert_eq!(
            rows,
            "v2\t2014-01-01T00:00:00UTC\tjkirk deployed foo\n\
             v1\t2014-01-01T00:00:00UTC\tjkirk created initial release\n"
        );
    }

    #[test]
    fn release_info_omits_a_missing_build() {
        let text = format_release("foo", 1, &release(1, "initial", None));
        assert!(text.starts_with("=== foo Release v1\nconfig:   95bd6dea"));
        assert!(text.ends_with("uuid:     de1bf5b5-4a72-4f94-a10c-d2a3741cdf75\n"));

        let text = format_release("foo", 2, &release(2, "deploy", Some("abc")));
        assert!(text.contains("=== foo Release v2\nbuild:    abc\nconfig:"));
    }
}
