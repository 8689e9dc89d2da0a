//! cli::commands::ps
//!
//! Listing, scaling and restarting an app's processes.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Result};
use rand::seq::IndexedRandom;

use super::{parse_args, Session};
use crate::cli::args::{PsList, PsRestart, PsScale};
use crate::controller::types::Pod;
use crate::core::types::{parse_scale_targets, ProcessTarget};
use crate::ui::Console;

const DRINKS: [&str; 5] = ["coffee", "tea", "a glass of water", "a lemonade", "an espresso"];

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    print_list(console, &session, &app, session.limit(&args.limit)).await
}

/// Fetch and print the process list; shared with `apps:info`.
pub(super) async fn print_list(
    console: &mut Console,
    session: &Session,
    app: &str,
    limit: usize,
) -> Result<()> {
    let pods = session
        .call(console, session.client.list_pods(app, limit))
        .await?;
    write!(console.out(), "{}", format_processes(app, &pods.items))?;
    Ok(())
}

pub async fn scale(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PsScale>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let targets = parse_scale_targets(&args.targets)?;

    writeln!(console.out(), "Scaling processes... but first, {}!", drink_of_choice())?;
    let started = Instant::now();
    session
        .call_with_progress(console, session.client.scale(&app, &targets))
        .await?;
    writeln!(console.out(), "done in {}s", started.elapsed().as_secs())?;

    print_list(console, &session, &app, session.profile.limit()).await
}

pub async fn restart(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<PsRestart>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;
    let target = args
        .target
        .as_deref()
        .map(|target| ProcessTarget::parse(target, &app));
    let process_type = target.as_ref().map(|t| t.process_type.as_str());
    let name = target.as_ref().and_then(|t| t.name.as_deref());

    writeln!(console.out(), "Restarting processes... but first, {}!", drink_of_choice())?;
    let started = Instant::now();
    let result = session
        .call_with_progress(console, session.client.restart(&app, process_type, name))
        .await;

    let pods = match result {
        Ok(pods) => pods,
        Err(err) if err.is_not_found() => bail!(
            "Could not find process type {} in app {}",
            process_type.unwrap_or_default(),
            app
        ),
        Err(err) => return Err(err.into()),
    };

    if pods.is_empty() {
        writeln!(console.out(), "Could not find any processes to restart")?;
    } else {
        writeln!(console.out(), "done in {}s", started.elapsed().as_secs())?;
        write!(console.out(), "{}", format_processes(&app, &pods))?;
    }
    Ok(())
}

/// `=== <app> Processes`, then each type's pods under `--- <type>:`.
pub(super) fn format_processes(app: &str, pods: &[Pod]) -> String {
    let mut by_type: BTreeMap<&str, Vec<&Pod>> = BTreeMap::new();
    for pod in pods {
        by_type.entry(pod.process_type.as_str()).or_default().push(pod);
    }

    let mut output = format!("=== {} Processes\n", app);
    for (process_type, pods) in by_type {
        output.push_str(&format!("--- {}:\n", process_type));
        for pod in pods {
            output.push_str(&format!("{} {} ({})\n", pod.name, pod.state, pod.release));
        }
    }
    output
}

fn drink_of_choice() -> &'static str {
    DRINKS.choose(&mut rand::rng()).copied().unwrap_or("coffee")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pod(process_type: &str, name: &str) -> Pod {
        Pod {
            release: "v2".into(),
            process_type: process_type.into(),
            name: name.into(),
            state: "up".into(),
            started: String::new(),
        }
    }

    #[test]
    fn processes_are_grouped_by_sorted_type() {
        let pods = vec![
            pod("worker", "foo-worker-1"),
            pod("web", "foo-web-1"),
            pod("web", "foo-web-2"),
        ];
        assert_eq!(
            format_processes("foo", &pods),
            "=== foo Processes\n\
             --- web:\n\
             foo-web-1 up (v2)\n\
             foo-web-2 up (v2)\n\
             --- worker:\n\
             foo-worker-1 up (v2)\n"
        );
    }

    #[test]
    fn empty_process_list_has_only_the_header() {
        assert_eq!(format_processes("foo", &[]), "=== foo Processes\n");
    }

    #[test]
    fn drink_comes_from_the_list() {
        assert!(DRINKS.contains(&drink_of_choice()));
    }
}
