//! cli
//!
//! Command-line interface layer for drydock.
//!
//! # Responsibilities
//!
//! - Route the argument vector to a built-in domain, top-level help, or a
//!   `drydock-<domain>` plugin
//! - Parse each verb's options and delegate to its handler
//! - Turn handler errors into exit codes
//!
//! # Exit Codes
//!
//! - `0`: success, help, or a known domain with an unknown verb (usage printed)
//! - `1`: no command, an unknown command with no plugin, bad options, or any
//!   error from a handler
//! - `apps:run` exits with the remote command's code
//!
//! # Architecture
//!
//! [`execute`] is the async entry point and never touches the real process
//! streams; everything goes through the [`Console`] it is given. [`run`]
//! wraps it in a tokio runtime for `main.rs`.

pub mod args;
pub mod commands;
pub mod plugin;
pub mod router;
pub mod shortcuts;
pub mod usage;

pub use router::{route, Route};

use std::io::Write;

use thiserror::Error;

use crate::ui::Console;

/// Ends a command with a specific exit code and no further output.
#[derive(Debug, Error)]
#[error("exit status {0}")]
pub struct ExitStatus(pub i32);

/// Bad command-line options. The text already carries its own usage hint.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Run the CLI application and return the process exit code.
///
/// This is the main entry point called from `main.rs`.
pub fn run(argv: Vec<String>, console: &mut Console) -> i32 {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = writeln!(console.err(), "Error: {}", err);
            return 1;
        }
    };
    runtime.block_on(execute(argv, console))
}

/// Route and run one command line.
pub async fn execute(argv: Vec<String>, console: &mut Console) -> i32 {
    let code = match route(&argv) {
        Route::Empty => {
            let _ = write!(console.err(), "{}", usage::SHORT_USAGE);
            1
        }
        Route::Invalid(flag) => {
            let _ = writeln!(console.err(), "{} is not a recognized command or option", flag);
            let _ = write!(console.err(), "{}", usage::SHORT_USAGE);
            1
        }
        Route::Help => {
            let _ = write!(console.out(), "{}", usage::USAGE);
            0
        }
        Route::Builtin { domain, argv } => {
            let result = commands::dispatch(domain, argv, console).await;
            report(console, result)
        }
        Route::Plugin { domain, argv } => run_plugin(console, &domain, &argv),
    };

    let _ = console.flush();
    code
}

fn run_plugin(console: &mut Console, domain: &str, argv: &[String]) -> i32 {
    let no_match = |console: &mut Console| {
        let _ = write!(console.err(), "{}{}", usage::NO_MATCH, usage::SHORT_USAGE);
        1
    };

    let Some(binary) = plugin::find(domain) else {
        return no_match(console);
    };

    let _ = console.flush();
    let err = plugin::exec(&binary, domain, &router::plugin_argv(domain, argv));
    tracing::debug!(error = %err, "plugin exec failed");
    no_match(console)
}

fn report(console: &mut Console, result: anyhow::Result<()>) -> i32 {
    let Err(err) = result else {
        return 0;
    };

    if let Some(ExitStatus(code)) = err.downcast_ref::<ExitStatus>() {
        return *code;
    }
    if let Some(UsageError(text)) = err.downcast_ref::<UsageError>() {
        let _ = write!(console.err(), "{}", text);
        return 1;
    }

    let _ = writeln!(console.err(), "Error: {:#}", err);
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn no_command_prints_short_usage() {
        let (mut console, capture) = Console::captured("");
        assert_eq!(execute(vec![], &mut console).await, 1);
        assert_eq!(capture.stderr(), "Usage: drydock <command> [<args>...]\n");
    }

    #[tokio::test]
    async fn help_prints_usage_to_stdout() {
        let (mut console, capture) = Console::captured("");
        assert_eq!(execute(argv(&["help"]), &mut console).await, 0);
        assert!(capture.stdout().contains("Usage: drydock <command> [<args>...]"));
        assert!(capture.stderr().is_empty());
    }

    #[tokio::test]
    async fn unknown_command_without_plugin_fails() {
        let (mut console, capture) = Console::captured("");
        let code = execute(argv(&["definitely-not-a-domain"]), &mut console).await;
        assert_eq!(code, 1);
        assert_eq!(
            capture.stderr(),
            "Found no matching command, try 'drydock help'\nUsage: drydock <command> [<args>...]\n"
        );
    }

    #[tokio::test]
    async fn unknown_verb_of_known_domain_succeeds() {
        let (mut console, capture) = Console::captured("");
        assert_eq!(execute(argv(&["apps:frobnicate"]), &mut console).await, 0);
        assert!(capture.stderr().starts_with("Found no matching command"));
    }

    #[tokio::test]
    async fn domain_help_lists_its_verbs() {
        let (mut console, capture) = Console::captured("");
        assert_eq!(execute(argv(&["help", "config"]), &mut console).await, 0);
        assert!(capture.stdout().contains("config:pull"));
    }

    #[tokio::test]
    async fn bad_options_exit_with_usage() {
        let (mut console, capture) = Console::captured("");
        let code = execute(argv(&["apps:list", "--bogus"]), &mut console).await;
        assert_eq!(code, 1);
        assert!(capture.stderr().contains("--bogus"));
        assert!(!capture.stderr().starts_with("Error: "));
    }

    #[test]
    fn exit_status_is_passed_through() {
        let (mut console, capture) = Console::captured("");
        let code = report(&mut console, Err(ExitStatus(3).into()));
        assert_eq!(code, 3);
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn errors_are_prefixed() {
        let (mut console, capture) = Console::captured("");
        let code = report(&mut console, Err(anyhow::anyhow!("boom")));
        assert_eq!(code, 1);
        assert_eq!(capture.stderr(), "Error: boom\n");
    }
}
