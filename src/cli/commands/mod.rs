//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Parses its `domain:verb` options
//! 2. Loads the profile and resolves the app
//! 3. Calls the controller through a [`Session`]
//! 4. Formats the result onto the console
//!
//! Dispatch is one match on `(domain, verb)`. The bare-domain default, the
//! domain usage block and the unknown-verb fallback are shared by every
//! domain and driven by [`DomainSpec`].
//!
//! # API compatibility
//!
//! Every controller call goes through [`Session::call`], which prints the
//! version warning once per process before handing back the call's result.

mod apps;
mod auth;
mod builds;
mod certs;
mod config_cmd;
mod domains;
mod git_cmd;
mod healthchecks;
mod keys;
mod limits;
mod perms;
mod ps;
mod registry;
mod releases;
mod routing;
mod tags;
mod users;

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;
use clap::Parser;

use super::args::{AppOpt, Global, LimitOpt, ShortcutsList, Version};
use super::usage::{self, DomainSpec};
use super::{shortcuts, UsageError};
use crate::controller::{ApiError, ControllerClient, API_VERSION};
use crate::core::profile::Profile;
use crate::git::{app_name_from_dir, Git, GitError};
use crate::ui::progress::Spinner;
use crate::ui::Console;

/// Dispatch a routed argument vector within `spec`'s domain.
pub async fn dispatch(
    spec: &'static DomainSpec,
    mut argv: Vec<String>,
    console: &mut Console,
) -> Result<()> {
    let command = argv.first().cloned().unwrap_or_default();
    let verb = command.split_once(':').map(|(_, verb)| verb.to_string());

    if let Some(verb) = verb.as_deref().filter(|verb| spec.has_verb(verb)) {
        return run_verb(spec.name, verb, &argv, console).await;
    }

    if argv.get(1).is_some_and(|arg| arg == "--help" || arg == "-h") {
        write!(console.out(), "{}", spec.usage)?;
        return Ok(());
    }

    if verb.is_none() {
        match spec.default_verb {
            Some(default) => {
                argv[0] = format!("{}:{}", spec.name, default);
                return run_verb(spec.name, default, &argv, console).await;
            }
            None => {
                write!(console.out(), "{}", spec.usage)?;
                return Ok(());
            }
        }
    }

    write!(console.err(), "{}{}", usage::NO_MATCH, usage::SHORT_USAGE)?;
    Ok(())
}

async fn run_verb(domain: &str, verb: &str, argv: &[String], console: &mut Console) -> Result<()> {
    match (domain, verb) {
        ("apps", "create") => apps::create(console, argv).await,
        ("apps", "list") => apps::list(console, argv).await,
        ("apps", "info") => apps::info(console, argv).await,
        ("apps", "open") => apps::open(console, argv).await,
        ("apps", "logs") => apps::logs(console, argv).await,
        ("apps", "run") => apps::run(console, argv).await,
        ("apps", "destroy") => apps::destroy(console, argv).await,
        ("apps", "transfer") => apps::transfer(console, argv).await,

        ("auth", "register") => auth::register(console, argv).await,
        ("auth", "login") => auth::login(console, argv).await,
        ("auth", "logout") => auth::logout(console, argv).await,
        ("auth", "passwd") => auth::passwd(console, argv).await,
        ("auth", "whoami") => auth::whoami(console, argv).await,
        ("auth", "cancel") => auth::cancel(console, argv).await,
        ("auth", "regenerate") => auth::regenerate(console, argv).await,

        ("builds", "list") => builds::list(console, argv).await,
        ("builds", "create") => builds::create(console, argv).await,

        ("certs", "list") => certs::list(console, argv).await,
        ("certs", "add") => certs::add(console, argv).await,
        ("certs", "remove") => certs::remove(console, argv).await,
        ("certs", "info") => certs::info(console, argv).await,
        ("certs", "attach") => certs::attach(console, argv).await,
        ("certs", "detach") => certs::detach(console, argv).await,

        ("config", "list") => config_cmd::list(console, argv).await,
        ("config", "set") => config_cmd::set(console, argv).await,
        ("config", "unset") => config_cmd::unset(console, argv).await,
        ("config", "pull") => config_cmd::pull(console, argv).await,
        ("config", "push") => config_cmd::push(console, argv).await,

        ("domains", "list") => domains::list(console, argv).await,
        ("domains", "add") => domains::add(console, argv).await,
        ("domains", "remove") => domains::remove(console, argv).await,

        ("git", "remote") => git_cmd::remote(console, argv).await,
        ("git", "remove") => git_cmd::remove(console, argv).await,

        ("healthchecks", "list") => healthchecks::list(console, argv).await,
        ("healthchecks", "set") => healthchecks::set(console, argv).await,
        ("healthchecks", "unset") => healthchecks::unset(console, argv).await,

        ("keys", "list") => keys::list(console, argv).await,
        ("keys", "add") => keys::add(console, argv).await,
        ("keys", "remove") => keys::remove(console, argv).await,

        ("limits", "list") => limits::list(console, argv).await,
        ("limits", "set") => limits::set(console, argv).await,
        ("limits", "unset") => limits::unset(console, argv).await,

        ("perms", "list") => perms::list(console, argv).await,
        ("perms", "create") => perms::create(console, argv).await,
        ("perms", "delete") => perms::delete(console, argv).await,

        ("ps", "list") => ps::list(console, argv).await,
        ("ps", "restart") => ps::restart(console, argv).await,
        ("ps", "scale") => ps::scale(console, argv).await,

        ("registry", "list") => registry::list(console, argv).await,
        ("registry", "set") => registry::set(console, argv).await,
        ("registry", "unset") => registry::unset(console, argv).await,

        ("releases", "list") => releases::list(console, argv).await,
        ("releases", "info") => releases::info(console, argv).await,
        ("releases", "rollback") => releases::rollback(console, argv).await,

        ("routing", "info") => routing::info(console, argv).await,
        ("routing", "enable") => routing::enable(console, argv).await,
        ("routing", "disable") => routing::disable(console, argv).await,

        ("shortcuts", "list") => shortcuts_list(console, argv),

        ("tags", "list") => tags::list(console, argv).await,
        ("tags", "set") => tags::set(console, argv).await,
        ("tags", "unset") => tags::unset(console, argv).await,

        ("users", "list") => users::list(console, argv).await,

        ("version", _) => version(console, argv),

        (domain, verb) => anyhow::bail!("no handler for {}:{}", domain, verb),
    }
}

/// Parse a verb's options. `None` means help was printed and the command is done.
pub(crate) fn parse_args<T: Parser>(console: &mut Console, argv: &[String]) -> Result<Option<T>> {
    match T::try_parse_from(argv) {
        Ok(args) => Ok(Some(args)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(console.out(), "{}", err.render())?;
            Ok(None)
        }
        Err(err) => Err(UsageError(err.render().to_string()).into()),
    }
}

fn shortcuts_list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(_) = parse_args::<ShortcutsList>(console, argv)? else {
        return Ok(());
    };
    writeln!(console.out(), "{}", shortcuts::listing())?;
    Ok(())
}

fn version(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(_) = parse_args::<Version>(console, argv)? else {
        return Ok(());
    };
    writeln!(console.out(), "{}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

/// The text printed when the controller speaks another major API version.
pub(crate) fn version_warning(server: &str) -> String {
    format!(
        "!    WARNING: Client and server API versions do not match. Please consider upgrading.\n\
         !    Client version: {}\n\
         !    Server version: {}\n",
        API_VERSION, server
    )
}

/// A loaded profile and the client built from it.
#[derive(Debug)]
pub(crate) struct Session {
    pub profile: Profile,
    pub path: PathBuf,
    pub client: ControllerClient,
}

impl Session {
    /// Load the profile selected by `-c/--config`.
    pub fn load(global: &Global) -> Result<Self> {
        let (profile, path) = Profile::load(global.config())?;
        let client = profile
            .client()
            .with_context(|| format!("invalid controller in {}", path.display()))?;
        Ok(Self {
            profile,
            path,
            client,
        })
    }

    /// A fresh, unauthenticated session against `controller`, for
    /// registering and logging in before any profile exists.
    pub fn connect(global: &Global, controller: &str, ssl_verify: bool) -> Result<Self> {
        let path = crate::core::profile::locate(global.config())?;
        let client = ControllerClient::new(controller, None, ssl_verify)?;
        let profile = Profile::new(client.controller_display(), ssl_verify);
        Ok(Self {
            profile,
            path,
            client,
        })
    }

    /// Page size: `-l/--limit` when given, else the profile's.
    pub fn limit(&self, opt: &LimitOpt) -> usize {
        opt.limit.unwrap_or_else(|| self.profile.limit())
    }

    /// The app from `-a/--app`, else the one bound to the current directory.
    pub fn app(&self, opt: &AppOpt) -> Result<String> {
        match opt.app.as_deref().filter(|app| !app.is_empty()) {
            Some(app) => Ok(app.to_string()),
            None => self.detect_app(),
        }
    }

    /// The app bound to the current directory through git, or named after it.
    pub fn detect_app(&self) -> Result<String> {
        let cwd = std::env::current_dir().context("failed to read the current directory")?;
        match Git::open(&cwd) {
            Ok(git) => Ok(git.detect_app_name(self.client.host(), &cwd)?),
            Err(GitError::NotARepo { .. }) => {
                app_name_from_dir(&cwd).ok_or_else(|| GitError::NoAppName.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Await a controller call, then warn once if the API versions disagree.
    pub async fn call<T>(
        &self,
        console: &mut Console,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let result = call.await;
        self.check_api_compatibility(console);
        result
    }

    /// Like [`call`](Self::call), with a spinner while the call is in flight.
    pub async fn call_with_progress<T>(
        &self,
        console: &mut Console,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let _ = console.out().flush();
        let spinner = Spinner::start(console.stdout_is_tty());
        let result = call.await;
        spinner.stop().await;
        self.check_api_compatibility(console);
        result
    }

    fn check_api_compatibility(&self, console: &mut Console) {
        if let Some(server) = self.client.take_version_warning() {
            let _ = write!(console.err(), "{}", version_warning(&server));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_names_both_versions() {
        let warning = version_warning("1.0");
        assert!(warning.starts_with("!    WARNING: Client and server API versions do not match."));
        assert!(warning.contains("!    Client version: 2.3\n"));
        assert!(warning.ends_with("!    Server version: 1.0\n"));
    }

    #[test]
    fn help_is_printed_not_failed() {
        let (mut console, capture) = Console::captured("");
        let argv = vec!["version".to_string(), "--help".to_string()];
        let parsed = parse_args::<Version>(&mut console, &argv).unwrap();
        assert!(parsed.is_none());
        assert!(capture.stdout().contains("drydock version"));
    }

    #[test]
    fn bad_options_are_usage_errors() {
        let (mut console, _) = Console::captured("");
        let argv = vec!["version".to_string(), "--bogus".to_string()];
        let err = parse_args::<Version>(&mut console, &argv).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
    }

    #[tokio::test]
    async fn bare_auth_prints_its_usage() {
        let (mut console, capture) = Console::captured("");
        let spec = usage::domain("auth").unwrap();
        dispatch(spec, vec!["auth".to_string()], &mut console)
            .await
            .unwrap();
        assert!(capture.stdout().contains("Valid commands for auth:"));
    }

    #[tokio::test]
    async fn shortcuts_list_ends_with_a_blank_line() {
        let (mut console, capture) = Console::captured("");
        let spec = usage::domain("shortcuts").unwrap();
        dispatch(spec, vec!["shortcuts".to_string()], &mut console)
            .await
            .unwrap();
        assert!(capture.stdout().starts_with("create -> apps:create\n"));
        assert!(capture.stdout().ends_with("whoami -> auth:whoami\n\n"));
    }

    #[tokio::test]
    async fn version_prints_the_crate_version() {
        let (mut console, capture) = Console::captured("");
        let spec = usage::domain("version").unwrap();
        dispatch(spec, vec!["version".to_string()], &mut console)
            .await
            .unwrap();
        assert_eq!(capture.stdout(), format!("{}\n", env!("CARGO_PKG_VERSION")));
    }
}
