//! cli::router
//!
//! Maps a raw argument vector to what should run.
//!
//! # Rewrites
//!
//! Before routing, the first argument goes through two rewrites:
//! - a lone `--help`/`-h` becomes `help` and a lone `--version`/`-v` becomes
//!   `version`; `help <cmd> ...` (or `--help <cmd> ...`) becomes
//!   `<cmd> ... --help`
//! - shortcuts are expanded (`create` → `apps:create`)
//!
//! The domain is the text before the first `:`. Routing is pure: running
//! the route, including replacing the process for plugins, happens in
//! [`crate::cli::execute`].

use super::shortcuts;
use super::usage::{self, DomainSpec};

/// The outcome of routing an argument vector.
#[derive(Debug, Clone)]
pub enum Route {
    /// No command at all.
    Empty,
    /// The command itself is malformed, e.g. an unknown flag in its place.
    Invalid(String),
    /// Top-level help.
    Help,
    /// A built-in domain with the rewritten argument vector.
    Builtin {
        domain: &'static DomainSpec,
        argv: Vec<String>,
    },
    /// An unknown domain, delegated to `drydock-<domain>`.
    Plugin { domain: String, argv: Vec<String> },
}

/// Route `argv` (the arguments after the program name).
pub fn route(argv: &[String]) -> Route {
    let argv = rewrite(argv.to_vec());
    let Some(first) = argv.first() else {
        return Route::Empty;
    };

    let domain = match first.split_once(':') {
        Some((domain, _)) => domain.to_string(),
        None => first.clone(),
    };

    if domain.starts_with('-') {
        return Route::Invalid(domain);
    }

    if domain == "help" {
        return Route::Help;
    }

    match usage::domain(&domain) {
        Some(spec) => Route::Builtin { domain: spec, argv },
        None => Route::Plugin { domain, argv },
    }
}

fn rewrite(mut argv: Vec<String>) -> Vec<String> {
    if argv.len() == 1 {
        match argv[0].as_str() {
            "--help" | "-h" => argv[0] = "help".to_string(),
            "--version" | "-v" => argv[0] = "version".to_string(),
            _ => {}
        }
    }

    if argv.len() > 1 && matches!(argv[0].as_str(), "help" | "--help" | "-h") {
        argv.remove(0);
        argv.push("--help".to_string());
    }

    if let Some(first) = argv.first_mut() {
        *first = shortcuts::expand(first).to_string();
    }

    argv
}

/// The argument vector handed to a plugin: the first argument loses its
/// `<domain>:` prefix, so `drydock foo:bar x` runs `drydock-foo bar x`.
pub fn plugin_argv(domain: &str, argv: &[String]) -> Vec<String> {
    let prefix = format!("{}:", domain);
    let mut forwarded = argv.to_vec();
    if let Some(first) = forwarded.first_mut() {
        if let Some(rest) = first.split_once(&prefix).map(|(_, rest)| rest.to_string()) {
            *first = rest;
        }
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn builtin(route: Route) -> (&'static str, Vec<String>) {
        match route {
            Route::Builtin { domain, argv } => (domain.name, argv),
            other => panic!("expected a builtin route, got {:?}", other),
        }
    }

    #[test]
    fn empty_argv_is_empty() {
        assert!(matches!(route(&[]), Route::Empty));
    }

    #[test]
    fn lone_flags_become_help_and_version() {
        assert!(matches!(route(&args(&["--help"])), Route::Help));
        assert!(matches!(route(&args(&["-h"])), Route::Help));
        assert!(matches!(route(&args(&["help"])), Route::Help));

        let (domain, argv) = builtin(route(&args(&["-v"])));
        assert_eq!(domain, "version");
        assert_eq!(argv, args(&["version"]));
    }

    #[test]
    fn help_prefix_moves_to_the_end() {
        let (domain, argv) = builtin(route(&args(&["help", "apps:create"])));
        assert_eq!(domain, "apps");
        assert_eq!(argv, args(&["apps:create", "--help"]));

        let (_, argv) = builtin(route(&args(&["-h", "config"])));
        assert_eq!(argv, args(&["config", "--help"]));
    }

    #[test]
    fn shortcut_routes_like_its_expansion() {
        let (domain, argv) = builtin(route(&args(&["create", "myapp"])));
        let (full_domain, full_argv) = builtin(route(&args(&["apps:create", "myapp"])));
        assert_eq!(domain, full_domain);
        assert_eq!(argv, full_argv);
    }

    #[test]
    fn help_for_a_shortcut_expands_it() {
        let (_, argv) = builtin(route(&args(&["help", "scale"])));
        assert_eq!(argv, args(&["ps:scale", "--help"]));
    }

    #[test]
    fn unknown_domain_is_a_plugin() {
        match route(&args(&["foo:bar", "baz"])) {
            Route::Plugin { domain, argv } => {
                assert_eq!(domain, "foo");
                assert_eq!(plugin_argv(&domain, &argv), args(&["bar", "baz"]));
            }
            other => panic!("expected a plugin route, got {:?}", other),
        }
    }

    #[test]
    fn bare_plugin_keeps_its_name() {
        assert_eq!(plugin_argv("foo", &args(&["foo", "x"])), args(&["foo", "x"]));
    }

    #[test]
    fn leading_flag_is_invalid() {
        assert!(matches!(route(&args(&["--bogus"])), Route::Invalid(_)));
        assert!(matches!(route(&args(&["-c", "x", "apps"])), Route::Invalid(_)));
    }
}
