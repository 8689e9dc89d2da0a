//! cli::plugin
//!
//! External `drydock-<domain>` commands.
//!
//! A domain that is not built in is looked up on `PATH`. When found, the
//! current process is replaced by it with the same environment; nothing
//! after a successful exec runs.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

/// Executable name for a plugin domain.
pub fn binary_name(domain: &str) -> String {
    format!("drydock-{}", domain)
}

/// Find the plugin binary for `domain` on `PATH`.
pub fn find(domain: &str) -> Option<PathBuf> {
    which::which(binary_name(domain)).ok()
}

/// Replace the current process with `binary`. Only returns on failure.
#[cfg(unix)]
pub fn exec(binary: &Path, domain: &str, argv: &[String]) -> io::Error {
    use std::os::unix::process::CommandExt;

    info!(binary = %binary.display(), "delegating to plugin");
    Command::new(binary)
        .arg0(binary_name(domain))
        .args(argv)
        .exec()
}

/// Run `binary` to completion and exit with its status. Only returns on failure.
#[cfg(not(unix))]
pub fn exec(binary: &Path, domain: &str, argv: &[String]) -> io::Error {
    info!(binary = %binary.display(), domain, "delegating to plugin");
    match Command::new(binary).args(argv).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_binaries_are_prefixed() {
        assert_eq!(binary_name("foo"), "drydock-foo");
    }

    #[test]
    fn missing_plugin_is_not_found() {
        assert!(find("definitely-not-a-real-plugin-name").is_none());
    }
}
