//! core::types
//!
//! Strongly-typed values parsed from command arguments.
//!
//! Every type here validates at construction so command handlers never deal
//! with raw strings for release versions, scale targets, process selectors,
//! resource limits, Procfiles or SSH public keys.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::kv::KeyValueSet;

static SCALE_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z0-9]+)=([0-9]+)$").expect("valid regex"));

static DEPLOYMENT_POD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{8,10}-[a-z0-9]{5}$").expect("valid regex"));

static LIMIT_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z0-9]+(?:-[a-z0-9]+)*)=(.+)$").expect("valid regex"));

static MEMORY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[bkmgBKMG]?$").expect("valid regex"));

static CPU_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?m?$").expect("valid regex"));

/// Errors from argument value parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0} is not in the form 'v#'")]
    VersionForm(String),

    #[error("invalid version '{0}': expected a release number such as 'v3' or '3'")]
    VersionNumber(String),

    #[error("'{0}' does not match the pattern 'type=num', ex: web=2")]
    ScaleTarget(String),

    #[error("'{0}' does not match the pattern 'type=limit', ex: web={1}")]
    LimitTarget(String, &'static str),

    #[error("invalid Procfile: {0}")]
    Procfile(String),

    #[error("{0} is not a valid ssh key")]
    PublicKey(String),
}

/// Parse a release version given as `v3` or `3`.
pub fn parse_version(input: &str) -> Result<u32, ParseError> {
    let digits = match input.strip_prefix('v') {
        Some("") => return Err(ParseError::VersionForm(input.to_string())),
        Some(rest) => rest,
        None => input,
    };

    digits
        .parse()
        .map_err(|_| ParseError::VersionNumber(input.to_string()))
}

/// Parse `type=count` scale targets.
pub fn parse_scale_targets<S: AsRef<str>>(
    targets: &[S],
) -> Result<BTreeMap<String, u32>, ParseError> {
    let mut scale = BTreeMap::new();

    for target in targets {
        let target = target.as_ref();
        let captures = SCALE_TARGET
            .captures(target)
            .ok_or_else(|| ParseError::ScaleTarget(target.to_string()))?;
        let count = captures[2]
            .parse()
            .map_err(|_| ParseError::ScaleTarget(target.to_string()))?;
        scale.insert(captures[1].to_string(), count);
    }

    Ok(scale)
}

/// A restart selector: a whole process type or one named process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTarget {
    pub process_type: String,
    pub name: Option<String>,
}

impl ProcessTarget {
    /// Interpret a restart target for `app`.
    ///
    /// A bare word is a process type. A dashed name is a specific pod; the
    /// type is recovered from the pod name after stripping the `<app>-` prefix.
    pub fn parse(target: &str, app: &str) -> Self {
        if !target.contains('-') {
            return Self {
                process_type: target.to_string(),
                name: None,
            };
        }

        let replaced = target.replacen(&format!("{}-", app), "", 1);
        let parts: Vec<&str> = replaced.split('-').collect();
        let process_type = if DEPLOYMENT_POD.is_match(&replaced) {
            parts[0]
        } else {
            parts.get(1).copied().unwrap_or(parts[0])
        };

        Self {
            process_type: process_type.to_string(),
            name: Some(target.to_string()),
        }
    }
}

/// Which resource a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Memory,
    Cpu,
}

impl LimitKind {
    fn example(self) -> &'static str {
        match self {
            LimitKind::Memory => "1G",
            LimitKind::Cpu => "500m",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Memory => write!(f, "memory"),
            LimitKind::Cpu => write!(f, "cpu"),
        }
    }
}

/// Parse `type=limit` tokens for the given resource.
pub fn parse_limits<S: AsRef<str>>(
    targets: &[S],
    kind: LimitKind,
) -> Result<KeyValueSet, ParseError> {
    let value_pattern = match kind {
        LimitKind::Memory => &*MEMORY_VALUE,
        LimitKind::Cpu => &*CPU_VALUE,
    };

    let mut limits = KeyValueSet::new();
    for target in targets {
        let target = target.as_ref();
        let invalid = || ParseError::LimitTarget(target.to_string(), kind.example());
        let captures = LIMIT_TARGET.captures(target).ok_or_else(invalid)?;
        if !value_pattern.is_match(&captures[2]) {
            return Err(invalid());
        }
        limits.insert(captures[1].to_string(), Some(captures[2].to_string()));
    }

    Ok(limits)
}

/// Parse a YAML Procfile into process type → command.
pub fn parse_procfile(contents: &str) -> Result<BTreeMap<String, String>, ParseError> {
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_yaml::from_str(contents).map_err(|e| ParseError::Procfile(e.to_string()))
}

/// An SSH public key ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Identifier shown in `keys:list`
    pub id: String,
    /// Full public key line
    pub public: String,
    /// File the key was read from
    pub source: String,
}

impl PublicKey {
    /// Parse the contents of a `.pub` file.
    ///
    /// The ID is the user part of the trailing comment (`bob@laptop` → `bob`),
    /// or `fallback_id` when the key has no comment.
    pub fn parse(contents: &str, fallback_id: &str, source: &str) -> Result<Self, ParseError> {
        let line = contents.trim();
        let fields: Vec<&str> = line.split_whitespace().collect();

        let valid_type = fields
            .first()
            .map(|t| t.starts_with("ssh-") || t.starts_with("ecdsa-"))
            .unwrap_or(false);
        if fields.len() < 2 || !valid_type {
            return Err(ParseError::PublicKey(source.to_string()));
        }

        let id = match fields.get(2) {
            Some(comment) => comment.split('@').next().unwrap_or(comment).to_string(),
            None => fallback_id.to_string(),
        };

        Ok(Self {
            id,
            public: line.to_string(),
            source: source.to_string(),
        })
    }

    /// Read and parse a key file.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let source = path.display().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|_| ParseError::PublicKey(source.clone()))?;
        let fallback = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('.').next())
            .unwrap_or("key");
        Self::parse(&contents, fallback, &source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_accepts_both_forms() {
        assert_eq!(parse_version("v3").unwrap(), 3);
        assert_eq!(parse_version("3").unwrap(), 3);
        assert_eq!(parse_version("v120").unwrap(), 120);
    }

    #[test]
    fn version_rejects_bare_v() {
        let err = parse_version("v").unwrap_err();
        assert_eq!(err.to_string(), "v is not in the form 'v#'");
    }

    #[test]
    fn version_rejects_non_numbers() {
        assert!(matches!(
            parse_version("vx"),
            Err(ParseError::VersionNumber(_))
        ));
        assert!(parse_version("three").is_err());
    }

    #[test]
    fn scale_targets_parse() {
        let targets = parse_scale_targets(&["web=2", "worker=10"]).unwrap();
        assert_eq!(targets["web"], 2);
        assert_eq!(targets["worker"], 10);
    }

    #[test]
    fn scale_target_rejects_bad_pattern() {
        let err = parse_scale_targets(&["web=two"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'web=two' does not match the pattern 'type=num', ex: web=2"
        );
        assert!(parse_scale_targets(&["Web=2"]).is_err());
    }

    #[test]
    fn process_target_bare_type() {
        let target = ProcessTarget::parse("web", "foo");
        assert_eq!(target.process_type, "web");
        assert_eq!(target.name, None);
    }

    #[test]
    fn process_target_deployment_pod() {
        let target = ProcessTarget::parse("foo-web-3291567383-x8h4s", "foo");
        assert_eq!(target.process_type, "web");
        assert_eq!(target.name.as_deref(), Some("foo-web-3291567383-x8h4s"));
    }

    #[test]
    fn process_target_replication_controller_pod() {
        let target = ProcessTarget::parse("foo-v2-worker-abcde", "foo");
        assert_eq!(target.process_type, "worker");
    }

    #[test]
    fn limits_validate_by_kind() {
        let memory = parse_limits(&["web=1G", "worker=512M"], LimitKind::Memory).unwrap();
        assert_eq!(memory["web"].as_deref(), Some("1G"));

        let cpu = parse_limits(&["web=500m", "worker=1.5"], LimitKind::Cpu).unwrap();
        assert_eq!(cpu["web"].as_deref(), Some("500m"));

        assert!(parse_limits(&["web=lots"], LimitKind::Memory).is_err());
        assert!(parse_limits(&["web=1G"], LimitKind::Cpu).is_err());
        assert!(parse_limits(&["web"], LimitKind::Cpu).is_err());
    }

    #[test]
    fn procfile_parses_yaml_map() {
        let procfile = parse_procfile("web: ./server\nworker: ./worker --queue\n").unwrap();
        assert_eq!(procfile["web"], "./server");
        assert_eq!(procfile["worker"], "./worker --queue");
        assert!(parse_procfile("- not\n- a map\n").is_err());
        assert!(parse_procfile("").unwrap().is_empty());
    }

    #[test]
    fn public_key_id_from_comment() {
        let key = PublicKey::parse("ssh-rsa AAAAB3NzaC1yc2E bob@laptop\n", "id_rsa", "k").unwrap();
        assert_eq!(key.id, "bob");
        assert_eq!(key.public, "ssh-rsa AAAAB3NzaC1yc2E bob@laptop");
    }

    #[test]
    fn public_key_falls_back_to_file_id() {
        let key = PublicKey::parse("ssh-ed25519 AAAAC3Nz", "id_ed25519", "k").unwrap();
        assert_eq!(key.id, "id_ed25519");
        assert!(PublicKey::parse("not a key", "x", "k").is_err());
    }
}
