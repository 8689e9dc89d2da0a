//! cli::commands::healthchecks
//!
//! Liveness and readiness probes, stored in the app config under
//! `livenessProbe` and `readinessProbe`.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{anyhow, bail, Context as _, Result};

use super::{parse_args, Session};
use crate::cli::args::{HealthchecksList, HealthchecksSet, HealthchecksUnset};
use crate::controller::types::{
    Config, ConfigUpdate, ExecProbe, Healthcheck, HttpGetProbe, KvPair, TcpSocketProbe,
};
use crate::ui::Console;

const LIVENESS: &str = "livenessProbe";
const READINESS: &str = "readinessProbe";

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<HealthchecksList>(console, argv)? else {
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
    write!(console.out(), "{}", format_healthchecks(app, &config))?;
    Ok(())
}

pub async fn set(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<HealthchecksSet>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let key = probe_key(&args.health_type)?;
    let probe = build_probe(&args)?;
    let update = ConfigUpdate {
        healthcheck: Some(BTreeMap::from([(key.to_string(), Some(probe))])),
        ..Default::default()
    };

    write!(console.out(), "Applying {} healthcheck... ", args.health_type)?;
    session
        .call_with_progress(console, session.client.set_config(&app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, &session, &app).await
}

pub async fn unset(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<HealthchecksUnset>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;
    let app = session.app(&args.app)?;

    let mut probes = BTreeMap::new();
    for health_type in &args.health_types {
        probes.insert(probe_key(health_type)?.to_string(), None);
    }
    let update = ConfigUpdate {
        healthcheck: Some(probes),
        ..Default::default()
    };

    write!(console.out(), "Removing healthchecks... ")?;
    session
        .call_with_progress(console, session.client.set_config(&app, &update))
        .await?;
    write!(console.out(), "done\n\n")?;

    print_list(console, &session, &app).await
}

/// The config key for `liveness` or `readiness`.
fn probe_key(health_type: &str) -> Result<&'static str> {
    match health_type {
        "liveness" | LIVENESS => Ok(LIVENESS),
        "readiness" | READINESS => Ok(READINESS),
        other => bail!(
            "Invalid health type '{}'. Must be one of: \"liveness\", \"readiness\"",
            other
        ),
    }
}

fn build_probe(args: &HealthchecksSet) -> Result<Healthcheck> {
    let mut probe = Healthcheck {
        initial_delay_seconds: args.initial_delay,
        timeout_seconds: args.timeout,
        period_seconds: args.period,
        success_threshold: args.success_threshold,
        failure_threshold: args.failure_threshold,
        ..Default::default()
    };

    match args.probe_type.as_str() {
        "httpGet" => {
            let http_headers = args
                .headers
                .iter()
                .map(|header| parse_header(header))
                .collect::<Result<Vec<_>>>()?;
            probe.http_get = Some(HttpGetProbe {
                path: args.path.clone(),
                port: parse_port(&args.args)?,
                http_headers,
            });
        }
        "tcpSocket" => {
            probe.tcp_socket = Some(TcpSocketProbe {
                port: parse_port(&args.args)?,
            });
        }
        "exec" => {
            probe.exec = Some(ExecProbe {
                command: args.args.clone(),
            });
        }
        other => bail!(
            "Invalid probe type '{}'. Must be one of: \"httpGet\", \"exec\", \"tcpSocket\"",
            other
        ),
    }

    Ok(probe)
}

fn parse_port(args: &[String]) -> Result<u16> {
    let port = args
        .first()
        .ok_or_else(|| anyhow!("a port is required for this probe type"))?;
    port.parse()
        .with_context(|| format!("'{}' is not a valid port", port))
}

fn parse_header(header: &str) -> Result<KvPair> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| anyhow!("'{}' does not match the pattern 'name:value'", header))?;
    Ok(KvPair {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

fn format_healthchecks(app: &str, config: &Config) -> String {
    let probe = |key: &str| config.healthcheck.get(key).and_then(Option::as_ref);

    let mut output = format!("=== {} Healthchecks\n\n", app);
    output.push_str("--- Liveness\n");
    match probe(LIVENESS) {
        Some(probe) => output.push_str(&format!("{}\n", probe)),
        None => output.push_str("No liveness probe configured.\n"),
    }
    output.push_str("\n--- Readiness\n");
    match probe(READINESS) {
        Some(probe) => output.push_str(&format!("{}\n", probe)),
        None => output.push_str("No readiness probe configured.\n"),
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn set_args(list: &[&str]) -> HealthchecksSet {
        let mut argv = vec!["healthchecks:set"];
        argv.extend_from_slice(list);
        HealthchecksSet::try_parse_from(argv).unwrap()
    }

    #[test]
    fn http_probe_uses_defaults() {
        let probe = build_probe(&set_args(&[
            "--header", "X-Env: prod", "liveness", "httpGet", "8000",
        ]))
        .unwrap();

        assert_eq!(probe.initial_delay_seconds, 50);
        assert_eq!(probe.timeout_seconds, 50);
        assert_eq!(probe.period_seconds, 10);
        assert_eq!(probe.success_threshold, 1);
        assert_eq!(probe.failure_threshold, 3);

        let get = probe.http_get.unwrap();
        assert_eq!(get.path, "/");
        assert_eq!(get.port, 8000);
        assert_eq!(get.http_headers[0].name, "X-Env");
        assert_eq!(get.http_headers[0].value, "prod");
    }

    #[test]
    fn exec_probe_takes_the_command() {
        let probe = build_probe(&set_args(&["readiness", "exec", "--", "cat", "/tmp/ok"])).unwrap();
        assert_eq!(probe.exec.unwrap().command, vec!["cat", "/tmp/ok"]);
    }

    #[test]
    fn bad_port_and_unknown_type_fail() {
        assert!(build_probe(&set_args(&["liveness", "tcpSocket", "http"])).is_err());
        assert!(build_probe(&set_args(&["liveness", "grpc", "9000"])).is_err());
        assert!(probe_key("startup").is_err());
    }

    #[test]
    fn missing_probes_are_reported() {
        let mut config = Config::default();
        config.healthcheck.insert(READINESS.to_string(), None);

        assert_eq!(
            format_healthchecks("foo", &config),
            "=== foo Healthchecks\n\n\
             --- Liveness\n\
             No liveness probe configured.\n\
             \n--- Readiness\n\
             No readiness probe configured.\n"
        );
    }

    #[test]
    fn configured_probe_is_described() {
        let mut config = Config::default();
        config.healthcheck.insert(
            LIVENESS.to_string(),
            Some(Healthcheck {
                tcp_socket: Some(TcpSocketProbe { port: 5000 }),
                ..Default::default()
            }),
        );
        let text = format_healthchecks("foo", &config);
        assert!(text.contains("--- Liveness\nInitial Delay (seconds): 0\n"));
        assert!(text.contains("TCP Socket Probe: Port=5000\n\n--- Readiness"));
    }
}
