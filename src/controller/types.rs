//! controller::types
//!
//! Request and response shapes for the controller's `/v2` API.
//!
//! Timestamps other than certificate validity are kept as the strings the
//! controller sends; they are only ever echoed back to the user.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::kv::KeyValueSet;

/// One page of a list endpoint.
///
/// `total` is the controller's count across all pages; `items` never holds
/// more than `requested_limit` entries when a positive limit was sent.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub requested_limit: usize,
}

/// Wire shape of a paginated response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub count: usize,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub structure: BTreeMap<String, u32>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub procfile: BTreeMap<String, String>,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBuild {
    pub image: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub procfile: BTreeMap<String, String>,
}

/// An HTTP header sent by an `httpGet` probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpGetProbe {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default, rename = "httpHeaders", skip_serializing_if = "Vec::is_empty")]
    pub http_headers: Vec<KvPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecProbe {
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpSocketProbe {
    #[serde(default)]
    pub port: u16,
}

/// A liveness or readiness probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Healthcheck {
    #[serde(default)]
    pub initial_delay_seconds: u32,
    #[serde(default)]
    pub timeout_seconds: u32,
    #[serde(default)]
    pub period_seconds: u32,
    #[serde(default)]
    pub success_threshold: u32,
    #[serde(default)]
    pub failure_threshold: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TcpSocketProbe>,
}

impl fmt::Display for Healthcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial Delay (seconds): {}", self.initial_delay_seconds)?;
        writeln!(f, "Timeout (seconds): {}", self.timeout_seconds)?;
        writeln!(f, "Period (seconds): {}", self.period_seconds)?;
        writeln!(f, "Success Threshold: {}", self.success_threshold)?;
        writeln!(f, "Failure Threshold: {}", self.failure_threshold)?;

        match &self.exec {
            Some(exec) => writeln!(f, "Exec Probe: Command={:?}", exec.command)?,
            None => writeln!(f, "Exec Probe: N/A")?,
        }

        match &self.http_get {
            Some(get) => {
                let headers: Vec<String> = get
                    .http_headers
                    .iter()
                    .map(|h| format!("{}={}", h.name, h.value))
                    .collect();
                writeln!(
                    f,
                    "HTTP GET Probe: Path=\"{}\" Port={} HTTPHeaders=[{}]",
                    get.path,
                    get.port,
                    headers.join(" ")
                )?;
            }
            None => writeln!(f, "HTTP GET Probe: N/A")?,
        }

        match &self.tcp_socket {
            Some(tcp) => write!(f, "TCP Socket Probe: Port={}", tcp.port),
            None => write!(f, "TCP Socket Probe: N/A"),
        }
    }
}

/// An application's configuration as returned by the controller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub memory: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub cpu: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub tags: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub registry: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub healthcheck: BTreeMap<String, Option<Healthcheck>>,
    #[serde(default)]
    pub routable: Option<bool>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

impl Config {
    /// Config values rendered as display strings.
    pub fn value_strings(&self) -> BTreeMap<String, String> {
        stringify(&self.values)
    }
}

/// Render a JSON value map as display strings.
///
/// Strings are shown without quotes; everything else uses its JSON text, so
/// `1701` shows as `1701` and `false` as `false`.
pub fn stringify(values: &BTreeMap<String, serde_json::Value>) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(key, value)| (key.clone(), value_to_string(value)))
        .collect()
}

pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A partial config change. Only the sections that are set are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<KeyValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<KeyValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<KeyValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<KeyValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<KeyValueSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<BTreeMap<String, Option<Healthcheck>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub app: String,
    pub domain: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cert {
    pub name: String,
    #[serde(default)]
    pub common_name: String,
    #[serde(default, rename = "san")]
    pub subject_alt_name: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub fingerprint: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub starts: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCert {
    pub name: String,
    pub certificate: String,
    pub key: String,
}

/// A running process.
#[derive(Debug, Clone, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub release: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub started: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Key {
    pub id: String,
    pub public: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub version: u32,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub config: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub date_joined: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminPerm {
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Result of a one-off `apps:run` command.
#[derive(Debug, Clone, Deserialize)]
pub struct AppRunResult {
    #[serde(rename = "exit_code")]
    pub exit_code: i32,
    #[serde(default)]
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_keep_original_text() {
        let config: Config = serde_json::from_str(
            r#"{"values": {"NCC": 1701, "TRUE": false, "FLOAT": 12.34, "TEST": "testing"}}"#,
        )
        .unwrap();
        let values = config.value_strings();
        assert_eq!(values["NCC"], "1701");
        assert_eq!(values["TRUE"], "false");
        assert_eq!(values["FLOAT"], "12.34");
        assert_eq!(values["TEST"], "testing");
    }

    #[test]
    fn config_update_sends_only_set_sections() {
        let mut values = KeyValueSet::new();
        values.insert("A".into(), Some("1".into()));
        values.insert("B".into(), None);
        let update = ConfigUpdate {
            values: Some(values),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"values": {"A": "1", "B": null}})
        );
    }

    #[test]
    fn healthcheck_display_lists_every_probe() {
        let probe = Healthcheck {
            initial_delay_seconds: 50,
            timeout_seconds: 50,
            period_seconds: 10,
            success_threshold: 1,
            failure_threshold: 3,
            http_get: Some(HttpGetProbe {
                path: "/".into(),
                port: 80,
                http_headers: vec![],
            }),
            ..Default::default()
        };
        assert_eq!(
            probe.to_string(),
            "Initial Delay (seconds): 50\n\
             Timeout (seconds): 50\n\
             Period (seconds): 10\n\
             Success Threshold: 1\n\
             Failure Threshold: 3\n\
             Exec Probe: N/A\n\
             HTTP GET Probe: Path=\"/\" Port=80 HTTPHeaders=[]\n\
             TCP Socket Probe: N/A"
        );
    }

    #[test]
    fn healthcheck_serializes_camel_case() {
        let probe = Healthcheck {
            tcp_socket: Some(TcpSocketProbe { port: 5000 }),
            ..Default::default()
        };
        let json = serde_json::to_value(&probe).unwrap();
        assert_eq!(json["tcpSocket"]["port"], 5000);
        assert!(json.get("httpGet").is_none());
    }
}
