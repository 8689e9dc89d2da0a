//! controller::client
//!
//! Authenticated HTTP transport for the controller API.
//!
//! # Design
//!
//! `ControllerClient` owns one `reqwest::Client` and the controller base URL.
//! Every request goes through [`ControllerClient::send`], which:
//! - adds the `Authorization: token <t>` and `User-Agent` headers
//! - records the controller's API version from the response headers
//! - maps non-success statuses to [`ApiError`]
//!
//! Endpoint wrappers live in `endpoints.rs` and only build paths and bodies.
//!
//! # API compatibility
//!
//! The controller reports its API version in the `DRYDOCK_API_VERSION`
//! header. A different major component from [`API_VERSION`] is a mismatch.
//! Mismatches never fail a call; the client remembers them so the command
//! layer can warn once per process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::types::{ListResult, Page};

/// API version this client was written against.
pub const API_VERSION: &str = "2.3";

/// Response header carrying the controller's API version.
pub const API_VERSION_HEADER: &str = "DRYDOCK_API_VERSION";

const USER_AGENT_VALUE: &str = concat!("drydock-cli/", env!("CARGO_PKG_VERSION"));

/// Client for one controller.
pub struct ControllerClient {
    http: Client,
    base: Url,
    token: Option<String>,
    server_version: Mutex<Option<String>>,
    warned: AtomicBool,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for ControllerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerClient")
            .field("base", &self.base.as_str())
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl ControllerClient {
    /// Create a client for `controller`.
    ///
    /// A URL without a scheme gets `http://`. With `verify_ssl` off, invalid
    /// certificates are accepted.
    pub fn new(
        controller: &str,
        token: Option<String>,
        verify_ssl: bool,
    ) -> Result<Self, ApiError> {
        let base = normalize_controller_url(controller)?;

        let http = Client::builder()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base,
            token,
            server_version: Mutex::new(None),
            warned: AtomicBool::new(false),
        })
    }

    /// The controller host name, without port.
    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    /// The controller URL as the user would type it, without a trailing slash.
    pub fn controller_display(&self) -> String {
        self.base.as_str().trim_end_matches('/').to_string()
    }

    /// Version reported by the controller on the most recent response.
    pub fn server_version(&self) -> Option<String> {
        self.server_version
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// The server version, if it is incompatible with [`API_VERSION`].
    pub fn version_mismatch(&self) -> Option<String> {
        self.server_version()
            .filter(|server| !api_versions_compatible(API_VERSION, server))
    }

    /// Like [`version_mismatch`](Self::version_mismatch), but reports a
    /// mismatch only the first time it is asked.
    pub fn take_version_warning(&self) -> Option<String> {
        let server = self.version_mismatch()?;
        if self.warned.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(server)
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(format!("{}{}", self.base, path)))
    }

    /// Send a request and fail on non-success statuses.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let response = self.send_raw(method, url, body).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &text))
    }

    /// Send a request without interpreting the status.
    pub(crate) async fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, "controller request");

        let mut request = self
            .http
            .request(method, url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(status = response.status().as_u16(), "controller response");
        self.record_version(&response);
        Ok(response)
    }

    fn record_version(&self, response: &Response) {
        let version = response
            .headers()
            .get(API_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let (Some(version), Ok(mut slot)) = (version, self.server_version.lock()) {
            *slot = Some(version);
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self.send::<()>(Method::GET, url, None).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        decode(response).await
    }

    /// POST where the response body is ignored.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path)?;
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    pub(crate) async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path)?;
        self.send(Method::DELETE, url, Some(body)).await?;
        Ok(())
    }

    /// GET a paginated list. A `limit` of 0 leaves the page size to the controller.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: usize,
    ) -> Result<ListResult<T>, ApiError> {
        let mut url = self.url(path)?;
        if limit > 0 {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        let response = self.send::<()>(Method::GET, url, None).await?;
        let page: Page<T> = decode(response).await?;
        Ok(ListResult {
            items: page.results,
            total: page.count,
            requested_limit: limit,
        })
    }

    /// Probe the controller. An unauthenticated 401 still proves it is reachable.
    pub async fn check_connection(&self) -> Result<(), ApiError> {
        let url = self.url("/v2/")?;
        let response = self.send_raw::<()>(Method::GET, url, None).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &text))
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parse a controller address, defaulting the scheme to `http`.
pub fn normalize_controller_url(controller: &str) -> Result<Url, ApiError> {
    let trimmed = controller.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|_| ApiError::InvalidUrl(controller.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ApiError::InvalidUrl(controller.to_string()));
    }
    Ok(url)
}

/// Two API versions are compatible when their major components agree.
pub fn api_versions_compatible(client: &str, server: &str) -> bool {
    let major = |v: &str| v.trim().split('.').next().unwrap_or_default().to_string();
    major(client) == major(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_defaults_to_http() {
        let url = normalize_controller_url("drydock.example.com").unwrap();
        assert_eq!(url.as_str(), "http://drydock.example.com/");

        let url = normalize_controller_url("https://drydock.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn empty_controller_is_rejected() {
        assert!(normalize_controller_url("").is_err());
        assert!(normalize_controller_url("http://").is_err());
    }

    #[test]
    fn only_major_versions_must_agree() {
        assert!(api_versions_compatible("2.3", "2.0"));
        assert!(api_versions_compatible("2.3", "2.3.1"));
        assert!(!api_versions_compatible("2.3", "1.9"));
        assert!(!api_versions_compatible("2.3", "3.0"));
    }

    #[test]
    fn debug_hides_token() {
        let client =
            ControllerClient::new("http://c.example.com", Some("s3cret".into()), true).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("has_token: true"));
    }

    #[test]
    fn paths_join_onto_base() {
        let client = ControllerClient::new("http://c.example.com:8000", None, true).unwrap();
        let url = client.url("/v2/apps/foo/config/").unwrap();
        assert_eq!(url.as_str(), "http://c.example.com:8000/v2/apps/foo/config/");
        assert_eq!(client.host(), "c.example.com");
        assert_eq!(client.controller_display(), "http://c.example.com:8000");
    }
}
