// Monitoring backend HTTP client
//
// Wraps `reqwest::Client` with URL construction for the two backend
// services and the shared `{ "error": ... }` body check. Endpoint methods
// live in `system.rs` and `network.rs` as inherent impls so this module
// stays focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default base URL of the system metrics service.
pub const DEFAULT_SYSTEM_URL: &str = "http://127.0.0.1:5000";
/// Default base URL of the network service.
pub const DEFAULT_NETWORK_URL: &str = "http://localhost:5000/api";

/// Base URLs for the two backend services.
///
/// Both are normalized to end in `/` so relative paths join beneath them
/// instead of replacing the last segment (`/api` + `all` -> `/api/all`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    system: Url,
    network: Url,
}

impl Endpoints {
    pub fn new(system: Url, network: Url) -> Self {
        Self {
            system: normalize_base_url(system),
            network: normalize_base_url(network),
        }
    }

    /// Parse both base URLs from strings.
    pub fn parse(system: &str, network: &str) -> Result<Self, Error> {
        Ok(Self::new(Url::parse(system)?, Url::parse(network)?))
    }

    /// The local development backend on port 5000.
    pub fn local() -> Result<Self, Error> {
        Self::parse(DEFAULT_SYSTEM_URL, DEFAULT_NETWORK_URL)
    }

    pub fn system(&self) -> &Url {
        &self.system
    }

    pub fn network(&self) -> &Url {
        &self.network
    }
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// HTTP client for the system-monitoring backend.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl MonitorClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(endpoints: Endpoints, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoints })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{system}/{path}`
    pub(crate) fn system_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.endpoints.system.join(path)?)
    }

    /// `{network}/{path}`
    pub(crate) fn network_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.endpoints.network.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        handle_response(resp).await
    }

    /// Send a GET request with a per-request deadline overriding the
    /// client-wide timeout.
    pub(crate) async fn get_with_timeout<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Duration,
    ) -> Result<T, Error> {
        debug!("GET {url} timeout={timeout:?}");

        let resp = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(Error::Transport)?;
        handle_response(resp).await
    }

    /// Send a GET request with query parameters and decode the JSON body.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(Error::Transport)?;
        handle_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        handle_response(resp).await
    }

    /// Send a GET request whose response body is ignored on success.
    pub(crate) async fn get_empty(&self, url: Url) -> Result<(), Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Check status and the embedded `{error}` field, then decode `T`.
async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if let Some(message) = embedded_error(&body) {
        return Err(Error::Backend {
            message,
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    match embedded_error(&body) {
        Some(message) => Err(Error::Backend {
            message,
            status: status.as_u16(),
        }),
        None => Err(Error::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Extract `error` from a JSON object body, if present and non-null.
fn embedded_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
