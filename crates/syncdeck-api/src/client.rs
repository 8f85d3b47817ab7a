// Daemon REST API HTTP client
//
// Wraps `reqwest::Client` with daemon-specific URL construction, API-key
// injection, and status-to-error mapping. Endpoint groups (system, db) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Header the daemon reads the API key from.
const API_KEY_HEADER: &str = "X-API-Key";

/// Longest slice of an error body carried into an error message.
const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the daemon's `/rest/*` API.
///
/// Stateless: every call is an independent request bounded by the
/// transport timeout. No retries are performed here.
pub struct DaemonClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl DaemonClient {
    /// Create a client that authenticates every request with `api_key`.
    ///
    /// `base_url` is the daemon GUI root, e.g. `http://127.0.0.1:8384`.
    pub fn new(
        base_url: Url,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
            Error::Authentication {
                message: "API key contains characters not allowed in a header".into(),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for any auth headers; used by tests and
    /// by consumers that share one HTTP client. `timeout` must be the one
    /// `http` was built with; it is what timeout errors report.
    pub fn with_client(http: reqwest::Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// The daemon base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{path}`.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/rest/{path}"))?)
    }

    /// Build `{base}/rest/{path}?folder={id}` with the id percent-encoded.
    pub(crate) fn folder_url(&self, path: &str, folder_id: &str) -> Result<Url, Error> {
        let mut url = self.rest_url(path)?;
        url.query_pairs_mut().append_pair("folder", folder_id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let resp = check_status(resp).await?;

        let body = resp.text().await.map_err(|e| self.send_error(e))?;
        trace!(len = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..floor_char_boundary(&body, BODY_PREVIEW_LEN)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Send a POST request with a JSON body, discarding the response body.
    pub(crate) async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        check_status(resp).await?;
        Ok(())
    }

    /// Send a body-less POST request.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        check_status(resp).await?;
        Ok(())
    }

    /// Translate a reqwest send failure, surfacing timeouts explicitly.
    fn send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout: self.timeout,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Pass through success responses; map everything else to an error.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let preview = body[..floor_char_boundary(&body, BODY_PREVIEW_LEN)].trim();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("HTTP {status}: {preview}"),
        });
    }

    Err(Error::Http {
        status: status.as_u16(),
        message: if preview.is_empty() {
            status.canonical_reason().unwrap_or("request failed").into()
        } else {
            preview.into()
        },
    })
}

/// Largest index `<= max` that sits on a char boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
