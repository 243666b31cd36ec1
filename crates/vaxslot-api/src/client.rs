// CoWIN API HTTP client
//
// Wraps `reqwest::Client` with CoWIN-specific URL construction, bearer
// auth, and status-to-error mapping. All endpoint families (location,
// beneficiaries, calendar, schedule) are implemented as inherent methods
// via separate files to keep this module focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Root of the public CoWIN API.
pub const DEFAULT_BASE_URL: &str = "https://cdn-api.co-vin.in/api";

/// Immutable request context carrying the bearer token.
///
/// Threaded explicitly through authenticated calls rather than stored on
/// the client, so a token swap after re-authentication is just a new
/// value -- no shared mutable header state.
#[derive(Clone)]
pub struct AuthContext {
    token: SecretString,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").finish_non_exhaustive()
    }
}

/// Raw HTTP client for the CoWIN appointment API.
///
/// Maps HTTP 401 to [`Error::TokenExpired`] on every call so callers can
/// treat token invalidation uniformly, whichever endpoint trips it first.
pub struct CowinClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CowinClient {
    /// Create a client against the production API from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and base URL.
    ///
    /// Used by tests to point the client at a mock server.
    pub fn with_base_url(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `v2/admin/location/states`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        auth: Option<&AuthContext>,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        if let Some(ctx) = auth {
            builder = builder.header(AUTHORIZATION, ctx.bearer());
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        auth: Option<&AuthContext>,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let mut builder = self.http.post(url).json(body);
        if let Some(ctx) = auth {
            builder = builder.header(AUTHORIZATION, ctx.bearer());
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a POST request and hand back the raw status and body.
    ///
    /// The schedule endpoint needs the untouched response: a non-200
    /// there is an outcome, not an error. 401 still maps to
    /// [`Error::TokenExpired`].
    pub(crate) async fn post_raw(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        auth: &AuthContext,
    ) -> Result<(StatusCode, String), Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .header(AUTHORIZATION, auth.bearer())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::TokenExpired);
        }
        let body = resp.text().await.map_err(Error::Transport)?;
        Ok((status, body))
    }

    /// Map the response status and decode the body, returning
    /// [`Error::TokenExpired`] on 401 and [`Error::Api`] on any other
    /// non-success status.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::TokenExpired);
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First 200 characters of a body, respecting char boundaries.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
