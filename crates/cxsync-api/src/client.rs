// Switch REST client
//
// Wraps `reqwest::Client` with AOS-CX URL construction and status
// classification. Every request is rooted at `/rest/{version}/`. Endpoint
// groups (session, vlans, interfaces, full config) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// REST layout assumed when a profile does not pin one.
pub const DEFAULT_REST_VERSION: &str = "v10.09";

/// Outcome of a create (POST) call.
///
/// Only `201 Created` counts as materialized; any other status means the
/// object was already present (or refused) and the caller should adopt it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStatus {
    Created,
    NotCreated { status: u16 },
}

impl CreateStatus {
    pub fn is_materialized(self) -> bool {
        matches!(self, Self::Created)
    }
}

impl From<StatusCode> for CreateStatus {
    fn from(status: StatusCode) -> Self {
        if status == StatusCode::CREATED {
            Self::Created
        } else {
            Self::NotCreated {
                status: status.as_u16(),
            }
        }
    }
}

/// Verb used for an update: merge (PATCH) or whole-object replace (PUT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Patch,
    Put,
}

impl WriteMode {
    pub fn from_use_put(use_put: bool) -> Self {
        if use_put { Self::Put } else { Self::Patch }
    }

    fn method_name(self) -> &'static str {
        match self {
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }
}

/// HTTP client for a single AOS-CX switch session.
///
/// Cheap to clone: the underlying `reqwest::Client` and cookie jar are
/// reference counted, so clones share the same logged-in session.
#[derive(Debug, Clone)]
pub struct SwitchClient {
    http: reqwest::Client,
    base_url: Url,
    rest_version: String,
    /// Session cookie jar, populated by [`login`](Self::login).
    cookie_jar: Option<Arc<Jar>>,
}

impl SwitchClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (switch sessions are cookie based). `base_url` is the
    /// switch root, e.g. `https://10.0.0.1`.
    pub fn new(
        base_url: Url,
        rest_version: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            rest_version: rest_version.into(),
            cookie_jar,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// No cookie jar is tracked, so [`cookie_header`](Self::cookie_header)
    /// always returns `None` and [`login`](Self::login) checks the
    /// response's `Set-Cookie` header instead.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        rest_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url,
            rest_version: rest_version.into(),
            cookie_jar: None,
        }
    }

    /// The switch base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The REST layout version, e.g. `v10.09`.
    pub fn rest_version(&self) -> &str {
        &self.rest_version
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The `Cookie` header the session would send, if a jar is attached.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    pub(crate) fn has_cookie_jar(&self) -> bool {
        self.cookie_jar.is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{version}/{segments...}`.
    ///
    /// Each segment is percent-encoded on its own, so interface names such
    /// as `1/1/1` become a single `1%2F1%2F1` path segment.
    pub fn rest_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty()
                .push("rest")
                .push(&self.rest_version)
                .extend(segments);
        }
        Ok(url)
    }

    /// Absolute path of a resource, as used in reference maps.
    pub fn reference_uri(&self, segments: &[&str]) -> Result<String, Error> {
        Ok(self.rest_url(segments)?.path().to_owned())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = Self::check_status("GET", resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(len = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Send a POST request with JSON body and report whether it materialized.
    ///
    /// A non-201 status is not an error here: it is how the switch reports
    /// an object that already exists.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<CreateStatus, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = CreateStatus::from(resp.status());
        if let CreateStatus::NotCreated { status } = status {
            debug!(status, "create did not materialize");
        }
        Ok(status)
    }

    /// Send a PATCH or PUT request with JSON body.
    pub(crate) async fn write(
        &self,
        mode: WriteMode,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let method = mode.method_name();
        debug!("{method} {}", url);

        let builder = match mode {
            WriteMode::Patch => self.http.patch(url),
            WriteMode::Put => self.http.put(url),
        };
        let resp = builder.json(body).send().await.map_err(Error::Transport)?;
        Self::check_status(method, resp).await?;
        Ok(())
    }

    /// Send a DELETE request.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self.http.delete(url).send().await.map_err(Error::Transport)?;
        Self::check_status("DELETE", resp).await?;
        Ok(())
    }

    /// Turn any non-2xx response into `Error::Status`, keeping the body.
    async fn check_status(
        method: &'static str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_owned();
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Status {
            method,
            path,
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> SwitchClient {
        SwitchClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://10.0.0.1").unwrap(),
            DEFAULT_REST_VERSION,
        )
    }

    #[test]
    fn interface_names_are_encoded_as_one_segment() {
        let url = client()
            .rest_url(&["system", "interfaces", "1/1/1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://10.0.0.1/rest/v10.09/system/interfaces/1%2F1%2F1"
        );
    }

    #[test]
    fn reference_uri_is_path_only() {
        let uri = client()
            .reference_uri(&["system", "vlans", "10"])
            .unwrap();
        assert_eq!(uri, "/rest/v10.09/system/vlans/10");
    }

    #[test]
    fn only_201_materializes() {
        assert!(CreateStatus::from(StatusCode::CREATED).is_materialized());
        assert_eq!(
            CreateStatus::from(StatusCode::OK),
            CreateStatus::NotCreated { status: 200 }
        );
        assert!(!CreateStatus::from(StatusCode::BAD_REQUEST).is_materialized());
    }
}
