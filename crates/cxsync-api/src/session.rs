// Switch session authentication
//
// Cookie-based login/logout. The login endpoint sets a session cookie in
// the client's jar; subsequent requests send it automatically.

use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::client::SwitchClient;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Turn a bare hostname into a base URL; full URLs pass through.
///
/// `10.0.0.1` becomes `https://10.0.0.1/`; `http://127.0.0.1:8080` is kept.
pub fn base_url_for(hostname: &str) -> Result<Url, Error> {
    let hostname = hostname.trim();
    if hostname.contains("://") {
        Ok(Url::parse(hostname)?)
    } else {
        Ok(Url::parse(&format!("https://{hostname}"))?)
    }
}

impl SwitchClient {
    /// Open an authenticated session against a switch.
    ///
    /// Fails with [`Error::Authentication`] on blank credentials or a
    /// rejected login, and with [`Error::MissingSessionCookie`] when the
    /// switch accepts the login but issues no session cookie.
    pub async fn connect(
        hostname: &str,
        rest_version: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        if hostname.trim().is_empty() || credentials.is_incomplete() {
            return Err(Error::Authentication {
                message: "hostname, username and password are all required".into(),
            });
        }

        let client = Self::new(base_url_for(hostname)?, rest_version, transport)?;
        client.login(credentials).await?;
        Ok(client)
    }

    /// Authenticate with `POST /rest/{version}/login` (form encoded).
    pub async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        let url = self.rest_url(&["login"])?;
        debug!("logging in at {}", url);

        let resp = self
            .http()
            .post(url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.expose_secret()),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let set_cookie = resp.headers().contains_key(reqwest::header::SET_COOKIE);
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        // Without a jar the response header is the only evidence of a session.
        let has_session = if self.has_cookie_jar() {
            self.cookie_header().is_some()
        } else {
            set_cookie
        };
        if !has_session {
            return Err(Error::MissingSessionCookie);
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session with `POST /rest/{version}/logout`.
    ///
    /// Switches cap concurrent sessions per user, so callers should log out
    /// once they are done.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.rest_url(&["logout"])?;
        debug!("logging out at {}", url);

        let resp = self
            .http()
            .post(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), "logout was not acknowledged");
        }

        debug!("logout complete");
        Ok(())
    }
}
