// ── Session lifecycle ──
//
// Opens an authenticated `SwitchClient` for a `SwitchConfig`. The engine
// never holds a session itself: callers pass the client into each
// operation.

use std::future::Future;

use tracing::{debug, warn};

use cxsync_api::{Credentials, SwitchClient, TlsMode, TransportConfig};

use crate::config::{SwitchConfig, TlsVerification};
use crate::error::CoreError;

/// Log in to the switch described by `config`.
///
/// Blank hostname, username or password is rejected before any request
/// is made.
pub async fn connect(config: &SwitchConfig) -> Result<SwitchClient, CoreError> {
    let credentials = Credentials::new(config.username.clone(), config.password.clone());
    if config.hostname.trim().is_empty() || credentials.is_incomplete() {
        return Err(CoreError::ConnectionFailed {
            url: config.hostname.clone(),
            reason: "Unable to create AOS-CX client: invalid or no values found for \
                     hostname, username, password"
                .into(),
        });
    }

    let transport = build_transport(config);
    let client = SwitchClient::connect(
        &config.hostname,
        &config.rest_version,
        &credentials,
        &transport,
    )
    .await?;
    debug!(host = %client.base_url(), "session established");
    Ok(client)
}

/// Connect, run `f` with the session, then log out.
///
/// Logout failures are logged and otherwise ignored; the result of `f`
/// is returned unchanged.
pub async fn oneshot<F, Fut, T, E>(config: &SwitchConfig, f: F) -> Result<T, E>
where
    F: FnOnce(SwitchClient) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<CoreError>,
{
    let client = connect(config).await?;
    let result = f(client.clone()).await;
    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
    result
}

/// Build a [`TransportConfig`] from the switch configuration.
fn build_transport(config: &SwitchConfig) -> TransportConfig {
    TransportConfig::for_session(tls_to_transport(&config.tls), config.timeout)
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::AcceptSelfSigned,
    }
}
