// ── Runtime connection configuration ──
//
// These types describe *how* to reach one switch. They carry credential
// data and connection tuning, but never touch disk. The CLI builds a
// `SwitchConfig` from a profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use cxsync_api::client::DEFAULT_REST_VERSION;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for switches.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single switch.
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    /// Hostname, IP, or full URL (e.g. `10.0.0.1`, `https://core-1`).
    pub hostname: String,
    pub username: String,
    pub password: SecretString,
    /// REST layout version, e.g. `v10.09`.
    pub rest_version: String,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            username: "admin".into(),
            password: SecretString::from(String::new()),
            rest_version: DEFAULT_REST_VERSION.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
