// ── Core error types ──
//
// Reconciliation errors from cxsync-core. Callers see a resource kind, a
// key and the status the switch answered with, never raw reqwest errors.
// The `From<cxsync_api::Error>` impl translates transport-layer errors;
// status classification per lifecycle step lives in `engine`.

use std::path::PathBuf;

use cxsync_api::error::status_text;
use thiserror::Error;

use crate::model::ResourceKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to switch at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Reconciliation errors ────────────────────────────────────────
    /// A write hit `404 Not Found`: the object vanished mid-operation.
    #[error("{kind} {key} does not exist: {}", status_text(*status))]
    DoesNotExist {
        kind: ResourceKind,
        key: String,
        status: u16,
    },

    #[error("Error in updating {kind} {key}: {}", status_text(*status))]
    UpdateFailed {
        kind: ResourceKind,
        key: String,
        status: u16,
    },

    #[error("Error in deleting {kind} {key}: {}", status_text(*status))]
    DeleteFailed {
        kind: ResourceKind,
        key: String,
        status: u16,
    },

    /// Create reported "already exists" but the object cannot be read.
    #[error("Error in creating {kind} {key}: reported as existing but not readable ({reason})")]
    CreateContradiction {
        kind: ResourceKind,
        key: String,
        reason: String,
    },

    #[error("{kind} key is immutable: tracked {tracked}, desired {desired}")]
    KeyChanged {
        kind: ResourceKind,
        tracked: String,
        desired: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Local file errors ────────────────────────────────────────────
    #[error("Cannot read {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for errors that mean the object is absent on the switch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DoesNotExist { .. })
            || matches!(self, Self::Api { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cxsync_api::Error> for CoreError {
    fn from(err: cxsync_api::Error) -> Self {
        match err {
            cxsync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cxsync_api::Error::MissingSessionCookie => CoreError::AuthenticationFailed {
                message: "switch accepted the login but issued no session cookie".into(),
            },
            cxsync_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cxsync_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("Invalid URL: {e}"),
            },
            cxsync_api::Error::InvalidBaseUrl(url) => CoreError::ConnectionFailed {
                url,
                reason: "URL cannot carry a REST path".into(),
            },
            cxsync_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            cxsync_api::Error::Status {
                method,
                path,
                status,
                body,
            } => CoreError::Api {
                message: format!(
                    "{method} {path} returned {}{}",
                    status_text(status),
                    if body.is_empty() {
                        String::new()
                    } else {
                        format!(": {}", body.chars().take(200).collect::<String>())
                    }
                ),
                status: Some(status),
            },
            cxsync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
