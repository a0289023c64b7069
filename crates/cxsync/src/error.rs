//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cxsync_config::ConfigError;
use cxsync_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const RECONCILE: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to switch at {url}")]
    #[diagnostic(
        code(cxsync::connection_failed),
        help(
            "Check that the switch REST API is enabled and reachable.\n\
             Host: {url}\n\
             Self-signed certificates are accepted unless the profile sets insecure = false."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cxsync::auth_failed),
        help(
            "Verify the username and password for this switch.\n\
             Run: cxsync config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(cxsync::no_credentials),
        help(
            "Configure credentials with: cxsync config init\n\
             Or set CXSYNC_USERNAME and CXSYNC_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(cxsync::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("{failed} of {total} resource(s) failed to reconcile")]
    #[diagnostic(
        code(cxsync::reconcile_failed),
        help("See the error diagnostics above; unaffected resources were still applied.")
    )]
    Reconcile { failed: usize, total: usize },

    #[error("Invalid manifest {path}: {reason}")]
    #[diagnostic(
        code(cxsync::manifest),
        help("A manifest is `resources:` followed by a list of entries with a `kind` key.")
    )]
    Manifest { path: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Switch error: {message}")]
    #[diagnostic(code(cxsync::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cxsync::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cxsync::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cxsync config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(cxsync::no_config),
        help(
            "Create one with: cxsync config init\n\
             Expected at: {path}\n\
             Or pass --host and --username with CXSYNC_PASSWORD set."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(cxsync::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cxsync::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Reconcile { .. } => exit_code::RECONCILE,
            Self::Validation { .. }
            | Self::Manifest { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::DoesNotExist { kind, key, .. } => CliError::NotFound {
                resource_type: kind.to_string(),
                identifier: key,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::ConfigFile { path, source } => CliError::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),

            other => CliError::ApiError {
                message: other.to_string(),
            },
        }
    }
}
