//! CLI configuration: thin wrapper around `cxsync_config`.
//!
//! Re-exports the profile types and adds resolution that respects
//! `GlobalOpts` overrides (--host, --username, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use cxsync_core::{SwitchConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use cxsync_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build the `SwitchConfig` for this invocation.
///
/// A named profile is the base and CLI flags override it. Without a
/// profile, `--host` and `--username` plus `CXSYNC_PASSWORD` suffice.
pub fn resolve_switch_config(global: &GlobalOpts) -> Result<SwitchConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut switch = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref host) = global.host {
            profile.hostname.clone_from(host);
        }
        if let Some(ref username) = global.username {
            profile.username = Some(username.clone());
        }
        cxsync_config::profile_to_switch_config(&profile, &profile_name)?
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    } else {
        from_flags(global, &profile_name)?
    };

    if global.insecure {
        switch.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        switch.timeout = Duration::from_secs(timeout);
    }
    Ok(switch)
}

/// Connection settings from flags and environment alone.
fn from_flags(global: &GlobalOpts, profile_name: &str) -> Result<SwitchConfig, CliError> {
    let hostname = global.host.clone().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let username = global
        .username
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = std::env::var("CXSYNC_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;

    Ok(SwitchConfig {
        hostname,
        username,
        password,
        ..SwitchConfig::default()
    })
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
