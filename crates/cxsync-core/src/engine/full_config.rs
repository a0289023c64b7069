// ── Full running-configuration lifecycle ──
//
// The running configuration is one opaque document. Create and Update
// push the local file wholesale; Read compares the switch rendering with
// the local file as a text diff; Delete only forgets local tracking.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use cxsync_api::SwitchClient;

use super::{Action, Outcome, Tracked};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CoreError;
use crate::model::FullConfig;
use crate::normalize::{canonical_config, canonical_config_text, config_diff, fnv1_32};

/// Content-derived identifier of a configuration text.
pub fn config_id(config: &str) -> String {
    fnv1_32(config.as_bytes()).to_string()
}

/// Read and parse the local file as the document to push.
fn load_local(path: &Path) -> Result<Value, CoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| CoreError::ValidationFailed {
        message: format!("{} is not a JSON configuration: {e}", path.display()),
    })
}

/// Canonical local text; an unreadable file compares as empty.
fn local_text(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => canonical_config_text(&text),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "local config unreadable, diffing against empty");
            String::new()
        }
    }
}

fn failed(tracked: Tracked<FullConfig>, summary: &str, err: &CoreError) -> Outcome<FullConfig> {
    Outcome {
        action: Action::Failed,
        tracked,
        diagnostics: Diagnostic::error(summary, err.to_string()).into(),
    }
}

async fn push(client: &SwitchClient, path: &Path) -> Result<String, CoreError> {
    let local = load_local(path)?;
    client.put_running_config(&local).await?;
    let device = client.get_running_config().await?;
    Ok(canonical_config(&device))
}

/// Push the local file and track the resulting running configuration.
pub async fn create(client: &SwitchClient, desired: &FullConfig) -> Outcome<FullConfig> {
    let mut tracked = Tracked::unbound(FullConfig::new(desired.filename.clone()));
    let config = match push(client, &desired.filename).await {
        Ok(config) => config,
        Err(e) => {
            return failed(tracked, "Error in Creating FullConfig", &e);
        }
    };

    tracked.id = Some(config_id(&config));
    tracked.state.config = config;
    let diagnostics = read(client, &mut tracked).await;
    info!(id = ?tracked.id, "running-config pushed");
    Outcome {
        action: Action::Created,
        tracked,
        diagnostics,
    }
}

/// Refresh the switch rendering and the diff against the local file.
pub async fn read(client: &SwitchClient, tracked: &mut Tracked<FullConfig>) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match client.get_running_config().await {
        Ok(device) => {
            let config = canonical_config(&device);
            tracked.state.diff = config_diff(&config, &local_text(&tracked.state.filename));
            tracked.state.config = config;
        }
        Err(e) => {
            warn!(error = %e, "running-config not readable");
            tracked.id = None;
            diagnostics.warn(
                "Config Not Found",
                tracked.state.filename.display().to_string(),
            );
        }
    }
    diagnostics
}

/// Re-push the local file when anything tracked has moved.
///
/// Pushes when the filename changed, the switch drifted from the tracked
/// config, or the local file differs from the switch.
pub async fn update(
    client: &SwitchClient,
    tracked: Tracked<FullConfig>,
    desired: &FullConfig,
) -> Outcome<FullConfig> {
    let device = match client.get_running_config().await {
        Ok(device) => canonical_config(&device),
        Err(e) => {
            return failed(tracked, "Error in Retrieving FullConfig", &e.into());
        }
    };

    let fresh = FullConfig {
        filename: desired.filename.clone(),
        diff: config_diff(&device, &local_text(&desired.filename)),
        config: device,
    };
    if fresh == tracked.state && fresh.diff.is_empty() {
        debug!("running-config already matches local file");
        return Outcome {
            action: Action::Unchanged,
            tracked: Tracked {
                id: Some(config_id(&fresh.config)),
                state: fresh,
            },
            diagnostics: Diagnostics::new(),
        };
    }

    let config = match push(client, &desired.filename).await {
        Ok(config) => config,
        Err(e) => return failed(tracked, "Error in Updating FullConfig", &e),
    };

    let mut tracked = Tracked {
        id: Some(config_id(&config)),
        state: FullConfig {
            filename: desired.filename.clone(),
            config,
            diff: String::new(),
        },
    };
    let diagnostics = read(client, &mut tracked).await;
    info!(id = ?tracked.id, "running-config re-pushed");
    Outcome {
        action: Action::Updated,
        tracked,
        diagnostics,
    }
}

/// Forget the tracked configuration. The switch is not touched.
pub fn delete(mut tracked: Tracked<FullConfig>) -> Outcome<FullConfig> {
    debug!(filename = %tracked.state.filename.display(), "dropping running-config tracking");
    tracked.id = None;
    tracked.state = FullConfig::default();
    Outcome {
        action: Action::Deleted,
        tracked,
        diagnostics: Diagnostics::new(),
    }
}

/// Refresh, then push when the local file and the switch disagree.
pub async fn apply(client: &SwitchClient, desired: &FullConfig) -> Outcome<FullConfig> {
    let mut tracked = Tracked::unbound(FullConfig::new(desired.filename.clone()));
    let mut diagnostics = read(client, &mut tracked).await;
    if diagnostics.is_empty() {
        tracked.id = Some(config_id(&tracked.state.config));
    }

    let mut outcome = update(client, tracked, desired).await;
    diagnostics.extend(outcome.diagnostics);
    outcome.diagnostics = diagnostics;
    outcome
}

/// Refresh only: the switch rendering plus its diff to the local file.
pub async fn diff(client: &SwitchClient, filename: &Path) -> Outcome<FullConfig> {
    let mut tracked = Tracked::unbound(FullConfig::new(filename));
    let diagnostics = read(client, &mut tracked).await;
    let action = if diagnostics.is_empty() {
        tracked.id = Some(config_id(&tracked.state.config));
        Action::Refreshed
    } else {
        Action::Failed
    };
    Outcome {
        action,
        tracked,
        diagnostics,
    }
}
