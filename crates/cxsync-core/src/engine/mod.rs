// ── Reconciliation engine ──
//
// Lifecycle operations shared by every `SwitchResource`:
//
// - `create`: existence-aware create. A create that does not materialize
//   (the object already exists) is adopted: read it, warn, converge it to
//   the desired values. Then bind the caller's key and re-read.
// - `read`: refresh from the switch. Any failure unbinds with a warning.
// - `update`: diff desired against a fresh read into a `PatchSet` and
//   write only when it is non-empty, PATCH or PUT per kind policy.
// - `delete`: remove and unbind. 404 is an error, not a no-op.
//
// Every step is a sequence of awaited calls on the caller's client. Errors
// come back as `Diagnostics`; nothing is retried or rolled back.

pub mod full_config;

use serde::Serialize;
use tracing::{debug, info, warn};

use cxsync_api::{SwitchClient, WriteMode};

use crate::diagnostics::Diagnostics;
use crate::error::CoreError;
use crate::model::ResourceKind;
use crate::patch::PatchSet;
use crate::resource::SwitchResource;

// ── Tracked state ───────────────────────────────────────────────────

/// A record plus the identifier of the switch object it is bound to.
///
/// `id == None` means the host no longer tracks an object for this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tracked<R> {
    pub id: Option<String>,
    pub state: R,
}

impl<R> Tracked<R> {
    pub fn unbound(state: R) -> Self {
        Self { id: None, state }
    }

    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }
}

impl<R: SwitchResource> Tracked<R> {
    pub fn bound(state: R) -> Self {
        Self {
            id: Some(state.id()),
            state,
        }
    }
}

/// What a lifecycle step did to the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Created,
    Adopted,
    Updated,
    Unchanged,
    Deleted,
    Refreshed,
    Failed,
}

/// Result of a lifecycle step: the tracked record after the step, what
/// happened, and the diagnostics for the host.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<R> {
    pub action: Action,
    pub tracked: Tracked<R>,
    pub diagnostics: Diagnostics,
}

impl<R> Outcome<R> {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_ok()
    }

    fn failed(tracked: Tracked<R>, mut diagnostics: Diagnostics, err: &CoreError) -> Self {
        diagnostics.push_error(err);
        Self {
            action: Action::Failed,
            tracked,
            diagnostics,
        }
    }
}

/// What `apply` would do, computed without writing.
#[derive(Debug, Clone)]
pub enum Plan<R> {
    Create {
        desired: R,
    },
    Update {
        current: R,
        desired: R,
        patch: PatchSet,
        mode: WriteMode,
    },
    NoChange {
        current: R,
    },
}

// ── Status classification ───────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum WriteStep {
    Update,
    Delete,
}

/// Map a failed write to the reconciliation error for that step.
fn classify_write(
    kind: ResourceKind,
    key: &str,
    step: WriteStep,
    err: cxsync_api::Error,
) -> CoreError {
    let key = key.to_owned();
    match (err.status(), step) {
        (Some(404), _) => CoreError::DoesNotExist {
            kind,
            key,
            status: 404,
        },
        (Some(status), WriteStep::Update) => CoreError::UpdateFailed {
            kind,
            key,
            status,
        },
        (Some(status), WriteStep::Delete) => CoreError::DeleteFailed {
            kind,
            key,
            status,
        },
        (None, _) => err.into(),
    }
}

fn prepare<R: SwitchResource>(desired: &R) -> Result<R, CoreError> {
    let desired = desired.clone().normalized();
    desired.validate()?;
    Ok(desired)
}

/// Write the patch between `current` and `desired`, if there is one.
///
/// Returns the verb used, or `None` when already converged.
async fn converge<R: SwitchResource>(
    client: &SwitchClient,
    current: &R,
    desired: &R,
) -> Result<Option<WriteMode>, CoreError> {
    let patch = PatchSet::diff(current, desired)?;
    if patch.is_empty() {
        debug!(kind = %R::KIND, key = %desired.key(), "already converged");
        return Ok(None);
    }

    let mode = WriteMode::from_use_put(R::requires_replace(&patch));
    debug!(
        kind = %R::KIND,
        key = %desired.key(),
        fields = ?patch.fields().collect::<Vec<_>>(),
        ?mode,
        "writing patch set"
    );
    let merged = patch.apply(current)?;
    merged
        .update(client, mode)
        .await
        .map_err(|e| classify_write(R::KIND, &desired.key(), WriteStep::Update, e))?;
    Ok(Some(mode))
}

// ── Lifecycle operations ────────────────────────────────────────────

/// Existence-aware create (create-or-adopt).
pub async fn create<R: SwitchResource>(client: &SwitchClient, desired: &R) -> Outcome<R> {
    let mut diagnostics = Diagnostics::new();
    let desired = match prepare(desired) {
        Ok(d) => d,
        Err(e) => return Outcome::failed(Tracked::unbound(desired.clone()), diagnostics, &e),
    };
    let key = desired.key();

    if let Err(e) = desired.prerequisites(client).await {
        return Outcome::failed(Tracked::unbound(desired), diagnostics, &e);
    }

    let status = match desired.create(client).await {
        Ok(status) => status,
        Err(e) => return Outcome::failed(Tracked::unbound(desired), diagnostics, &e.into()),
    };

    let mut action = Action::Created;
    if !status.is_materialized() {
        let current = match desired.get(client).await {
            Ok(current) => current,
            Err(e) => {
                let err = CoreError::CreateContradiction {
                    kind: R::KIND,
                    key,
                    reason: e.to_string(),
                };
                return Outcome::failed(Tracked::unbound(desired), diagnostics, &err);
            }
        };

        warn!(kind = %R::KIND, key = %key, "already existing, adopting");
        diagnostics.warn(format!("{} Already Existing", R::KIND), key.clone());
        action = Action::Adopted;

        // No rollback: the object stays adopted but unconverged.
        if let Err(e) = converge(client, &current, &desired).await {
            return Outcome::failed(Tracked::unbound(desired), diagnostics, &e);
        }
    }

    let mut tracked = Tracked::bound(desired);
    diagnostics.extend(read(client, &mut tracked).await);
    info!(kind = %R::KIND, id = ?tracked.id, %action, "create finished");
    Outcome {
        action,
        tracked,
        diagnostics,
    }
}

/// Refresh `tracked` from the switch.
///
/// Any retrieval failure, including a transport error, unbinds the record
/// and yields a `<Kind> Not Found` warning.
pub async fn read<R: SwitchResource>(
    client: &SwitchClient,
    tracked: &mut Tracked<R>,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match tracked.state.get(client).await {
        Ok(state) => tracked.state = state,
        Err(e) => {
            let key = tracked.state.key();
            warn!(kind = %R::KIND, key = %key, error = %e, "not found on read");
            tracked.id = None;
            diagnostics.warn(format!("{} Not Found", R::KIND), key);
        }
    }
    diagnostics
}

/// Converge the object behind `tracked` to `desired`.
pub async fn update<R: SwitchResource>(
    client: &SwitchClient,
    mut tracked: Tracked<R>,
    desired: &R,
) -> Outcome<R> {
    let mut diagnostics = Diagnostics::new();
    let desired = match prepare(desired) {
        Ok(d) => d,
        Err(e) => return Outcome::failed(tracked, diagnostics, &e),
    };

    let key = desired.key();
    if key != tracked.state.key() {
        let err = CoreError::KeyChanged {
            kind: R::KIND,
            tracked: tracked.state.key(),
            desired: key,
        };
        return Outcome::failed(tracked, diagnostics, &err);
    }

    if let Err(e) = desired.prerequisites(client).await {
        return Outcome::failed(tracked, diagnostics, &e);
    }

    let current = match tracked.state.get(client).await {
        Ok(current) => current,
        Err(e) => {
            let not_found = e.is_not_found();
            let err = classify_write(R::KIND, &key, WriteStep::Update, e);
            if not_found {
                tracked.id = None;
            }
            return Outcome::failed(tracked, diagnostics, &err);
        }
    };

    let action = match converge(client, &current, &desired).await {
        Ok(Some(_)) => Action::Updated,
        Ok(None) => Action::Unchanged,
        Err(e) => {
            if e.is_not_found() {
                tracked.id = None;
            }
            return Outcome::failed(tracked, diagnostics, &e);
        }
    };

    let mut tracked = Tracked::bound(desired);
    diagnostics.extend(read(client, &mut tracked).await);
    info!(kind = %R::KIND, key = %key, %action, "update finished");
    Outcome {
        action,
        tracked,
        diagnostics,
    }
}

/// Delete the object behind `tracked` and unbind it.
pub async fn delete<R: SwitchResource>(
    client: &SwitchClient,
    mut tracked: Tracked<R>,
) -> Outcome<R> {
    let key = tracked.state.key();
    match tracked.state.delete(client).await {
        Ok(()) => {
            tracked.id = None;
            info!(kind = %R::KIND, key = %key, "deleted");
            Outcome {
                action: Action::Deleted,
                tracked,
                diagnostics: Diagnostics::new(),
            }
        }
        Err(e) => {
            if e.is_not_found() {
                tracked.id = None;
            }
            let err = classify_write(R::KIND, &key, WriteStep::Delete, e);
            Outcome::failed(tracked, Diagnostics::new(), &err)
        }
    }
}

// ── Host conveniences ───────────────────────────────────────────────

/// Fetch the object addressed by `key` as a bound record.
pub async fn get<R: SwitchResource>(
    client: &SwitchClient,
    key: &str,
) -> Result<Tracked<R>, CoreError> {
    let probe = R::from_key(key)?;
    match probe.get(client).await {
        Ok(state) => Ok(Tracked::bound(state)),
        Err(e) if e.is_not_found() => Err(CoreError::DoesNotExist {
            kind: R::KIND,
            key: probe.key(),
            status: 404,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Compute what [`apply`] would send, without writing.
pub async fn plan<R: SwitchResource>(
    client: &SwitchClient,
    desired: &R,
) -> Result<Plan<R>, CoreError> {
    let desired = prepare(desired)?;
    match desired.get(client).await {
        Ok(current) => {
            let patch = PatchSet::diff(&current, &desired)?;
            if patch.is_empty() {
                Ok(Plan::NoChange { current })
            } else {
                let mode = WriteMode::from_use_put(R::requires_replace(&patch));
                Ok(Plan::Update {
                    current,
                    desired,
                    patch,
                    mode,
                })
            }
        }
        Err(e) if e.is_not_found() => Ok(Plan::Create { desired }),
        Err(e) => Err(e.into()),
    }
}

/// Read; create when absent, update when present.
pub async fn apply<R: SwitchResource>(client: &SwitchClient, desired: &R) -> Outcome<R> {
    match desired.get(client).await {
        Ok(current) => update(client, Tracked::bound(current), desired).await,
        Err(e) if e.is_not_found() => create(client, desired).await,
        Err(e) => Outcome::failed(
            Tracked::unbound(desired.clone()),
            Diagnostics::new(),
            &e.into(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(method: &'static str, status: u16) -> cxsync_api::Error {
        cxsync_api::Error::Status {
            method,
            path: "/rest/v10.09/system/vlans/100".into(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn classify_keeps_raw_status() {
        let err = classify_write(
            ResourceKind::Vlan,
            "100",
            WriteStep::Update,
            status_error("PATCH", 500),
        );
        assert!(matches!(err, CoreError::UpdateFailed { status: 500, .. }));
        assert_eq!(
            err.to_string(),
            "Error in updating VLAN 100: 500 Internal Server Error"
        );

        let err = classify_write(
            ResourceKind::Vlan,
            "100",
            WriteStep::Delete,
            status_error("DELETE", 409),
        );
        assert!(matches!(err, CoreError::DeleteFailed { status: 409, .. }));
    }

    #[test]
    fn classify_not_found_for_any_step() {
        for step in [WriteStep::Update, WriteStep::Delete] {
            let err = classify_write(ResourceKind::Vlan, "100", step, status_error("GET", 404));
            assert!(matches!(err, CoreError::DoesNotExist { status: 404, .. }));
            assert!(err.is_not_found());
        }
    }
}
