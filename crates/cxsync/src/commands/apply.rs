//! `apply` and `plan`: reconcile a whole manifest.
//!
//! Resources run in declaration order on one session. A failing resource
//! is reported and the run continues with the next one.

use std::path::Path;

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use cxsync_core::engine::{self, full_config};
use cxsync_core::{
    Action, DesiredResource, Diagnostic, Diagnostics, Manifest, Outcome, Plan, SwitchClient,
    SwitchResource,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util::{kind_name, to_value};

// ── Manifest loading ────────────────────────────────────────────────

/// Parse a manifest; `.json` files as JSON, anything else as YAML.
///
/// Relative `full_config` filenames resolve against the manifest's
/// directory.
pub fn load_manifest(path: &Path) -> Result<Manifest, CliError> {
    let invalid = |reason: String| CliError::Manifest {
        path: path.display().to_string(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut manifest: Manifest = if is_json {
        serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?
    } else {
        serde_yaml::from_str(&text).map_err(|e| invalid(e.to_string()))?
    };

    if manifest.is_empty() {
        return Err(invalid("no resources declared".into()));
    }
    if let Some(base) = path.parent() {
        manifest.resolve_paths(base);
    }
    tracing::debug!(path = %path.display(), resources = manifest.len(), "manifest loaded");
    Ok(manifest)
}

// ── Reports ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ResourceReport {
    kind: &'static str,
    key: String,
    action: Action,
    id: Option<String>,
    diagnostics: Diagnostics,
    state: Value,
}

impl ResourceReport {
    fn new<R: Serialize>(resource: &DesiredResource, outcome: Outcome<R>) -> Self {
        Self {
            kind: kind_name(resource.kind()),
            key: resource.key(),
            action: outcome.action,
            id: outcome.tracked.id,
            state: to_value(&outcome.tracked.state),
            diagnostics: outcome.diagnostics,
        }
    }
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&ResourceReport> for ResourceRow {
    fn from(r: &ResourceReport) -> Self {
        Self {
            kind: r.kind,
            key: r.key.clone(),
            action: r.action.to_string(),
            id: r.id.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct PlanReport {
    kind: &'static str,
    key: String,
    change: &'static str,
    method: Option<String>,
    fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    diff: String,
}

impl PlanReport {
    fn new(resource: &DesiredResource, change: &'static str) -> Self {
        Self {
            kind: kind_name(resource.kind()),
            key: resource.key(),
            change,
            method: None,
            fields: Vec::new(),
            error: None,
            diff: String::new(),
        }
    }
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Change")]
    change: &'static str,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Fields")]
    fields: String,
}

impl From<&PlanReport> for PlanRow {
    fn from(r: &PlanReport) -> Self {
        Self {
            kind: r.kind,
            key: r.key.clone(),
            change: r.change,
            method: r.method.clone().unwrap_or_else(|| "-".into()),
            fields: if r.fields.is_empty() {
                "-".into()
            } else {
                r.fields.join(", ")
            },
        }
    }
}

// ── Apply ───────────────────────────────────────────────────────────

async fn apply_one(client: &SwitchClient, resource: &DesiredResource) -> ResourceReport {
    match resource {
        DesiredResource::Vlan(r) => ResourceReport::new(resource, engine::apply(client, r).await),
        DesiredResource::Interface(r) => {
            ResourceReport::new(resource, engine::apply(client, r).await)
        }
        DesiredResource::L2Interface(r) => {
            ResourceReport::new(resource, engine::apply(client, r).await)
        }
        DesiredResource::L3Interface(r) => {
            ResourceReport::new(resource, engine::apply(client, r).await)
        }
        DesiredResource::VlanInterface(r) => {
            ResourceReport::new(resource, engine::apply(client, r).await)
        }
        DesiredResource::FullConfig(r) => {
            ResourceReport::new(resource, full_config::apply(client, r).await)
        }
    }
}

/// Converge every manifest resource and print one row per resource.
pub async fn apply(
    client: &SwitchClient,
    manifest: &Manifest,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut reports = Vec::with_capacity(manifest.len());

    for resource in &manifest.resources {
        let report = apply_one(client, resource).await;
        let context = format!("{} {}", report.kind, report.key);
        output::print_diagnostics(&context, &report.diagnostics, color, global.quiet);
        reports.push(report);
    }

    let out = output::render_list(&global.output, &reports, |r| ResourceRow::from(r), |r| {
        format!("{} {} {}", r.kind, r.key, r.action)
    });
    output::print_output(&out, global.quiet);

    let failed = reports.iter().filter(|r| r.action == Action::Failed).count();
    if !global.quiet {
        eprintln!("{}", summary(&reports, color));
    }
    if failed > 0 {
        return Err(CliError::Reconcile {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

/// One-line tally of the actions taken.
fn summary(reports: &[ResourceReport], color: bool) -> String {
    let count = |action: Action| reports.iter().filter(|r| r.action == action).count();
    let failed = count(Action::Failed);
    let failed_text = format!("{failed} failed");
    let failed_text = if color && failed > 0 {
        failed_text.red().to_string()
    } else {
        failed_text
    };
    format!(
        "{} resource(s): {} created, {} adopted, {} updated, {} unchanged, {failed_text}",
        reports.len(),
        count(Action::Created),
        count(Action::Adopted),
        count(Action::Updated),
        count(Action::Unchanged),
    )
}

// ── Plan ────────────────────────────────────────────────────────────

async fn plan_resource<R: SwitchResource>(
    client: &SwitchClient,
    resource: &DesiredResource,
    desired: &R,
) -> PlanReport {
    match engine::plan(client, desired).await {
        Ok(Plan::Create { .. }) => PlanReport::new(resource, "create"),
        Ok(Plan::Update { patch, mode, .. }) => PlanReport {
            method: Some(format!("{mode:?}").to_uppercase()),
            fields: patch.fields().map(str::to_owned).collect(),
            ..PlanReport::new(resource, "update")
        },
        Ok(Plan::NoChange { .. }) => PlanReport::new(resource, "none"),
        Err(e) => PlanReport {
            error: Some(e.to_string()),
            ..PlanReport::new(resource, "error")
        },
    }
}

async fn plan_one(client: &SwitchClient, resource: &DesiredResource) -> PlanReport {
    match resource {
        DesiredResource::Vlan(r) => plan_resource(client, resource, r).await,
        DesiredResource::Interface(r) => plan_resource(client, resource, r).await,
        DesiredResource::L2Interface(r) => plan_resource(client, resource, r).await,
        DesiredResource::L3Interface(r) => plan_resource(client, resource, r).await,
        DesiredResource::VlanInterface(r) => plan_resource(client, resource, r).await,
        DesiredResource::FullConfig(r) => {
            let outcome = full_config::diff(client, &r.filename).await;
            if outcome.action == Action::Failed {
                let error = outcome
                    .diagnostics
                    .iter()
                    .map(Diagnostic::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                PlanReport {
                    error: Some(error),
                    ..PlanReport::new(resource, "error")
                }
            } else if outcome.tracked.state.diff.is_empty() {
                PlanReport::new(resource, "none")
            } else {
                PlanReport {
                    method: Some("PUT".into()),
                    fields: vec!["config".into()],
                    diff: outcome.tracked.state.diff,
                    ..PlanReport::new(resource, "update")
                }
            }
        }
    }
}

/// Show what `apply` would change. Nothing is written.
pub async fn plan(
    client: &SwitchClient,
    manifest: &Manifest,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut reports = Vec::with_capacity(manifest.len());
    for resource in &manifest.resources {
        let report = plan_one(client, resource).await;
        if let Some(ref error) = report.error {
            let context = format!("{} {}", report.kind, report.key);
            let diagnostic = Diagnostic::error(error.clone(), String::new());
            output::print_diagnostics(&context, &diagnostic.into(), color, global.quiet);
        }
        reports.push(report);
    }

    let out = output::render_list(&global.output, &reports, |r| PlanRow::from(r), |r| {
        format!("{} {} {}", r.kind, r.key, r.change)
    });
    output::print_output(&out, global.quiet);

    // Running-config diffs don't fit a table cell
    if matches!(global.output, crate::cli::OutputFormat::Table) {
        for report in reports.iter().filter(|r| !r.diff.is_empty()) {
            output::print_output(&report.diff, global.quiet);
        }
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::Reconcile {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use cxsync_core::ResourceKind;

    use super::*;

    #[test]
    fn yaml_manifest_resolves_full_config_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        std::fs::write(
            &path,
            "resources:\n  - kind: vlan\n    vlan_id: 100\n    name: eng\n  \
             - kind: full_config\n    filename: running.json\n",
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.len(), 2);
        let DesiredResource::FullConfig(ref config) = manifest.resources[1] else {
            panic!("expected full_config");
        };
        assert_eq!(config.filename, dir.path().join(PathBuf::from("running.json")));
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"resources": []}"#).unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, CliError::Manifest { .. }));
    }

    #[test]
    fn summary_counts_actions() {
        let report = |action| ResourceReport {
            kind: kind_name(ResourceKind::Vlan),
            key: "100".into(),
            action,
            id: None,
            diagnostics: Diagnostics::new(),
            state: Value::Null,
        };
        let reports = [
            report(Action::Created),
            report(Action::Unchanged),
            report(Action::Failed),
        ];
        assert_eq!(
            summary(&reports, false),
            "3 resource(s): 1 created, 0 adopted, 0 updated, 1 unchanged, 1 failed"
        );
    }
}
