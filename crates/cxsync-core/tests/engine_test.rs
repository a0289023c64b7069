#![allow(clippy::unwrap_used)]
// Lifecycle tests for the reconciliation engine against a wiremock switch.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cxsync_api::{SwitchClient, TransportConfig};
use cxsync_core::engine::{self, full_config};
use cxsync_core::{
    Action, AdminState, CoreError, FullConfig, L2Interface, L3Interface, Plan, Severity, Tracked, Vlan,
    VlanInterface, VlanMode,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SwitchClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = SwitchClient::new(base_url, "v10.09", &TransportConfig::default()).unwrap();
    (server, client)
}

fn rest_path(suffix: &str) -> String {
    format!("/rest/v10.09/{suffix}")
}

fn vlan_body(id: u16, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "description": "", "admin": "up", "type": "static" })
}

/// Fail the test if any write verb reaches the switch.
async fn forbid_writes(server: &MockServer) {
    for verb in ["POST", "PATCH", "PUT", "DELETE"] {
        Mock::given(method(verb))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .named(format!("no {verb}"))
            .mount(server)
            .await;
    }
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_new_vlan() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("system/vlans")))
        .and(body_partial_json(json!({ "id": 20, "name": "voice", "type": "static" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/20")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(20, "voice")))
        .mount(&server)
        .await;

    let outcome = engine::create(&client, &Vlan::new(20, "voice")).await;

    assert_eq!(outcome.action, Action::Created);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.tracked.id.as_deref(), Some("20"));
    assert_eq!(outcome.tracked.state, Vlan::new(20, "voice"));
}

#[tokio::test]
async fn test_create_adopts_existing_vlan_and_converges() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("system/vlans")))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    // First read (adopt) sees the old name; the re-read after PATCH sees the new one.
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "old")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(rest_path("system/vlans/100")))
        .and(body_partial_json(json!({ "name": "eng" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "eng")))
        .mount(&server)
        .await;

    let outcome = engine::create(&client, &Vlan::new(100, "eng")).await;

    assert_eq!(outcome.action, Action::Adopted);
    assert!(outcome.is_ok());
    let warnings: Vec<_> = outcome.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].summary, "VLAN Already Existing");
    assert_eq!(warnings[0].detail, "100");
    assert_eq!(outcome.tracked.id.as_deref(), Some("100"));
    assert_eq!(outcome.tracked.state.name, "eng");
}

fn access_port_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": "",
        "routing": false,
        "user_config": { "admin": "up" },
        "vlan_mode": "access",
        "vlan_tag": { "1": "/rest/v10.09/system/vlans/1" },
    })
}

#[tokio::test]
async fn test_create_adopts_existing_port_as_l2_trunk() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("system/interfaces")))
        .and(body_partial_json(json!({ "name": "1/1/4", "vlan_mode": "native-untagged" })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F4")))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_port_body("1/1/4")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(rest_path("system/interfaces/1%2F1%2F4")))
        .and(body_partial_json(json!({
            "routing": false,
            "vlan_mode": "native-untagged",
            "vlan_tag": { "10": "/rest/v10.09/system/vlans/10" },
            "vlan_trunks": {
                "10": "/rest/v10.09/system/vlans/10",
                "30": "/rest/v10.09/system/vlans/30",
            },
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F4")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "1/1/4",
            "description": "",
            "routing": false,
            "user_config": { "admin": "up" },
            "vlan_mode": "native-untagged",
            "vlan_tag": { "10": "/rest/v10.09/system/vlans/10" },
            "vlan_trunks": {
                "10": "/rest/v10.09/system/vlans/10",
                "30": "/rest/v10.09/system/vlans/30",
            },
        })))
        .mount(&server)
        .await;

    let desired = L2Interface::trunk("1/1/4", 10, [30, 10]);
    let outcome = engine::create(&client, &desired).await;

    assert_eq!(outcome.action, Action::Adopted, "{:?}", outcome.diagnostics);
    assert!(outcome.is_ok());
    let warnings: Vec<_> = outcome.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].summary, "Interface Already Existing");
    assert_eq!(warnings[0].detail, "1/1/4");
    assert_eq!(outcome.tracked.id.as_deref(), Some("1/1/4"));
    assert_eq!(outcome.tracked.state, desired);
}

#[tokio::test]
async fn test_create_adopts_existing_port_as_l3_with_canonical_addresses() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("system/interfaces")))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_port_body("1/1/7")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // Secondaries leave sorted even though they were declared out of order.
    Mock::given(method("PUT"))
        .and(path(rest_path("system/interfaces/1%2F1%2F7")))
        .and(body_partial_json(json!({
            "routing": true,
            "ip4_address": "10.0.0.1/24",
            "ip4_address_secondary": ["10.0.1.1/24", "10.0.2.1/24"],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "1/1/7",
            "description": "",
            "routing": true,
            "user_config": { "admin": "up" },
            "ip4_address": "10.0.0.1/24",
            "ip4_address_secondary": ["10.0.1.1/24", "10.0.2.1/24"],
            "vrf": { "default": "/rest/v10.09/system/vrfs/default" },
        })))
        .mount(&server)
        .await;

    let mut desired = L3Interface::new("1/1/7");
    desired.ipv4 = vec![
        "10.0.0.1/24".into(),
        "10.0.2.1/24".into(),
        "10.0.1.1/24".into(),
    ];
    let outcome = engine::create(&client, &desired).await;

    assert_eq!(outcome.action, Action::Adopted, "{:?}", outcome.diagnostics);
    let warnings: Vec<_> = outcome.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].summary, "Interface Already Existing");
    assert_eq!(warnings[0].detail, "1/1/7");
    assert_eq!(outcome.tracked.id.as_deref(), Some("1/1/7"));
    // The read-back equals the canonical form of what was declared.
    assert_eq!(
        outcome.tracked.state.ipv4,
        vec!["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24"]
    );
}

#[tokio::test]
async fn test_create_contradiction_is_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(rest_path("system/vlans")))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/30")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = engine::create(&client, &Vlan::new(30, "lab")).await;

    assert_eq!(outcome.action, Action::Failed);
    assert!(!outcome.tracked.is_bound());
    let errors: Vec<_> = outcome.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].summary.contains("reported as existing but not readable"),
        "unexpected summary: {}",
        errors[0].summary
    );
}

#[tokio::test]
async fn test_create_rejects_out_of_range_vlan_without_calls() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    let outcome = engine::create(&client, &Vlan::new(4095, "bad")).await;

    assert_eq!(outcome.action, Action::Failed);
    assert!(outcome.diagnostics.has_errors());
}

#[tokio::test]
async fn test_vlan_interface_requires_its_vlan() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut svi = VlanInterface::new(100);
    svi.ipv4 = vec!["10.100.0.1/24".into()];
    let outcome = engine::create(&client, &svi).await;

    assert_eq!(outcome.action, Action::Failed);
    let error = outcome.diagnostics.errors().next().unwrap();
    assert!(error.summary.contains("VLAN 100 missing"), "{}", error.summary);
}

#[tokio::test]
async fn test_vlan_interface_create_tracks_prefixed_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "eng")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(rest_path("system/interfaces")))
        .and(body_partial_json(json!({
            "name": "vlan100",
            "type": "vlan",
            "ip4_address": "10.100.0.1/24",
            "vlan_tag": { "100": "/rest/v10.09/system/vlans/100" },
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/vlan100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vlan100",
            "type": "vlan",
            "user_config": { "admin": "up" },
            "vlan_tag": { "100": "/rest/v10.09/system/vlans/100" },
            "ip4_address": "10.100.0.1/24",
            "ip4_address_secondary": [],
            "vrf": { "default": "/rest/v10.09/system/vrfs/default" },
        })))
        .mount(&server)
        .await;

    let mut svi = VlanInterface::new(100);
    svi.ipv4 = vec!["10.100.0.1/24".into()];
    let outcome = engine::create(&client, &svi).await;

    assert_eq!(outcome.action, Action::Created, "{:?}", outcome.diagnostics);
    assert_eq!(outcome.tracked.id.as_deref(), Some("vlanint_100"));
    assert_eq!(outcome.tracked.state, svi);
}

// ── Read ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_missing_object_unbinds_with_warning() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut tracked = Tracked::bound(Vlan::new(100, "eng"));
    let diagnostics = engine::read(&client, &mut tracked).await;

    assert!(diagnostics.is_ok());
    let warning = diagnostics.iter().next().unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.summary, "VLAN Not Found");
    assert_eq!(tracked.id, None);
}

#[tokio::test]
async fn test_read_folds_device_admin_state() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "mgmt", "admin": "DOWN"
        })))
        .mount(&server)
        .await;

    let mut tracked = Tracked::bound(Vlan::new(7, ""));
    let diagnostics = engine::read(&client, &mut tracked).await;

    assert!(diagnostics.is_empty());
    assert_eq!(tracked.state.admin_state, AdminState::Down);
    assert_eq!(tracked.state.name, "mgmt");
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_is_idempotent() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "eng")))
        .mount(&server)
        .await;

    let desired = Vlan::new(100, "eng");
    for _ in 0..2 {
        let outcome = engine::apply(&client, &desired).await;
        assert_eq!(outcome.action, Action::Unchanged);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.tracked.state, desired);
    }
}

#[tokio::test]
async fn test_update_not_found_is_does_not_exist() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "old")))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tracked = Tracked::bound(Vlan::new(100, "old"));
    let outcome = engine::update(&client, tracked, &Vlan::new(100, "eng")).await;

    assert_eq!(outcome.action, Action::Failed);
    assert_eq!(outcome.tracked.id, None);
    let error = outcome.diagnostics.errors().next().unwrap();
    assert_eq!(error.summary, "VLAN 100 does not exist: 404 Not Found");
}

#[tokio::test]
async fn test_update_other_status_is_update_failed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "old")))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tracked = Tracked::bound(Vlan::new(100, "old"));
    let outcome = engine::update(&client, tracked, &Vlan::new(100, "eng")).await;

    assert_eq!(outcome.action, Action::Failed);
    assert_eq!(outcome.tracked.id.as_deref(), Some("100"));
    let error = outcome.diagnostics.errors().next().unwrap();
    assert_eq!(
        error.summary,
        "Error in updating VLAN 100: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_update_rejects_changed_key() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    let tracked = Tracked::bound(Vlan::new(100, "eng"));
    let outcome = engine::update(&client, tracked, &Vlan::new(101, "eng")).await;

    assert_eq!(outcome.action, Action::Failed);
    assert_eq!(outcome.tracked.id.as_deref(), Some("100"));
}

#[tokio::test]
async fn test_l3_address_order_is_a_fixed_point() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "1/1/3",
            "routing": true,
            "user_config": { "admin": "up" },
            "ip4_address": "10.0.0.1/24",
            "ip4_address_secondary": ["10.0.1.1/24", "10.0.2.1/24"],
            "vrf": { "default": "/rest/v10.09/system/vrfs/default" },
        })))
        .mount(&server)
        .await;

    let mut desired = L3Interface::new("1/1/3");
    desired.ipv4 = vec![
        "10.0.0.1/24".into(),
        "10.0.2.1/24".into(),
        "10.0.1.1/24".into(),
    ];

    let outcome = engine::apply(&client, &desired).await;

    assert_eq!(outcome.action, Action::Unchanged, "{:?}", outcome.diagnostics);
    assert_eq!(
        outcome.tracked.state.ipv4,
        vec!["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24"]
    );
}

#[tokio::test]
async fn test_l2_mode_change_replaces_with_put() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "1/1/2",
            "routing": false,
            "user_config": { "admin": "up" },
            "vlan_mode": "access",
            "vlan_tag": { "1": "/rest/v10.09/system/vlans/1" },
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(rest_path("system/interfaces/1%2F1%2F2")))
        .and(body_partial_json(json!({
            "routing": false,
            "vlan_mode": "native-tagged",
            "vlan_tag": { "10": "/rest/v10.09/system/vlans/10" },
            "vlan_trunks": {
                "10": "/rest/v10.09/system/vlans/10",
                "20": "/rest/v10.09/system/vlans/20",
            },
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/interfaces/1%2F1%2F2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "1/1/2",
            "routing": false,
            "user_config": { "admin": "up" },
            "vlan_mode": "native-tagged",
            "vlan_tag": { "10": "/rest/v10.09/system/vlans/10" },
            "vlan_trunks": {
                "10": "/rest/v10.09/system/vlans/10",
                "20": "/rest/v10.09/system/vlans/20",
            },
        })))
        .mount(&server)
        .await;

    let mut desired = L2Interface::trunk("1/1/2", 10, [10, 20]);
    desired.native_vlan_tag = true;

    let outcome = engine::apply(&client, &desired).await;

    assert_eq!(outcome.action, Action::Updated, "{:?}", outcome.diagnostics);
    let state = &outcome.tracked.state;
    assert_eq!(state.vlan_mode, VlanMode::Trunk);
    assert!(state.native_vlan_tag);
    assert_eq!(state.vlan_tag, 10);
    assert_eq!(state.vlan_ids, BTreeSet::from([10, 20]));
    assert_eq!(state, &desired);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_then_read_warns_without_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = engine::delete(&client, Tracked::bound(Vlan::new(100, "eng"))).await;
    assert_eq!(outcome.action, Action::Deleted);
    assert_eq!(outcome.tracked.id, None);
    assert!(outcome.diagnostics.is_empty());

    let mut tracked = outcome.tracked;
    let diagnostics = engine::read(&client, &mut tracked).await;
    assert!(diagnostics.is_ok());
    assert_eq!(diagnostics.warnings().count(), 1);
}

#[tokio::test]
async fn test_delete_not_found_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = engine::delete(&client, Tracked::bound(Vlan::new(100, "eng"))).await;

    assert_eq!(outcome.action, Action::Failed);
    assert_eq!(outcome.tracked.id, None);
    let error = outcome.diagnostics.errors().next().unwrap();
    assert!(error.summary.contains("does not exist"), "{}", error.summary);
}

#[tokio::test]
async fn test_delete_server_error_keeps_binding() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(rest_path("system/interfaces/vlan100")))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let outcome = engine::delete(&client, Tracked::bound(VlanInterface::new(100))).await;

    assert_eq!(outcome.action, Action::Failed);
    assert_eq!(outcome.tracked.id.as_deref(), Some("vlanint_100"));
    let error = outcome.diagnostics.errors().next().unwrap();
    assert_eq!(
        error.summary,
        "Error in deleting VlanInterface 100: 409 Conflict"
    );
}

// ── Plan / get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_plan_reports_patch_without_writing() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vlan_body(100, "old")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/200")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let plan = engine::plan(&client, &Vlan::new(100, "eng")).await.unwrap();
    let Plan::Update { patch, .. } = plan else {
        panic!("expected an update plan, got {plan:?}");
    };
    assert_eq!(patch.fields().collect::<Vec<_>>(), vec!["name"]);

    let plan = engine::plan(&client, &Vlan::new(200, "new")).await.unwrap();
    assert!(matches!(plan, Plan::Create { .. }));
}

#[tokio::test]
async fn test_get_missing_is_does_not_exist() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("system/vlans/9")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = engine::get::<Vlan>(&client, "9").await.unwrap_err();
    assert!(matches!(err, CoreError::DoesNotExist { status: 404, ref key, .. } if key == "9"));
}

// ── Full configuration ──────────────────────────────────────────────

#[tokio::test]
async fn test_full_config_create_read_delete() {
    let (server, client) = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("running.json");
    std::fs::write(&file, r#"{"hostname":"sw1"}"#).unwrap();

    Mock::given(method("PUT"))
        .and(path(rest_path("fullconfigs/running-config")))
        .and(body_partial_json(json!({ "hostname": "sw1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rest_path("fullconfigs/running-config")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hostname": "sw1" })))
        .mount(&server)
        .await;

    let outcome = full_config::create(&client, &FullConfig::new(&file)).await;
    assert_eq!(outcome.action, Action::Created, "{:?}", outcome.diagnostics);
    assert_eq!(outcome.tracked.state.diff, "");
    let expected_id = full_config::config_id(&outcome.tracked.state.config);
    assert_eq!(outcome.tracked.id, Some(expected_id));

    // Local edits show up as a diff on the next read.
    std::fs::write(&file, r#"{"hostname":"sw2"}"#).unwrap();
    let mut tracked = outcome.tracked;
    let diagnostics = full_config::read(&client, &mut tracked).await;
    assert!(diagnostics.is_empty());
    assert!(tracked.state.diff.contains("-  \"hostname\": \"sw1\""));
    assert!(tracked.state.diff.contains("+  \"hostname\": \"sw2\""));

    let deleted = full_config::delete(tracked);
    assert_eq!(deleted.action, Action::Deleted);
    assert_eq!(deleted.tracked, Tracked::unbound(FullConfig::default()));
}

#[tokio::test]
async fn test_full_config_unreadable_device_warns() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(rest_path("fullconfigs/running-config")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut tracked = Tracked {
        id: Some("42".into()),
        state: FullConfig::new("running.json"),
    };
    let diagnostics = full_config::read(&client, &mut tracked).await;

    assert!(diagnostics.is_ok());
    assert_eq!(diagnostics.warnings().next().unwrap().summary, "Config Not Found");
    assert_eq!(tracked.id, None);
}

#[tokio::test]
async fn test_full_config_create_requires_json_file() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("running.cfg");
    std::fs::write(&file, "hostname sw1\n").unwrap();

    let outcome = full_config::create(&client, &FullConfig::new(&file)).await;

    assert_eq!(outcome.action, Action::Failed);
    assert!(!outcome.tracked.is_bound());
}

#[tokio::test]
async fn test_full_config_apply_skips_push_when_in_sync() {
    let (server, client) = setup().await;
    forbid_writes(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("running.json");
    std::fs::write(&file, r#"{ "hostname": "sw1" }"#).unwrap();

    Mock::given(method("GET"))
        .and(path(rest_path("fullconfigs/running-config")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hostname": "sw1" })))
        .mount(&server)
        .await;

    let outcome = full_config::apply(&client, &FullConfig::new(&file)).await;

    assert_eq!(outcome.action, Action::Unchanged, "{:?}", outcome.diagnostics);
    assert!(outcome.tracked.is_bound());
}
