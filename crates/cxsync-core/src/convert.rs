// ── Wire-to-domain conversions ──
//
// Bridges `cxsync_api::models` payloads and the `crate::model` records.
// Reads fold switch vocabulary back to caller vocabulary (admin state,
// trunk aliases, reference maps); writes expand it again. Keys are only
// written on create: updates address the object by path.

use std::collections::BTreeSet;

use cxsync_api::models::first_reference_key;
use cxsync_api::{InterfacePayload, ReferenceMap, SwitchClient, VlanPayload};

use crate::model::{
    AdminState, DEFAULT_VRF, Interface, L2Interface, L3Interface, Vlan, VlanInterface, VlanMode,
};
use crate::normalize::DeviceVlanMode;

/// Whether a payload is built for a create (carries the key) or an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireIntent {
    Create,
    Update,
}

// ── Helpers ────────────────────────────────────────────────────────

fn reference(key: String, uri: String) -> ReferenceMap {
    ReferenceMap::from([(key, uri)])
}

fn vlan_reference(client: &SwitchClient, id: u16) -> Result<ReferenceMap, cxsync_api::Error> {
    Ok(reference(id.to_string(), client.vlan_uri(id)?))
}

fn parse_vlan_key(map: Option<&ReferenceMap>) -> Option<u16> {
    first_reference_key(map).and_then(|k| k.parse().ok())
}

// ── VLAN ───────────────────────────────────────────────────────────

pub fn vlan_from_wire(vlan_id: u16, payload: VlanPayload) -> Vlan {
    Vlan {
        vlan_id: payload.id.unwrap_or(vlan_id),
        name: payload.name.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        admin_state: AdminState::from_device(payload.admin.as_deref()),
    }
}

pub fn vlan_to_wire(vlan: &Vlan, intent: WireIntent) -> VlanPayload {
    VlanPayload {
        id: (intent == WireIntent::Create).then_some(vlan.vlan_id),
        name: Some(vlan.name.clone()),
        description: Some(vlan.description.clone()),
        admin: Some(vlan.admin_state.as_str().to_owned()),
        vlan_type: (intent == WireIntent::Create).then(|| "static".to_owned()),
    }
}

// ── Interface ──────────────────────────────────────────────────────

fn base_payload(
    name: &str,
    description: &str,
    admin_state: AdminState,
    intent: WireIntent,
) -> InterfacePayload {
    let mut payload = InterfacePayload {
        name: (intent == WireIntent::Create).then(|| name.to_owned()),
        description: Some(description.to_owned()),
        ..InterfacePayload::default()
    };
    payload.set_admin_state(admin_state.as_str());
    payload
}

pub fn interface_from_wire(name: &str, payload: &InterfacePayload) -> Interface {
    Interface {
        name: payload.name.clone().unwrap_or_else(|| name.to_owned()),
        description: payload.description.clone().unwrap_or_default(),
        admin_state: AdminState::from_device(payload.admin_state()),
    }
}

pub fn interface_to_wire(interface: &Interface, intent: WireIntent) -> InterfacePayload {
    base_payload(
        &interface.name,
        &interface.description,
        interface.admin_state,
        intent,
    )
}

// ── Layer 2 ────────────────────────────────────────────────────────

pub fn l2_from_wire(name: &str, payload: &InterfacePayload) -> L2Interface {
    let port = interface_from_wire(name, payload);
    let (vlan_mode, native_vlan_tag) =
        DeviceVlanMode::from_device(payload.vlan_mode.as_deref()).to_caller();
    // A port with no (or a zero) native VLAN sits in VLAN 1.
    let vlan_tag = parse_vlan_key(payload.vlan_tag.as_ref())
        .filter(|tag| *tag != 0)
        .unwrap_or(1);

    let mut l2 = L2Interface {
        interface: port.name,
        description: port.description,
        admin_state: port.admin_state,
        vlan_mode,
        vlan_tag,
        vlan_ids: BTreeSet::new(),
        trunk_allowed_all: false,
        native_vlan_tag,
    };

    if vlan_mode == VlanMode::Trunk {
        l2.vlan_ids = payload
            .vlan_trunks
            .iter()
            .flat_map(|m| m.keys())
            .filter_map(|k| k.parse().ok())
            .collect();
        l2.trunk_allowed_all = l2.vlan_ids.is_empty();
    }
    l2
}

pub fn l2_to_wire(
    client: &SwitchClient,
    l2: &L2Interface,
    intent: WireIntent,
) -> Result<InterfacePayload, cxsync_api::Error> {
    let mut payload = base_payload(&l2.interface, &l2.description, l2.admin_state, intent);
    payload.routing = Some(false);
    payload.vlan_mode =
        Some(DeviceVlanMode::from_caller(l2.vlan_mode, l2.native_vlan_tag).to_string());
    payload.vlan_tag = Some(vlan_reference(client, l2.vlan_tag)?);

    if l2.vlan_mode == VlanMode::Trunk {
        // An empty trunk list is how the switch spells "all VLANs".
        let mut trunks = ReferenceMap::new();
        if !l2.trunk_allowed_all {
            for id in &l2.vlan_ids {
                trunks.insert(id.to_string(), client.vlan_uri(*id)?);
            }
        }
        payload.vlan_trunks = Some(trunks);
    }
    Ok(payload)
}

// ── Layer 3 / VLAN interface ───────────────────────────────────────

struct Addressing {
    ipv4: Vec<String>,
    ipv6: BTreeSet<String>,
    vrf: String,
}

fn addressing_from_wire(payload: &InterfacePayload) -> Addressing {
    let ipv4 = payload
        .ip4_address
        .iter()
        .chain(payload.ip4_address_secondary.iter().flatten())
        .filter(|a| !a.is_empty())
        .cloned()
        .collect();
    Addressing {
        ipv4,
        ipv6: payload.ip6_addresses.iter().flatten().cloned().collect(),
        vrf: first_reference_key(payload.vrf.as_ref())
            .unwrap_or(DEFAULT_VRF)
            .to_owned(),
    }
}

fn apply_addressing(
    client: &SwitchClient,
    payload: &mut InterfacePayload,
    ipv4: &[String],
    ipv6: &BTreeSet<String>,
    vrf: &str,
) -> Result<(), cxsync_api::Error> {
    payload.routing = Some(true);
    payload.ip4_address = ipv4.first().cloned();
    payload.ip4_address_secondary = Some(ipv4.iter().skip(1).cloned().collect());
    payload.ip6_addresses = Some(ipv6.iter().cloned().collect());
    payload.vrf = Some(reference(vrf.to_owned(), client.vrf_uri(vrf)?));
    Ok(())
}

pub fn l3_from_wire(name: &str, payload: &InterfacePayload) -> L3Interface {
    let port = interface_from_wire(name, payload);
    let addressing = addressing_from_wire(payload);
    L3Interface {
        interface: port.name,
        description: port.description,
        admin_state: port.admin_state,
        ipv4: addressing.ipv4,
        ipv6: addressing.ipv6,
        vrf: addressing.vrf,
    }
}

pub fn l3_to_wire(
    client: &SwitchClient,
    l3: &L3Interface,
    intent: WireIntent,
) -> Result<InterfacePayload, cxsync_api::Error> {
    let mut payload = base_payload(&l3.interface, &l3.description, l3.admin_state, intent);
    apply_addressing(client, &mut payload, &l3.ipv4, &l3.ipv6, &l3.vrf)?;
    Ok(payload)
}

pub fn vlan_interface_from_wire(vlan_id: u16, payload: &InterfacePayload) -> VlanInterface {
    let addressing = addressing_from_wire(payload);
    VlanInterface {
        vlan_id: parse_vlan_key(payload.vlan_tag.as_ref()).unwrap_or(vlan_id),
        description: payload.description.clone().unwrap_or_default(),
        admin_state: AdminState::from_device(payload.admin_state()),
        ipv4: addressing.ipv4,
        ipv6: addressing.ipv6,
        vrf: addressing.vrf,
    }
}

pub fn vlan_interface_to_wire(
    client: &SwitchClient,
    svi: &VlanInterface,
    intent: WireIntent,
) -> Result<InterfacePayload, cxsync_api::Error> {
    let mut payload = base_payload(
        &svi.interface_name(),
        &svi.description,
        svi.admin_state,
        intent,
    );
    if intent == WireIntent::Create {
        payload.interface_type = Some("vlan".into());
    }
    payload.vlan_tag = Some(vlan_reference(client, svi.vlan_id)?);
    apply_addressing(client, &mut payload, &svi.ipv4, &svi.ipv6, &svi.vrf)?;
    Ok(payload)
}
