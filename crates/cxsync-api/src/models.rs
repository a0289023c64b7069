// Switch REST payloads
//
// Wire shapes for the AOS-CX `system/vlans`, `system/interfaces` and
// `fullconfigs` endpoints. Every field is optional because the switch omits
// unset attributes, and writes must only carry what the caller sets.
// References to other objects travel as `{key: uri}` maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Reference collection as the switch reports it: key -> resource URI.
pub type ReferenceMap = BTreeMap<String, String>;

// ── VLAN ─────────────────────────────────────────────────────────────

/// A VLAN object (`system/vlans/{id}`).
///
/// `id` is sent on create only; updates address the VLAN by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub vlan_type: Option<String>,
}

// ── Interface ────────────────────────────────────────────────────────

/// Administrative settings block nested inside an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
}

/// An interface object (`system/interfaces/{name}`).
///
/// Physical ports, L2/L3 port configuration and `vlan{N}` interfaces all
/// share this shape; which fields are populated depends on the role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfacePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_config: Option<UserConfig>,

    // Layer 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_mode: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_tag: Option<ReferenceMap>,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_trunks: Option<ReferenceMap>,

    // Layer 3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip4_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip4_address_secondary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip6_addresses: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub vrf: Option<ReferenceMap>,
}

impl InterfacePayload {
    /// Admin state, preferring the `user_config` block over the top-level field.
    pub fn admin_state(&self) -> Option<&str> {
        self.user_config
            .as_ref()
            .and_then(|c| c.admin.as_deref())
            .or(self.admin.as_deref())
    }

    /// Set the admin state in both places the switch reads it from.
    pub fn set_admin_state(&mut self, state: &str) {
        self.admin = Some(state.to_owned());
        self.user_config = Some(UserConfig {
            admin: Some(state.to_owned()),
        });
    }
}

/// First key of a reference map, e.g. the VLAN id behind `vlan_tag`.
pub fn first_reference_key(map: Option<&ReferenceMap>) -> Option<&str> {
    map.and_then(|m| m.keys().next()).map(String::as_str)
}

// ── Reference decoding ───────────────────────────────────────────────

/// References come back as a map, a bare URI, or a list of URIs
/// depending on firmware and query depth.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Map(ReferenceMap),
    Uri(String),
    List(Vec<String>),
}

fn key_from_uri(uri: &str) -> String {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(uri)
        .to_owned()
}

fn optional_reference<'de, D>(deserializer: D) -> Result<Option<ReferenceMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawReference>::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        RawReference::Map(map) => map,
        RawReference::Uri(uri) => ReferenceMap::from([(key_from_uri(&uri), uri)]),
        RawReference::List(uris) => uris
            .into_iter()
            .map(|uri| (key_from_uri(&uri), uri))
            .collect(),
    }))
}
