// ── Layer-2 interface domain type ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::common::AdminState;
use super::interface::Interface;

/// Caller-facing port mode. The switch splits `trunk` into
/// `native-tagged` / `native-untagged`; see [`crate::normalize`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VlanMode {
    #[default]
    Access,
    Trunk,
}

fn default_vlan_tag() -> u16 {
    1
}

/// Bridged (switchport) configuration of an interface.
///
/// `vlan_ids`, `trunk_allowed_all` and `native_vlan_tag` only matter in
/// trunk mode and are reset when the port is in access mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Interface {
    pub interface: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admin_state: AdminState,
    #[serde(default)]
    pub vlan_mode: VlanMode,
    /// Access VLAN, or the native VLAN in trunk mode.
    #[serde(default = "default_vlan_tag")]
    pub vlan_tag: u16,
    #[serde(default)]
    pub vlan_ids: BTreeSet<u16>,
    #[serde(default)]
    pub trunk_allowed_all: bool,
    #[serde(default)]
    pub native_vlan_tag: bool,
}

impl L2Interface {
    pub fn access(interface: impl Into<String>, vlan_tag: u16) -> Self {
        Self {
            interface: interface.into(),
            description: String::new(),
            admin_state: AdminState::Up,
            vlan_mode: VlanMode::Access,
            vlan_tag,
            vlan_ids: BTreeSet::new(),
            trunk_allowed_all: false,
            native_vlan_tag: false,
        }
    }

    pub fn trunk(
        interface: impl Into<String>,
        native_vlan: u16,
        vlan_ids: impl IntoIterator<Item = u16>,
    ) -> Self {
        Self {
            vlan_mode: VlanMode::Trunk,
            vlan_ids: vlan_ids.into_iter().collect(),
            ..Self::access(interface, native_vlan)
        }
    }

    /// The underlying port this configuration is applied to.
    pub fn port(&self) -> Interface {
        Interface {
            name: self.interface.clone(),
            description: self.description.clone(),
            admin_state: self.admin_state,
        }
    }
}
