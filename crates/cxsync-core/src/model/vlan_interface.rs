// ── VLAN interface (SVI) domain type ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::common::AdminState;
use super::l3_interface::default_vrf;

/// Routed interface on top of a VLAN (`vlan{N}` on the switch).
///
/// Tracked as `vlanint_{vlan_id}`. The VLAN itself must already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanInterface {
    pub vlan_id: u16,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admin_state: AdminState,
    #[serde(default)]
    pub ipv4: Vec<String>,
    #[serde(default)]
    pub ipv6: BTreeSet<String>,
    #[serde(default = "default_vrf")]
    pub vrf: String,
}

impl VlanInterface {
    pub fn new(vlan_id: u16) -> Self {
        Self {
            vlan_id,
            description: String::new(),
            admin_state: AdminState::Up,
            ipv4: Vec::new(),
            ipv6: BTreeSet::new(),
            vrf: default_vrf(),
        }
    }

    /// Name of the switch interface backing this SVI.
    pub fn interface_name(&self) -> String {
        format!("vlan{}", self.vlan_id)
    }
}
