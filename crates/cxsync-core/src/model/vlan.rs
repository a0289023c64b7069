// ── VLAN domain type ──

use serde::{Deserialize, Serialize};

use super::common::AdminState;

/// A VLAN, keyed by `vlan_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    pub vlan_id: u16,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admin_state: AdminState,
}

impl Vlan {
    pub fn new(vlan_id: u16, name: impl Into<String>) -> Self {
        Self {
            vlan_id,
            name: name.into(),
            description: String::new(),
            admin_state: AdminState::Up,
        }
    }
}
