// ── Layer-3 interface domain type ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::common::{AdminState, DEFAULT_VRF};
use super::interface::Interface;

pub(crate) fn default_vrf() -> String {
    DEFAULT_VRF.to_owned()
}

/// Routed configuration of an interface.
///
/// `ipv4[0]` is the primary address; the rest are secondaries, kept in the
/// order the switch reports them (lexically sorted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L3Interface {
    pub interface: String,
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

impl L3Interface {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            description: String::new(),
            admin_state: AdminState::Up,
            ipv4: Vec::new(),
            ipv6: BTreeSet::new(),
            vrf: default_vrf(),
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
