// ── Shared model types ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// VRF used when a routed interface does not name one.
pub const DEFAULT_VRF: &str = "default";

/// Administrative state of a VLAN or interface.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AdminState {
    #[default]
    #[serde(alias = "Up", alias = "UP")]
    Up,
    #[serde(alias = "Down", alias = "DOWN")]
    Down,
}

impl AdminState {
    /// Lenient parse of a switch-reported value: anything unrecognized
    /// (including a missing value) reads as `down`.
    pub fn from_device(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::Down)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The resource kinds the engine reconciles.
///
/// `Display` is the name used in diagnostics. Layer-2 and Layer-3 port
/// configuration report as `Interface`, the object they live on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[strum(to_string = "VLAN")]
    Vlan,
    Interface,
    #[strum(to_string = "Interface")]
    L2Interface,
    #[strum(to_string = "Interface")]
    L3Interface,
    VlanInterface,
    FullConfig,
}

/// Parse a VLAN id and check it is in the usable `1..=4094` range.
pub(crate) fn parse_vlan_id(kind: ResourceKind, key: &str) -> Result<u16, CoreError> {
    let id: u16 = key
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationFailed {
            message: format!("{kind} key {key:?} is not a VLAN id"),
        })?;
    check_vlan_id(kind, "vlan_id", id)?;
    Ok(id)
}

pub(crate) fn check_vlan_id(kind: ResourceKind, field: &str, id: u16) -> Result<(), CoreError> {
    if (1..=4094).contains(&id) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("{kind} {field} {id} is outside 1..=4094"),
        })
    }
}

pub(crate) fn check_name(kind: ResourceKind, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        Err(CoreError::ValidationFailed {
            message: format!("{kind} interface name must not be empty"),
        })
    } else {
        Ok(())
    }
}
