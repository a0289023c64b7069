// ── Interface domain type ──

use serde::{Deserialize, Serialize};

use super::common::AdminState;

/// A switch port, keyed by `name` (e.g. `1/1/1`).
///
/// Ports always exist on the hardware, so creating one normally adopts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admin_state: AdminState,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            admin_state: AdminState::Up,
        }
    }
}
