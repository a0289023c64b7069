// ── Desired-state manifests ──
//
// A manifest is the caller's declaration: a flat list of resources, each
// tagged with its kind. Parsing the file format is the caller's concern;
// this module only fixes the shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{
    FullConfig, Interface, L2Interface, L3Interface, ResourceKind, Vlan, VlanInterface,
};
use crate::resource::SwitchResource;

/// One declared resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesiredResource {
    Vlan(Vlan),
    Interface(Interface),
    L2Interface(L2Interface),
    L3Interface(L3Interface),
    VlanInterface(VlanInterface),
    FullConfig(FullConfig),
}

impl DesiredResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Vlan(_) => ResourceKind::Vlan,
            Self::Interface(_) => ResourceKind::Interface,
            Self::L2Interface(_) => ResourceKind::L2Interface,
            Self::L3Interface(_) => ResourceKind::L3Interface,
            Self::VlanInterface(_) => ResourceKind::VlanInterface,
            Self::FullConfig(_) => ResourceKind::FullConfig,
        }
    }

    pub fn key(&self) -> String {
        match self {
            Self::Vlan(r) => r.key(),
            Self::Interface(r) => r.key(),
            Self::L2Interface(r) => r.key(),
            Self::L3Interface(r) => r.key(),
            Self::VlanInterface(r) => r.key(),
            Self::FullConfig(r) => r.filename.display().to_string(),
        }
    }
}

/// Ordered list of desired resources. Resources are reconciled in
/// declaration order, so a VLAN must precede its VLAN interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<DesiredResource>,
}

impl Manifest {
    /// Resolve relative `full_config` filenames against `base`, normally
    /// the directory holding the manifest.
    pub fn resolve_paths(&mut self, base: &Path) {
        for resource in &mut self.resources {
            if let DesiredResource::FullConfig(config) = resource {
                if config.filename.is_relative() {
                    config.filename = base.join(&config.filename);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}
