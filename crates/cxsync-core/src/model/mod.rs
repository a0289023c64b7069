// ── Resource model ──
//
// Desired/observed records in caller vocabulary. Wire shapes live in
// `cxsync_api::models`; `crate::convert` maps between the two.

pub mod common;
pub mod full_config;
pub mod interface;
pub mod l2_interface;
pub mod l3_interface;
pub mod vlan;
pub mod vlan_interface;

pub use common::{AdminState, ResourceKind, DEFAULT_VRF};
pub use full_config::FullConfig;
pub use interface::Interface;
pub use l2_interface::{L2Interface, VlanMode};
pub use l3_interface::L3Interface;
pub use vlan::Vlan;
pub use vlan_interface::VlanInterface;
