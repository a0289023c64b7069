//! Reconciliation engine between `cxsync-api` and the `cxsync` CLI.
//!
//! This crate owns the resource model and the converge logic for switch
//! configuration:
//!
//! - **Resource model** ([`model`]) — `Vlan`, `Interface`, `L2Interface`,
//!   `L3Interface`, `VlanInterface` and `FullConfig`, in the vocabulary a
//!   caller declares (e.g. `trunk` rather than the switch's
//!   `native-untagged`).
//!
//! - **[`SwitchResource`]** — per-kind create / get / update / delete
//!   against a [`SwitchClient`](cxsync_api::SwitchClient), including the
//!   wire conversion and normalization each kind needs.
//!
//! - **[`engine`]** — the lifecycle protocol shared by every kind:
//!   existence-aware create (create-or-adopt), read with drift detection,
//!   patch-set update and delete. Every operation takes the session
//!   explicitly and reports [`Diagnostics`] instead of failing outright.
//!
//! - **[`PatchSet`]** — field name to new value, computed once from the
//!   desired record and the last read, then applied atomically.

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod model;
pub mod normalize;
pub mod patch;
pub mod resource;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SwitchConfig, TlsVerification};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use engine::{Action, Outcome, Plan, Tracked};
pub use error::CoreError;
pub use manifest::{DesiredResource, Manifest};
pub use patch::PatchSet;
pub use resource::SwitchResource;

pub use cxsync_api::SwitchClient;

pub use model::{
    AdminState, FullConfig, Interface, L2Interface, L3Interface, ResourceKind, Vlan,
    VlanInterface, VlanMode,
};
