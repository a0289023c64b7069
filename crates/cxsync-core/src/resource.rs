// ── Per-kind switch operations ──
//
// `SwitchResource` is the seam between the generic lifecycle in
// `crate::engine` and the REST calls each kind needs. Implementations do
// no classification: they return raw `cxsync_api::Error`s and let the
// engine decide what a status means for the step in progress.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;
use serde::de::DeserializeOwned;

use cxsync_api::{CreateStatus, SwitchClient, WriteMode};

use crate::convert::{self, WireIntent};
use crate::error::CoreError;
use crate::model::common::{check_name, check_vlan_id, parse_vlan_id};
use crate::model::{
    DEFAULT_VRF, Interface, L2Interface, L3Interface, ResourceKind, Vlan, VlanInterface, VlanMode,
};
use crate::normalize::canonical_ipv4;
use crate::patch::PatchSet;

type ApiResult<T> = Result<T, cxsync_api::Error>;

/// A switch object the engine can create, read, update and delete.
pub trait SwitchResource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// Caller-supplied identifying key, e.g. `100` or `1/1/1`.
    fn key(&self) -> String;

    /// Identifier tracked once the record is bound to a switch object.
    fn id(&self) -> String {
        self.key()
    }

    /// A record addressing `key`, every other field at its default.
    fn from_key(key: &str) -> Result<Self, CoreError>;

    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// The form the switch will report this record in once written.
    fn normalized(self) -> Self {
        self
    }

    /// Whether a patch touching these fields must replace the whole object.
    fn requires_replace(_patch: &PatchSet) -> bool {
        false
    }

    /// Objects that must already exist before this one can be written.
    fn prerequisites(
        &self,
        _client: &SwitchClient,
    ) -> impl Future<Output = Result<(), CoreError>> + Send {
        std::future::ready(Ok(()))
    }

    fn create(&self, client: &SwitchClient) -> impl Future<Output = ApiResult<CreateStatus>> + Send;

    fn get(&self, client: &SwitchClient) -> impl Future<Output = ApiResult<Self>> + Send;

    fn update(
        &self,
        client: &SwitchClient,
        mode: WriteMode,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    fn delete(&self, client: &SwitchClient) -> impl Future<Output = ApiResult<()>> + Send;
}

// ── Validation helpers ─────────────────────────────────────────────

fn check_cidr<A: std::str::FromStr>(
    kind: ResourceKind,
    family: &str,
    address: &str,
    max_prefix: u8,
) -> Result<(), CoreError> {
    let invalid = || CoreError::ValidationFailed {
        message: format!("{kind} {family} address {address:?} is not in CIDR form"),
    };
    let (addr, prefix) = address.split_once('/').ok_or_else(invalid)?;
    addr.parse::<A>().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    if prefix > max_prefix {
        return Err(invalid());
    }
    Ok(())
}

fn check_addressing(
    kind: ResourceKind,
    ipv4: &[String],
    ipv6: &BTreeSet<String>,
    vrf: &str,
) -> Result<(), CoreError> {
    for address in ipv4 {
        check_cidr::<Ipv4Addr>(kind, "IPv4", address, 32)?;
    }
    for address in ipv6 {
        check_cidr::<Ipv6Addr>(kind, "IPv6", address, 128)?;
    }
    if vrf.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("{kind} vrf must not be empty"),
        });
    }
    Ok(())
}

fn normalize_vrf(vrf: String) -> String {
    if vrf.trim().is_empty() {
        DEFAULT_VRF.to_owned()
    } else {
        vrf
    }
}

// ── VLAN ───────────────────────────────────────────────────────────

impl SwitchResource for Vlan {
    const KIND: ResourceKind = ResourceKind::Vlan;

    fn key(&self) -> String {
        self.vlan_id.to_string()
    }

    fn from_key(key: &str) -> Result<Self, CoreError> {
        Ok(Self::new(parse_vlan_id(Self::KIND, key)?, ""))
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_vlan_id(Self::KIND, "vlan_id", self.vlan_id)
    }

    async fn create(&self, client: &SwitchClient) -> ApiResult<CreateStatus> {
        client
            .create_vlan(&convert::vlan_to_wire(self, WireIntent::Create))
            .await
    }

    async fn get(&self, client: &SwitchClient) -> ApiResult<Self> {
        let payload = client.get_vlan(self.vlan_id).await?;
        Ok(convert::vlan_from_wire(self.vlan_id, payload))
    }

    async fn update(&self, client: &SwitchClient, mode: WriteMode) -> ApiResult<()> {
        client
            .update_vlan(
                self.vlan_id,
                &convert::vlan_to_wire(self, WireIntent::Update),
                mode,
            )
            .await
    }

    async fn delete(&self, client: &SwitchClient) -> ApiResult<()> {
        client.delete_vlan(self.vlan_id).await
    }
}

// ── Interface ──────────────────────────────────────────────────────

impl SwitchResource for Interface {
    const KIND: ResourceKind = ResourceKind::Interface;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn from_key(key: &str) -> Result<Self, CoreError> {
        check_name(Self::KIND, key)?;
        Ok(Self::new(key.trim()))
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_name(Self::KIND, &self.name)
    }

    async fn create(&self, client: &SwitchClient) -> ApiResult<CreateStatus> {
        client
            .create_interface(&convert::interface_to_wire(self, WireIntent::Create))
            .await
    }

    async fn get(&self, client: &SwitchClient) -> ApiResult<Self> {
        let payload = client.get_interface(&self.name).await?;
        Ok(convert::interface_from_wire(&self.name, &payload))
    }

    async fn update(&self, client: &SwitchClient, mode: WriteMode) -> ApiResult<()> {
        client
            .update_interface(
                &self.name,
                &convert::interface_to_wire(self, WireIntent::Update),
                mode,
            )
            .await
    }

    async fn delete(&self, client: &SwitchClient) -> ApiResult<()> {
        client.delete_interface(&self.name).await
    }
}

// ── Layer 2 ────────────────────────────────────────────────────────

impl SwitchResource for L2Interface {
    const KIND: ResourceKind = ResourceKind::L2Interface;

    fn key(&self) -> String {
        self.interface.clone()
    }

    fn from_key(key: &str) -> Result<Self, CoreError> {
        check_name(Self::KIND, key)?;
        Ok(Self::access(key.trim(), 1))
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_name(Self::KIND, &self.interface)?;
        check_vlan_id(Self::KIND, "vlan_tag", self.vlan_tag)?;
        if self.vlan_mode == VlanMode::Trunk {
            for id in &self.vlan_ids {
                check_vlan_id(Self::KIND, "vlan_ids entry", *id)?;
            }
            if !self.trunk_allowed_all && self.vlan_ids.is_empty() {
                return Err(CoreError::ValidationFailed {
                    message: format!(
                        "{} {}: a trunk needs vlan_ids or trunk_allowed_all = true",
                        Self::KIND,
                        self.interface
                    ),
                });
            }
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        match self.vlan_mode {
            VlanMode::Access => {
                self.vlan_ids.clear();
                self.trunk_allowed_all = false;
                self.native_vlan_tag = false;
            }
            VlanMode::Trunk if self.trunk_allowed_all => self.vlan_ids.clear(),
            VlanMode::Trunk => {}
        }
        self
    }

    fn requires_replace(patch: &PatchSet) -> bool {
        patch.contains("vlan_mode")
    }

    async fn create(&self, client: &SwitchClient) -> ApiResult<CreateStatus> {
        let payload = convert::l2_to_wire(client, self, WireIntent::Create)?;
        client.create_interface(&payload).await
    }

    async fn get(&self, client: &SwitchClient) -> ApiResult<Self> {
        let payload = client.get_interface(&self.interface).await?;
        Ok(convert::l2_from_wire(&self.interface, &payload))
    }

    async fn update(&self, client: &SwitchClient, mode: WriteMode) -> ApiResult<()> {
        let payload = convert::l2_to_wire(client, self, WireIntent::Update)?;
        client
            .update_interface(&self.interface, &payload, mode)
            .await
    }

    async fn delete(&self, client: &SwitchClient) -> ApiResult<()> {
        client.delete_interface(&self.interface).await
    }
}

// ── Layer 3 ────────────────────────────────────────────────────────

impl SwitchResource for L3Interface {
    const KIND: ResourceKind = ResourceKind::L3Interface;

    fn key(&self) -> String {
        self.interface.clone()
    }

    fn from_key(key: &str) -> Result<Self, CoreError> {
        check_name(Self::KIND, key)?;
        Ok(Self::new(key.trim()))
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_name(Self::KIND, &self.interface)?;
        check_addressing(Self::KIND, &self.ipv4, &self.ipv6, &self.vrf)
    }

    fn normalized(mut self) -> Self {
        self.ipv4 = canonical_ipv4(&self.ipv4);
        self.vrf = normalize_vrf(self.vrf);
        self
    }

    fn requires_replace(patch: &PatchSet) -> bool {
        patch.contains("ipv4")
    }

    async fn create(&self, client: &SwitchClient) -> ApiResult<CreateStatus> {
        let payload = convert::l3_to_wire(client, self, WireIntent::Create)?;
        client.create_interface(&payload).await
    }

    async fn get(&self, client: &SwitchClient) -> ApiResult<Self> {
        let payload = client.get_interface(&self.interface).await?;
        Ok(convert::l3_from_wire(&self.interface, &payload))
    }

    async fn update(&self, client: &SwitchClient, mode: WriteMode) -> ApiResult<()> {
        let payload = convert::l3_to_wire(client, self, WireIntent::Update)?;
        client
            .update_interface(&self.interface, &payload, mode)
            .await
    }

    async fn delete(&self, client: &SwitchClient) -> ApiResult<()> {
        client.delete_interface(&self.interface).await
    }
}

// ── VLAN interface ─────────────────────────────────────────────────

impl SwitchResource for VlanInterface {
    const KIND: ResourceKind = ResourceKind::VlanInterface;

    fn key(&self) -> String {
        self.vlan_id.to_string()
    }

    fn id(&self) -> String {
        format!("vlanint_{}", self.vlan_id)
    }

    /// Accepts either the VLAN id (`100`) or the tracked id (`vlanint_100`).
    fn from_key(key: &str) -> Result<Self, CoreError> {
        let key = key.trim();
        let id = key.strip_prefix("vlanint_").unwrap_or(key);
        Ok(Self::new(parse_vlan_id(Self::KIND, id)?))
    }

    fn validate(&self) -> Result<(), CoreError> {
        check_vlan_id(Self::KIND, "vlan_id", self.vlan_id)?;
        check_addressing(Self::KIND, &self.ipv4, &self.ipv6, &self.vrf)
    }

    fn normalized(mut self) -> Self {
        self.ipv4 = canonical_ipv4(&self.ipv4);
        self.vrf = normalize_vrf(self.vrf);
        self
    }

    fn requires_replace(patch: &PatchSet) -> bool {
        patch.contains("ipv4")
    }

    async fn prerequisites(&self, client: &SwitchClient) -> Result<(), CoreError> {
        match client.get_vlan(self.vlan_id).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(CoreError::ValidationFailed {
                message: format!(
                    "VLAN {} missing: create it before its VLAN interface",
                    self.vlan_id
                ),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, client: &SwitchClient) -> ApiResult<CreateStatus> {
        let payload = convert::vlan_interface_to_wire(client, self, WireIntent::Create)?;
        client.create_interface(&payload).await
    }

    async fn get(&self, client: &SwitchClient) -> ApiResult<Self> {
        let payload = client.get_interface(&self.interface_name()).await?;
        Ok(convert::vlan_interface_from_wire(self.vlan_id, &payload))
    }

    async fn update(&self, client: &SwitchClient, mode: WriteMode) -> ApiResult<()> {
        let payload = convert::vlan_interface_to_wire(client, self, WireIntent::Update)?;
        client
            .update_interface(&self.interface_name(), &payload, mode)
            .await
    }

    async fn delete(&self, client: &SwitchClient) -> ApiResult<()> {
        client.delete_interface(&self.interface_name()).await
    }
}
