// VLAN endpoints
//
// `system/vlans` collection and `system/vlans/{id}` objects.

use tracing::debug;

use crate::client::{CreateStatus, SwitchClient, WriteMode};
use crate::error::Error;
use crate::models::VlanPayload;

impl SwitchClient {
    /// Create a VLAN.
    ///
    /// `POST system/vlans`. The payload must carry `id`.
    pub async fn create_vlan(&self, vlan: &VlanPayload) -> Result<CreateStatus, Error> {
        let url = self.rest_url(&["system", "vlans"])?;
        debug!(id = ?vlan.id, "creating vlan");
        self.post(url, vlan).await
    }

    /// Fetch one VLAN.
    ///
    /// `GET system/vlans/{id}`
    pub async fn get_vlan(&self, id: u16) -> Result<VlanPayload, Error> {
        let url = self.rest_url(&["system", "vlans", &id.to_string()])?;
        self.get(url).await
    }

    /// Update a VLAN with PATCH or PUT.
    pub async fn update_vlan(
        &self,
        id: u16,
        vlan: &VlanPayload,
        mode: WriteMode,
    ) -> Result<(), Error> {
        let url = self.rest_url(&["system", "vlans", &id.to_string()])?;
        debug!(id, ?mode, "updating vlan");
        self.write(mode, url, vlan).await
    }

    /// Delete a VLAN.
    ///
    /// `DELETE system/vlans/{id}`
    pub async fn delete_vlan(&self, id: u16) -> Result<(), Error> {
        let url = self.rest_url(&["system", "vlans", &id.to_string()])?;
        debug!(id, "deleting vlan");
        self.delete(url).await
    }

    /// Reference URI of a VLAN, for `vlan_tag` / `vlan_trunks` maps.
    pub fn vlan_uri(&self, id: u16) -> Result<String, Error> {
        self.reference_uri(&["system", "vlans", &id.to_string()])
    }
}
