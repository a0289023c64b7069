// Interface endpoints
//
// `system/interfaces` collection and `system/interfaces/{name}` objects.
// Names contain slashes (`1/1/1`), so they always travel as a single
// percent-encoded path segment.

use tracing::debug;

use crate::client::{CreateStatus, SwitchClient, WriteMode};
use crate::error::Error;
use crate::models::InterfacePayload;

impl SwitchClient {
    /// Create an interface.
    ///
    /// `POST system/interfaces`. Physical ports already exist on the switch,
    /// so for them this normally reports [`CreateStatus::NotCreated`].
    pub async fn create_interface(
        &self,
        interface: &InterfacePayload,
    ) -> Result<CreateStatus, Error> {
        let url = self.rest_url(&["system", "interfaces"])?;
        debug!(name = ?interface.name, "creating interface");
        self.post(url, interface).await
    }

    /// Fetch one interface.
    ///
    /// `GET system/interfaces/{name}`
    pub async fn get_interface(&self, name: &str) -> Result<InterfacePayload, Error> {
        let url = self.rest_url(&["system", "interfaces", name])?;
        self.get(url).await
    }

    /// Update an interface with PATCH or PUT.
    pub async fn update_interface(
        &self,
        name: &str,
        interface: &InterfacePayload,
        mode: WriteMode,
    ) -> Result<(), Error> {
        let url = self.rest_url(&["system", "interfaces", name])?;
        debug!(name, ?mode, "updating interface");
        self.write(mode, url, interface).await
    }

    /// Delete an interface configuration entry.
    ///
    /// `DELETE system/interfaces/{name}`
    pub async fn delete_interface(&self, name: &str) -> Result<(), Error> {
        let url = self.rest_url(&["system", "interfaces", name])?;
        debug!(name, "deleting interface");
        self.delete(url).await
    }

    /// Reference URI of a VRF, for the `vrf` map.
    pub fn vrf_uri(&self, name: &str) -> Result<String, Error> {
        self.reference_uri(&["system", "vrfs", name])
    }
}
