// Running-configuration endpoints
//
// The full configuration is an opaque JSON document at
// `fullconfigs/running-config`; it is replaced wholesale with PUT.

use tracing::debug;

use crate::client::{SwitchClient, WriteMode};
use crate::error::Error;

impl SwitchClient {
    /// Fetch the running configuration.
    ///
    /// `GET fullconfigs/running-config`
    pub async fn get_running_config(&self) -> Result<serde_json::Value, Error> {
        let url = self.rest_url(&["fullconfigs", "running-config"])?;
        self.get(url).await
    }

    /// Replace the running configuration.
    ///
    /// `PUT fullconfigs/running-config`
    pub async fn put_running_config(&self, config: &serde_json::Value) -> Result<(), Error> {
        let url = self.rest_url(&["fullconfigs", "running-config"])?;
        debug!("replacing running-config");
        self.write(WriteMode::Put, url, config).await
    }
}
