// Location reference-data endpoints
//
// States and districts are unauthenticated and change rarely; they are
// fetched once at startup for interactive selection.

use tracing::debug;

use crate::client::CowinClient;
use crate::error::Error;
use crate::models::{District, DistrictsEnvelope, State, StatesEnvelope};

impl CowinClient {
    /// List every state.
    ///
    /// `GET v2/admin/location/states`
    pub async fn list_states(&self) -> Result<Vec<State>, Error> {
        let url = self.api_url("v2/admin/location/states");
        debug!("listing states");
        let envelope: StatesEnvelope = self.get_json(url, None).await?;
        Ok(envelope.states)
    }

    /// List the districts of one state.
    ///
    /// `GET v2/admin/location/districts/{state_id}`
    pub async fn list_districts(&self, state_id: u32) -> Result<Vec<District>, Error> {
        let url = self.api_url(&format!("v2/admin/location/districts/{state_id}"));
        debug!(state_id, "listing districts");
        let envelope: DistrictsEnvelope = self.get_json(url, None).await?;
        Ok(envelope.districts)
    }
}
