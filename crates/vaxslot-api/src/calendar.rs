// Calendar endpoint
//
// Per-district availability for one date. A 401 anywhere in a scan must
// short-circuit the whole sweep, so token expiry surfaces as an error
// rather than an empty result.

use tracing::debug;

use crate::client::{AuthContext, CowinClient};
use crate::error::Error;
use crate::models::CalendarEnvelope;

impl CowinClient {
    /// Fetch per-center sessions for one district on one date.
    ///
    /// `GET v2/appointment/sessions/calendarByDistrict?district_id&date[&vaccine]`
    ///
    /// `date` is `DD-MM-YYYY`. `vaccine` narrows the calendar to one
    /// vaccine type; pass `None` for beneficiaries with no dose yet.
    pub async fn sessions_by_district(
        &self,
        ctx: &AuthContext,
        district_id: u32,
        date: &str,
        vaccine: Option<&str>,
    ) -> Result<CalendarEnvelope, Error> {
        let mut url = self.api_url("v2/appointment/sessions/calendarByDistrict");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("district_id", &district_id.to_string());
            pairs.append_pair("date", date);
            if let Some(vaccine) = vaccine {
                pairs.append_pair("vaccine", vaccine);
            }
        }

        debug!(district_id, date, "fetching calendar");
        self.get_json(url, Some(ctx)).await
    }
}
