// Booking submission
//
// One POST per attempt. Only 401 is an error here: a booking conflict
// (slot gone, quota hit) is an expected outcome the caller loops past.

use tracing::debug;

use crate::client::{AuthContext, CowinClient};
use crate::error::Error;
use crate::models::{BookingConfirmation, BookingRequest};

/// Result of one booking submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// HTTP 200: the appointment is booked. No further submissions may
    /// happen in this run.
    Booked { confirmation: Option<String> },
    /// Any status other than 200/401: slot conflict, validation
    /// rejection, rate limit. The token is still usable.
    Rejected { status: u16, body: String },
}

impl CowinClient {
    /// Submit a booking request.
    ///
    /// `POST v2/appointment/schedule`
    ///
    /// Returns [`Error::TokenExpired`] on 401; every other status is a
    /// [`BookingOutcome`].
    pub async fn schedule(
        &self,
        ctx: &AuthContext,
        request: &BookingRequest,
    ) -> Result<BookingOutcome, Error> {
        let url = self.api_url("v2/appointment/schedule");
        debug!(center_id = request.center_id, dose = request.dose, "submitting booking");

        let (status, body) = self.post_raw(url, request, ctx).await?;

        if status.is_success() {
            // The confirmation number is nice to have; a 200 with an
            // unexpected body is still a booked appointment.
            let confirmation = serde_json::from_str::<BookingConfirmation>(&body)
                .ok()
                .and_then(|c| c.appointment_confirmation_no);
            return Ok(BookingOutcome::Booked { confirmation });
        }

        Ok(BookingOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
