// Beneficiary endpoints
//
// The beneficiaries list doubles as the cheapest authenticated endpoint,
// so the driver loop reuses it as a token-validity probe.

use tracing::debug;

use crate::client::{AuthContext, CowinClient};
use crate::error::Error;
use crate::models::{BeneficiariesEnvelope, Beneficiary};

impl CowinClient {
    /// List all beneficiaries registered under the authenticated mobile
    /// number.
    ///
    /// `GET v2/appointment/beneficiaries`
    pub async fn list_beneficiaries(&self, ctx: &AuthContext) -> Result<Vec<Beneficiary>, Error> {
        let url = self.api_url("v2/appointment/beneficiaries");
        debug!("listing beneficiaries");
        let envelope: BeneficiariesEnvelope = self.get_json(url, Some(ctx)).await?;
        Ok(envelope.beneficiaries)
    }

    /// Probe whether the bearer token is still accepted.
    ///
    /// Defensive re-check before forcing the operator through a fresh
    /// OTP round: `Ok(true)` on HTTP 200, `Ok(false)` on any rejection.
    pub async fn probe_token(&self, ctx: &AuthContext) -> Result<bool, Error> {
        match self.list_beneficiaries(ctx).await {
            Ok(_) => Ok(true),
            Err(Error::TokenExpired | Error::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
