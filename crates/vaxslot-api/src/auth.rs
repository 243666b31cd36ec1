// OTP token acquisition
//
// Flow: clear the relay mailbox, ask the server to send an OTP, poll the
// mailbox until the forwarded SMS shows up, strip the boilerplate around
// the code, hash it, and exchange the hash for a bearer token. Any
// non-success from the generate/validate endpoints is a hard error; there
// is no usable fallback token.

use std::time::Duration;

use serde_json::json;
use sha2::{Digest, Sha256};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::client::{AuthContext, CowinClient};
use crate::error::Error;
use crate::models::{TokenEnvelope, TxnEnvelope};
use crate::relay::OtpMailbox;

/// Fixed secret the service requires alongside the mobile number.
const GENERATE_OTP_SECRET: &str =
    "U2FsdGVkX1+b2/jGHLoV5kD4lpHdQ/CI7p3TnigA+6ukck6gSGrAR9aAuWeN/Nod9RrY4RaREfPITQfnqgCI6Q==";

/// Literal text wrapped around the code in the forwarded SMS.
pub const OTP_PREFIX: &str = "Your OTP to register/access CoWIN is ";
pub const OTP_SUFFIX: &str = ". It will be valid for 3 minutes. - CoWIN";

/// Delays and bounds for the mailbox polling loop.
///
/// The defaults match the service's pacing: the SMS takes several seconds
/// to arrive and the code expires after three minutes, so polling past
/// that window cannot succeed.
#[derive(Debug, Clone, Copy)]
pub struct OtpTiming {
    /// Wait before the first mailbox read.
    pub initial_wait: Duration,
    /// Wait between mailbox reads.
    pub poll_interval: Duration,
    /// Total time to keep polling after the initial wait.
    pub timeout: Duration,
}

impl Default for OtpTiming {
    fn default() -> Self {
        Self {
            initial_wait: Duration::from_secs(10),
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(180),
        }
    }
}

/// Extract the numeric code from a forwarded OTP SMS.
///
/// Strips the known prefix/suffix boilerplate; returns `None` when
/// nothing remains (mailbox still empty or cleared).
pub fn extract_otp(message: &str) -> Option<String> {
    let code = message.replace(OTP_PREFIX, "").replace(OTP_SUFFIX, "");
    let code = code.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_owned())
    }
}

/// SHA-256 hex digest of the OTP code, as the validate endpoint expects.
pub fn hash_otp(code: &str) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(code.as_bytes());
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

impl CowinClient {
    /// Ask the server to send an OTP to `mobile`; returns the transaction
    /// id the validation step must echo back.
    ///
    /// `POST v2/auth/generateMobileOTP`
    pub async fn request_otp(&self, mobile: &str) -> Result<String, Error> {
        let url = self.api_url("v2/auth/generateMobileOTP");
        let body = json!({ "mobile": mobile, "secret": GENERATE_OTP_SECRET });

        debug!("requesting OTP");
        match self.post_json::<TxnEnvelope>(url, &body, None).await {
            Ok(envelope) => Ok(envelope.txn_id),
            Err(Error::Api { status, body }) => Err(Error::Authentication {
                message: format!("unable to generate OTP (HTTP {status}): {body}"),
            }),
            Err(Error::TokenExpired) => Err(Error::Authentication {
                message: "OTP generation rejected (HTTP 401)".into(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Exchange a received OTP code for a bearer token.
    ///
    /// `POST v2/auth/validateMobileOtp`
    pub async fn validate_otp(&self, txn_id: &str, code: &str) -> Result<AuthContext, Error> {
        let url = self.api_url("v2/auth/validateMobileOtp");
        let body = json!({ "otp": hash_otp(code), "txnId": txn_id });

        debug!("validating OTP");
        match self.post_json::<TokenEnvelope>(url, &body, None).await {
            Ok(envelope) => Ok(AuthContext::new(envelope.token)),
            Err(Error::Api { status, body }) => Err(Error::Authentication {
                message: format!("unable to validate OTP (HTTP {status}): {body}"),
            }),
            Err(Error::TokenExpired) => Err(Error::Authentication {
                message: "OTP validation rejected (HTTP 401)".into(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Run the full OTP flow with default pacing.
    pub async fn generate_token<M: OtpMailbox>(
        &self,
        mobile: &str,
        mailbox: &M,
    ) -> Result<AuthContext, Error> {
        self.generate_token_with(mobile, mailbox, OtpTiming::default())
            .await
    }

    /// Run the full OTP flow: clear mailbox, request OTP, poll until the
    /// forwarded SMS arrives, validate, return the bearer context.
    ///
    /// Relay read failures are retried until `timing.timeout`; endpoint
    /// failures abort immediately.
    pub async fn generate_token_with<M: OtpMailbox>(
        &self,
        mobile: &str,
        mailbox: &M,
        timing: OtpTiming,
    ) -> Result<AuthContext, Error> {
        mailbox.clear().await?;
        let txn_id = self.request_otp(mobile).await?;

        sleep(timing.initial_wait).await;

        let started = Instant::now();
        let code = loop {
            match mailbox.fetch().await {
                Ok(text) => {
                    if let Some(code) = extract_otp(&text) {
                        break code;
                    }
                    debug!("mailbox still empty");
                }
                Err(e) => warn!("OTP relay read failed: {e}"),
            }

            if started.elapsed() >= timing.timeout {
                return Err(Error::OtpTimeout {
                    waited_secs: timing.timeout.as_secs(),
                });
            }
            sleep(timing.poll_interval).await;
        };

        debug!("OTP received, validating");
        self.validate_otp(&txn_id, &code).await
    }
}
