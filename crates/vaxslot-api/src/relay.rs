// OTP relay mailbox
//
// The service delivers OTPs over SMS only. The workaround is a phone-side
// forwarder that writes the SMS text into a shared key-value text-blob
// service, which this module reads back. The trait keeps that third-party
// dependency out of the token-acquisition flow itself.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Put-code/get-code capability over some out-of-band OTP channel.
#[allow(async_fn_in_trait)]
pub trait OtpMailbox {
    /// Overwrite the mailbox with an empty payload so a stale code from
    /// an earlier round cannot be mistaken for a fresh one.
    async fn clear(&self) -> Result<(), Error>;

    /// Read the current mailbox contents verbatim. Empty means no SMS
    /// has been forwarded yet.
    async fn fetch(&self) -> Result<String, Error>;
}

/// Fixed bin used by the stock SMS forwarder configuration.
pub const DEFAULT_BIN: &str = "https://json.extendsclass.com/bin/b98f57e76c32";

/// [`OtpMailbox`] backed by a pastebin-style text-blob service: `PUT` to
/// clear, `GET` to read, one fixed key.
///
/// The bin is globally shared and has no access control; any concurrent
/// user of the same key can race this one. That is an inherent property
/// of the relay service, honored here as-is.
pub struct TextBinMailbox {
    http: reqwest::Client,
    bin_url: Url,
}

impl TextBinMailbox {
    pub fn new(http: reqwest::Client, bin_url: Url) -> Self {
        Self { http, bin_url }
    }

    /// Build a mailbox from the shared transport config, optionally
    /// overriding the default bin.
    pub fn from_transport(
        transport: &TransportConfig,
        bin_url: Option<&str>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let bin_url = Url::parse(bin_url.unwrap_or(DEFAULT_BIN))?;
        Ok(Self { http, bin_url })
    }
}

impl OtpMailbox for TextBinMailbox {
    async fn clear(&self) -> Result<(), Error> {
        debug!("clearing OTP mailbox at {}", self.bin_url);

        let resp = self
            .http
            .put(self.bin_url.clone())
            .body("")
            .send()
            .await
            .map_err(|e| Error::Relay {
                message: format!("clear failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Relay {
                message: format!("clear failed (HTTP {status})"),
            });
        }
        Ok(())
    }

    async fn fetch(&self) -> Result<String, Error> {
        let resp = self
            .http
            .get(self.bin_url.clone())
            .send()
            .await
            .map_err(|e| Error::Relay {
                message: format!("fetch failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Relay {
                message: format!("fetch failed (HTTP {status})"),
            });
        }
        resp.text().await.map_err(|e| Error::Relay {
            message: format!("unreadable relay body: {e}"),
        })
    }
}
