// vaxslot-api: Async Rust client for the CoWIN appointment-booking API

pub mod auth;
pub mod booking;
pub mod client;
pub mod error;
pub mod models;
pub mod relay;
pub mod transport;

mod beneficiaries;
mod calendar;
mod location;
mod schedule;

pub use auth::OtpTiming;
pub use client::{AuthContext, CowinClient};
pub use error::Error;
pub use relay::{OtpMailbox, TextBinMailbox};
pub use schedule::BookingOutcome;
pub use transport::TransportConfig;
