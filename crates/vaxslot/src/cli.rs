//! Clap derive structure for the `vaxslot` CLI.
//!
//! A single-command tool: everything else (beneficiaries, state,
//! districts, minimum slots) is gathered interactively at startup.

use clap::Parser;

/// vaxslot -- watch CoWIN vaccination slots and book one
#[derive(Debug, Parser)]
#[command(
    name = "vaxslot",
    version,
    about = "Watch CoWIN vaccination slots and book one from the command line",
    long_about = "Polls the CoWIN appointment calendar for the districts you pick,\n\
        filters tomorrow's sessions by capacity and age, and submits a booking\n\
        for the slot you choose. Runs in the foreground until a booking\n\
        succeeds."
)]
pub struct Cli {
    /// Pre-obtained bearer token; skips the OTP flow
    #[arg(long)]
    pub token: Option<String>,

    /// 10-digit mobile number registered with CoWIN (prompted when needed)
    #[arg(long, short = 'm')]
    pub mobile: Option<String>,

    /// Seconds to wait between calendar scans when nothing is bookable
    #[arg(long, default_value = "15", value_name = "SECS")]
    pub refresh_interval: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Override the OTP relay bin URL
    #[arg(long, value_name = "URL")]
    pub otp_bin: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
