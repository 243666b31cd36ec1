//! The scan-and-book cycle and the outer driver loop.
//!
//! The loop has two states: token valid (keep scanning) and token
//! invalid (probe, then re-run OTP acquisition). It terminates only on a
//! successful booking or an error the operator cannot recover from
//! in-session.

use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::time::sleep;
use tracing::debug;

use vaxslot_api::booking::{self, SlotOption};
use vaxslot_api::models::Beneficiary;
use vaxslot_api::{AuthContext, BookingOutcome, CowinClient, OtpMailbox};

use crate::error::CliError;
use crate::scan::{self, WatchedDistrict};
use crate::{alert, output, prompt};

/// Filters and pacing for the whole session, fixed at startup.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Countdown length between scans that found nothing.
    pub refresh_interval: u64,
    /// Sessions below this capacity are ignored.
    pub min_slots: u32,
    /// Sessions with a higher minimum-age bar are ignored.
    pub min_age: u32,
    /// Vaccine filter; `None` for first-dose parties with no vaccine yet.
    pub vaccine: Option<String>,
    /// Dose number derived from the selected beneficiaries.
    pub dose: u8,
}

/// What one scan-and-book cycle concluded.
enum CycleOutcome {
    Booked { confirmation: Option<String> },
    NothingBooked,
    TokenExpired,
}

/// Run OTP acquisition with a spinner while the relay is polled.
pub async fn acquire_token<M: OtpMailbox>(
    client: &CowinClient,
    mailbox: &M,
    mobile: &str,
) -> Result<AuthContext, CliError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Requesting OTP for {mobile} and waiting for the SMS.."));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.generate_token(mobile, mailbox).await;
    spinner.finish_and_clear();

    result.map_err(|e| CliError::Auth {
        message: e.to_string(),
    })
}

/// The outer driver loop. Returns once a booking succeeds.
pub async fn run<M: OtpMailbox>(
    client: &CowinClient,
    mailbox: &M,
    mut ctx: AuthContext,
    selected: &[Beneficiary],
    watched: &[WatchedDistrict],
    params: &SessionParams,
    mut mobile: Option<String>,
) -> Result<(), CliError> {
    loop {
        match cycle(client, &ctx, selected, watched, params).await? {
            CycleOutcome::Booked { confirmation } => {
                alert::beep(alert::WARNING_TONE_HZ, alert::WARNING_TONE_MS);
                match confirmation {
                    Some(number) => {
                        println!("{} Confirmation number: {number}", "BOOKED!".green().bold());
                    }
                    None => println!("{}", "BOOKED!".green().bold()),
                }
                return Ok(());
            }

            CycleOutcome::NothingBooked => {}

            CycleOutcome::TokenExpired => {
                // Defensive re-check: calendar 401s occasionally lie.
                if client.probe_token(&ctx).await.unwrap_or(false) {
                    debug!("beneficiaries probe accepted the token, continuing");
                    continue;
                }

                alert::beep(alert::WARNING_TONE_HZ, alert::WARNING_TONE_MS);
                eprintln!("{}", "Token is INVALID -- regenerating via OTP.".yellow());

                let number = match &mobile {
                    Some(m) => m.clone(),
                    None => {
                        let m = prompt::input_mobile()?;
                        mobile = Some(m.clone());
                        m
                    }
                };
                ctx = acquire_token(client, mailbox, &number).await?;
            }
        }
    }
}

/// One scan-and-book cycle.
async fn cycle(
    client: &CowinClient,
    ctx: &AuthContext,
    selected: &[Beneficiary],
    watched: &[WatchedDistrict],
    params: &SessionParams,
) -> Result<CycleOutcome, CliError> {
    let date = booking::next_day(Local::now().date_naive());

    let mut options = match scan::scan_districts(
        client,
        ctx,
        watched,
        params.vaccine.as_deref(),
        params.min_slots,
        params.min_age,
        &date,
    )
    .await
    {
        Ok(options) => options,
        Err(e) if e.is_token_expired() => return Ok(CycleOutcome::TokenExpired),
        Err(e) => return Err(CliError::Api(e)),
    };

    booking::sort_options(&mut options);

    if options.is_empty() {
        countdown(params.refresh_interval).await;
        return Ok(CycleOutcome::NothingBooked);
    }

    println!("{}", output::options_table(&options));
    book_one(client, ctx, selected, &options, params.dose).await
}

/// Let the operator pick a center and slot, then submit the booking.
async fn book_one(
    client: &CowinClient,
    ctx: &AuthContext,
    selected: &[Beneficiary],
    options: &[SlotOption],
    dose: u8,
) -> Result<CycleOutcome, CliError> {
    let row = prompt::input_index("Enter center index", options.len())?;
    let option = &options[row];

    if option.slots.is_empty() {
        eprintln!("That session lists no slot times; waiting for the next scan.");
        return Ok(CycleOutcome::NothingBooked);
    }
    let slot_idx = prompt::select_slot(&option.slots)?;

    let Some(request) = booking::build_request(option, slot_idx, selected, dose) else {
        eprintln!("Slot choice no longer valid; waiting for the next scan.");
        return Ok(CycleOutcome::NothingBooked);
    };

    println!(
        "Attempting booking: {} on {} at {}",
        option.center_name, option.date, request.slot
    );

    match client.schedule(ctx, &request).await {
        Ok(BookingOutcome::Booked { confirmation }) => Ok(CycleOutcome::Booked { confirmation }),
        Ok(BookingOutcome::Rejected { status, body }) => {
            eprintln!("Booking not confirmed (HTTP {status}): {body}");
            Ok(CycleOutcome::NothingBooked)
        }
        Err(e) if e.is_token_expired() => Ok(CycleOutcome::TokenExpired),
        Err(e) => Err(CliError::Api(e)),
    }
}

/// Per-second countdown until the next scan.
async fn countdown(secs: u64) {
    let bar = ProgressBar::new(secs);
    bar.set_style(
        ProgressStyle::with_template("No viable options. Next scan in {msg}s [{bar:20}]")
            .expect("static template"),
    );

    for remaining in (1..=secs).rev() {
        bar.set_message(remaining.to_string());
        sleep(Duration::from_secs(1)).await;
        bar.inc(1);
    }
    bar.finish_and_clear();
}
