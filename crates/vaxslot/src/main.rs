mod alert;
mod cli;
mod error;
mod output;
mod prompt;
mod scan;
mod session;

use std::time::Duration;

use chrono::{Datelike, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vaxslot_api::models::Beneficiary;
use vaxslot_api::{AuthContext, CowinClient, TextBinMailbox, TransportConfig, booking};

use crate::cli::Cli;
use crate::error::CliError;
use crate::scan::WatchedDistrict;
use crate::session::SessionParams;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let transport = TransportConfig {
        timeout: Duration::from_secs(cli.timeout),
    };
    let client = CowinClient::new(&transport)?;
    let mailbox = TextBinMailbox::from_transport(&transport, cli.otp_bin.as_deref())?;

    // ── Token ────────────────────────────────────────────────────────
    let mut mobile = cli.mobile;
    let ctx = match cli.token {
        Some(token) => AuthContext::new(token),
        None => {
            let number = match &mobile {
                Some(m) => m.clone(),
                None => {
                    let m = prompt::input_mobile()?;
                    mobile = Some(m.clone());
                    m
                }
            };
            session::acquire_token(&client, &mailbox, &number).await?
        }
    };

    // ── Beneficiaries ────────────────────────────────────────────────
    eprintln!("Fetching registered beneficiaries..");
    let all = client.list_beneficiaries(&ctx).await.map_err(|e| {
        if e.is_token_expired() {
            CliError::Auth {
                message: "the bearer token was rejected".into(),
            }
        } else {
            CliError::Api(e)
        }
    })?;
    if all.is_empty() {
        return Err(CliError::NoBeneficiaries);
    }

    let current_year = Local::now().year();
    println!("{}", output::beneficiaries_table(&all, current_year));
    output::print_party_notes();

    let picks = prompt::input_index_list(
        "Enter comma separated index numbers of beneficiaries to book for",
        all.len(),
    )?;
    let selected: Vec<Beneficiary> = picks.iter().map(|&i| all[i].clone()).collect();
    if selected.is_empty() {
        return Err(CliError::NoBeneficiaries);
    }

    let vaccines = booking::distinct_vaccines(&selected);
    if vaccines.len() != 1 {
        return Err(CliError::MixedVaccines {
            found: vaccines.join(", "),
        });
    }
    let vaccine = vaccines.into_iter().next().filter(|v| !v.is_empty());

    let doses = booking::distinct_doses(&selected);
    if doses.len() != 1 {
        return Err(CliError::MixedDoses {
            found: doses
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    let dose = doses[0];

    let min_age = booking::minimum_age(&selected, current_year).ok_or_else(|| {
        CliError::Validation {
            field: "birth_year".into(),
            reason: "could not derive an age for every selected beneficiary".into(),
        }
    })?;

    println!("Selected beneficiaries:");
    println!("{}", output::beneficiaries_table(&selected, current_year));

    // ── Districts to monitor ─────────────────────────────────────────
    let states = client.list_states().await.map_err(|e| CliError::ReferenceData {
        resource: "states".into(),
        source: e,
    })?;
    println!("{}", output::states_table(&states));
    let state_idx = prompt::input_index("Enter state index", states.len())?;

    let districts = client
        .list_districts(states[state_idx].state_id)
        .await
        .map_err(|e| CliError::ReferenceData {
            resource: "districts".into(),
            source: e,
        })?;
    println!("{}", output::districts_table(&districts));
    let picks = prompt::input_index_list(
        "Enter comma separated index numbers of districts to monitor",
        districts.len(),
    )?;
    let watched: Vec<WatchedDistrict> = picks
        .iter()
        .enumerate()
        .map(|(order, &i)| WatchedDistrict {
            id: districts[i].district_id,
            name: districts[i].district_name.clone(),
            tone_hz: alert::district_tone(order),
        })
        .collect();

    println!("Monitoring districts:");
    println!("{}", output::watched_table(&watched));

    // ── Filters ──────────────────────────────────────────────────────
    let party_size = u32::try_from(selected.len()).unwrap_or(1);
    let min_slots = prompt::input_min_slots(party_size)?;

    let params = SessionParams {
        refresh_interval: cli.refresh_interval,
        min_slots,
        min_age,
        vaccine,
        dose,
    };

    session::run(&client, &mailbox, ctx, &selected, &watched, &params, mobile).await
}
