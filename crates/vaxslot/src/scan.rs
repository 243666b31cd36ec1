//! Calendar sweep across the watched districts.

use vaxslot_api::booking::{SlotOption, collect_options};
use vaxslot_api::{AuthContext, CowinClient, Error};

use crate::alert;

/// A district the operator chose to monitor, with its alert tone.
#[derive(Debug, Clone)]
pub struct WatchedDistrict {
    pub id: u32,
    pub name: String,
    pub tone_hz: u32,
}

/// Scan every watched district's calendar for `date` and collect the
/// sessions that pass the capacity/age filters.
///
/// Districts are visited one at a time; a 401 on any of them aborts the
/// sweep with [`Error::TokenExpired`]. After the sweep, each district
/// that produced at least one option chirps twice at its tone.
pub async fn scan_districts(
    client: &CowinClient,
    ctx: &AuthContext,
    watched: &[WatchedDistrict],
    vaccine: Option<&str>,
    min_slots: u32,
    min_age: u32,
    date: &str,
) -> Result<Vec<SlotOption>, Error> {
    let mut options = Vec::new();

    for district in watched {
        let calendar = client
            .sessions_by_district(ctx, district.id, date, vaccine)
            .await?;
        println!(
            "Centers available in {} on {}: {}",
            district.name,
            date,
            calendar.centers.len()
        );
        options.extend(collect_options(&calendar.centers, min_slots, min_age));
    }

    for district in watched {
        if options.iter().any(|o| o.district == district.name) {
            for _ in 0..2 {
                alert::beep(district.tone_hz, alert::DISTRICT_TONE_MS);
            }
        }
    }

    Ok(options)
}
