// Client-side booking-plan logic
//
// Pure functions between the wire models and the booking request:
// session filtering, option ordering, and the derived values (minimum
// age, due dose) that gate a booking attempt. Nothing here touches the
// network.

use chrono::{Days, NaiveDate};

use crate::models::{Beneficiary, BookingRequest, Center, Session};

/// One bookable center/session pair produced by a calendar scan.
///
/// Fresh every scan; session ids go stale quickly, so options are never
/// reused across scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOption {
    pub center_name: String,
    pub district: String,
    pub center_id: u32,
    pub available: u32,
    /// `DD-MM-YYYY`.
    pub date: String,
    pub slots: Vec<String>,
    pub session_id: String,
}

/// Whether a session passes the operator's filters: enough capacity for
/// the whole party, and open to the youngest member.
pub fn session_matches(session: &Session, minimum_slots: u32, minimum_age: u32) -> bool {
    session.available_capacity >= minimum_slots && session.min_age_limit <= minimum_age
}

/// Flatten a calendar response into matching slot options.
pub fn collect_options(centers: &[Center], minimum_slots: u32, minimum_age: u32) -> Vec<SlotOption> {
    let mut options = Vec::new();
    for center in centers {
        for session in &center.sessions {
            if session_matches(session, minimum_slots, minimum_age) {
                options.push(SlotOption {
                    center_name: center.name.clone(),
                    district: center.district_name.clone(),
                    center_id: center.center_id,
                    available: session.available_capacity,
                    date: session.date.clone(),
                    slots: session.slots.clone(),
                    session_id: session.session_id.clone(),
                });
            }
        }
    }
    options
}

/// Order options by (district, center, date ascending), case-insensitive
/// on the names. `sort_by_key` is stable, so ties keep scan order.
pub fn sort_options(options: &mut [SlotOption]) {
    options.sort_by_key(|o| {
        (
            o.district.to_lowercase(),
            o.center_name.to_lowercase(),
            parse_session_date(&o.date).unwrap_or(NaiveDate::MAX),
        )
    });
}

/// Parse a session date (`DD-MM-YYYY`).
pub fn parse_session_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d-%m-%Y").ok()
}

/// The next calendar day in the API's `DD-MM-YYYY` format. Scans only
/// ever look one day ahead.
pub fn next_day(today: NaiveDate) -> String {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    tomorrow.format("%d-%m-%Y").to_string()
}

/// Minimum derived age across the selected beneficiaries, or `None` if
/// any birth year is unusable.
pub fn minimum_age(selected: &[Beneficiary], current_year: i32) -> Option<u32> {
    selected
        .iter()
        .map(|b| b.age(current_year))
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .min()
}

/// Distinct vaccine types across the selected beneficiaries, in first-seen
/// order. More than one entry means the selection cannot be booked
/// together. An empty string counts as its own value (no dose yet).
pub fn distinct_vaccines(selected: &[Beneficiary]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for b in selected {
        if !seen.contains(&b.vaccine) {
            seen.push(b.vaccine.clone());
        }
    }
    seen
}

/// Distinct due doses across the selected beneficiaries, in first-seen
/// order. More than one entry means a mixed first/second-dose party.
pub fn distinct_doses(selected: &[Beneficiary]) -> Vec<u8> {
    let mut seen: Vec<u8> = Vec::new();
    for b in selected {
        let dose = b.due_dose();
        if !seen.contains(&dose) {
            seen.push(dose);
        }
    }
    seen
}

/// Build the booking request for one chosen option and slot.
///
/// Returns `None` when `slot_index` is out of range for the option.
pub fn build_request(
    option: &SlotOption,
    slot_index: usize,
    selected: &[Beneficiary],
    dose: u8,
) -> Option<BookingRequest> {
    let slot = option.slots.get(slot_index)?.clone();
    Some(BookingRequest {
        beneficiaries: selected.iter().map(|b| b.reference_id.clone()).collect(),
        dose,
        center_id: option.center_id,
        session_id: option.session_id.clone(),
        slot,
    })
}
