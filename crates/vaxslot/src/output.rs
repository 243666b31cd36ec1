//! Indexed table rendering for interactive selection.
//!
//! Every list the operator picks from is shown with a 1-based `Idx`
//! column; the prompts accept those indices. Internal ids (center,
//! session) are stripped from the options table for readability.

use tabled::{Table, Tabled, settings::Style};

use vaxslot_api::booking::SlotOption;
use vaxslot_api::models::{Beneficiary, District, State};

use crate::scan::WatchedDistrict;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "Idx")]
    idx: usize,
    #[tabled(rename = "State")]
    state: String,
}

#[derive(Tabled)]
struct DistrictRow {
    #[tabled(rename = "Idx")]
    idx: usize,
    #[tabled(rename = "District")]
    district: String,
}

#[derive(Tabled)]
struct BeneficiaryRow {
    #[tabled(rename = "Idx")]
    idx: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Vaccine")]
    vaccine: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Due dose")]
    dose: u8,
}

#[derive(Tabled)]
struct WatchedRow {
    #[tabled(rename = "Idx")]
    idx: usize,
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Alert tone (Hz)")]
    tone: u32,
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Idx")]
    idx: usize,
    #[tabled(rename = "Center")]
    center: String,
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Available")]
    available: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Slots")]
    slots: String,
}

// ── Renderers ───────────────────────────────────────────────────────

pub fn states_table(states: &[State]) -> String {
    let rows: Vec<_> = states
        .iter()
        .enumerate()
        .map(|(i, s)| StateRow {
            idx: i + 1,
            state: s.state_name.clone(),
        })
        .collect();
    render(&rows)
}

pub fn districts_table(districts: &[District]) -> String {
    let rows: Vec<_> = districts
        .iter()
        .enumerate()
        .map(|(i, d)| DistrictRow {
            idx: i + 1,
            district: d.district_name.clone(),
        })
        .collect();
    render(&rows)
}

pub fn beneficiaries_table(beneficiaries: &[Beneficiary], current_year: i32) -> String {
    let rows: Vec<_> = beneficiaries
        .iter()
        .enumerate()
        .map(|(i, b)| BeneficiaryRow {
            idx: i + 1,
            name: b.name.clone(),
            vaccine: if b.vaccine.is_empty() {
                "-".into()
            } else {
                b.vaccine.clone()
            },
            age: b
                .age(current_year)
                .map_or_else(|| "?".into(), |a| a.to_string()),
            dose: b.due_dose(),
        })
        .collect();
    render(&rows)
}

pub fn watched_table(watched: &[WatchedDistrict]) -> String {
    let rows: Vec<_> = watched
        .iter()
        .enumerate()
        .map(|(i, d)| WatchedRow {
            idx: i + 1,
            district: d.name.clone(),
            tone: d.tone_hz,
        })
        .collect();
    render(&rows)
}

pub fn options_table(options: &[SlotOption]) -> String {
    let rows: Vec<_> = options
        .iter()
        .enumerate()
        .map(|(i, o)| OptionRow {
            idx: i + 1,
            center: o.center_name.clone(),
            district: o.district.clone(),
            available: o.available,
            date: o.date.clone(),
            slots: o.slots.join(", "),
        })
        .collect();
    render(&rows)
}

/// Operator notes shown before beneficiary selection. The server does
/// not enforce these; a mismatched party fails at booking time or,
/// worse, books wrongly.
pub fn print_party_notes() {
    eprintln!(
        "\nNotes on selecting beneficiaries:\n\
         - everyone in one booking takes the same dose (first OR second)\n\
         - second-dose bookings must all use the same vaccine\n\
         - mixed age groups shrink the set of matching sessions\n"
    );
}

fn render<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
