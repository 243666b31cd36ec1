// CoWIN API response types
//
// Models for the public appointment API. Fields use `#[serde(default)]`
// liberally because the API is inconsistent about field presence across
// beneficiary states and center types.

use serde::{Deserialize, Serialize};

// ── Location reference data ──────────────────────────────────────────

/// Envelope for `GET v2/admin/location/states`.
#[derive(Debug, Deserialize)]
pub struct StatesEnvelope {
    pub states: Vec<State>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub state_id: u32,
    pub state_name: String,
}

/// Envelope for `GET v2/admin/location/districts/{state_id}`.
#[derive(Debug, Deserialize)]
pub struct DistrictsEnvelope {
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub district_id: u32,
    pub district_name: String,
}

// ── Beneficiaries ────────────────────────────────────────────────────

/// Envelope for `GET v2/appointment/beneficiaries`.
#[derive(Debug, Deserialize)]
pub struct BeneficiariesEnvelope {
    pub beneficiaries: Vec<Beneficiary>,
}

/// A person registered for vaccination under the authenticated mobile
/// number.
///
/// `vaccine` and the dose dates come back as empty strings (not null,
/// not absent) for the unvaccinated, so they are plain `String`s with
/// defaults rather than `Option`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(rename = "beneficiary_reference_id")]
    pub reference_id: String,
    pub name: String,
    /// Birth year as the API returns it: a string.
    pub birth_year: String,
    #[serde(default)]
    pub vaccine: String,
    #[serde(default)]
    pub dose1_date: String,
    #[serde(default)]
    pub dose2_date: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Beneficiary {
    /// Age derived from the birth year, `None` when the birth year does
    /// not parse or lies in the future.
    pub fn age(&self, current_year: i32) -> Option<u32> {
        let birth_year: i32 = self.birth_year.trim().parse().ok()?;
        u32::try_from(current_year - birth_year).ok()
    }

    /// The dose this beneficiary is due for: 1 until the first dose has
    /// a date, 2 afterwards.
    pub fn due_dose(&self) -> u8 {
        if self.dose1_date.trim().is_empty() {
            1
        } else {
            2
        }
    }
}

// ── Calendar ─────────────────────────────────────────────────────────

/// Envelope for `GET v2/appointment/sessions/calendarByDistrict`.
#[derive(Debug, Deserialize)]
pub struct CalendarEnvelope {
    #[serde(default)]
    pub centers: Vec<Center>,
}

/// One vaccination center with its sessions for the requested week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    pub center_id: u32,
    pub name: String,
    pub district_name: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One date/vaccine combination at a center, with capacity and slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    /// `DD-MM-YYYY`, as the API formats it.
    pub date: String,
    #[serde(default)]
    pub available_capacity: u32,
    #[serde(default)]
    pub min_age_limit: u32,
    #[serde(default)]
    pub vaccine: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

// ── Booking ──────────────────────────────────────────────────────────

/// Body for `POST v2/appointment/schedule`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingRequest {
    pub beneficiaries: Vec<String>,
    pub dose: u8,
    pub center_id: u32,
    pub session_id: String,
    pub slot: String,
}

/// Success body from the schedule endpoint.
#[derive(Debug, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub appointment_confirmation_no: Option<String>,
}

// ── OTP / token ──────────────────────────────────────────────────────

/// Response from `POST v2/auth/generateMobileOTP`.
#[derive(Debug, Deserialize)]
pub struct TxnEnvelope {
    #[serde(rename = "txnId")]
    pub txn_id: String,
}

/// Response from `POST v2/auth/validateMobileOtp`.
#[derive(Debug, Deserialize)]
pub struct TokenEnvelope {
    pub token: String,
}
