//! CLI error types with miette diagnostics.
//!
//! Maps `vaxslot_api::Error` and startup validation failures into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes: 0 success, 1 unrecoverable validation/API failure,
/// 2 usage (clap), 3 authentication.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Startup validation ───────────────────────────────────────────

    #[error("No beneficiaries to book for")]
    #[diagnostic(
        code(vaxslot::no_beneficiaries),
        help(
            "There must be at least one beneficiary registered under this\n\
             mobile number, and at least one selected at the prompt."
        )
    )]
    NoBeneficiaries,

    #[error("Selected beneficiaries span more than one vaccine type: {found}")]
    #[diagnostic(
        code(vaxslot::mixed_vaccines),
        help(
            "All beneficiaries in one booking must take the same vaccine.\n\
             Book COVISHIELD and COVAXIN parties in separate runs."
        )
    )]
    MixedVaccines { found: String },

    #[error("Selected beneficiaries are due for different doses: {found}")]
    #[diagnostic(
        code(vaxslot::mixed_doses),
        help(
            "A booking carries a single dose number. Book first-dose and\n\
             second-dose beneficiaries in separate runs."
        )
    )]
    MixedDoses { found: String },

    // ── Reference data ───────────────────────────────────────────────

    #[error("Unable to fetch {resource}")]
    #[diagnostic(
        code(vaxslot::reference_data),
        help("The location lookups are unauthenticated; check connectivity and retry.")
    )]
    ReferenceData {
        resource: String,
        #[source]
        source: vaxslot_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(vaxslot::auth),
        help(
            "Check that the SMS forwarder is running on the phone and that\n\
             the mobile number is registered with CoWIN. A token passed via\n\
             --token may simply have expired."
        )
    )]
    Auth { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vaxslot::validation))]
    Validation { field: String, reason: String },

    // ── Pass-through ─────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(vaxslot::api))]
    Api(#[from] vaxslot_api::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Auth { .. } => exit_code::AUTH,
            _ => exit_code::GENERAL,
        }
    }
}
