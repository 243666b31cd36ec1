//! Interactive prompts and index parsing.

use dialoguer::{Input, Select};

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for a mobile number until the operator enters 10 digits.
pub fn input_mobile() -> Result<String, CliError> {
    loop {
        let raw: String = Input::new()
            .with_prompt("Enter 10 digit mobile number for OTP generation")
            .interact_text()
            .map_err(prompt_err)?;

        let raw = raw.trim();
        if raw.len() == 10 && raw.chars().all(|c| c.is_ascii_digit()) {
            return Ok(raw.to_owned());
        }
        eprintln!("A mobile number is exactly 10 digits.");
    }
}

/// Prompt for the minimum-capacity filter, clamped to at least the
/// party size: a center cannot take a booking for more people than it
/// has open slots.
pub fn input_min_slots(party_size: u32) -> Result<u32, CliError> {
    let raw: String = Input::new()
        .with_prompt(format!(
            "Filter out centers with availability less than? Minimum {party_size}"
        ))
        .default(party_size.to_string())
        .interact_text()
        .map_err(prompt_err)?;

    let requested: u32 = raw.trim().parse().unwrap_or(party_size);
    Ok(requested.max(party_size))
}

/// Prompt for a single 1-based index into a list of `len` items;
/// returns the 0-based index.
pub fn input_index(prompt: &str, len: usize) -> Result<usize, CliError> {
    loop {
        let raw: String = Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err)?;

        match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= len => return Ok(n - 1),
            _ => eprintln!("Enter an index between 1 and {len}."),
        }
    }
}

/// Prompt for comma-separated 1-based indices; returns 0-based indices
/// in entry order, deduplicated.
pub fn input_index_list(prompt: &str, len: usize) -> Result<Vec<usize>, CliError> {
    loop {
        let raw: String = Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err)?;

        match parse_index_list(&raw, len) {
            Ok(picks) if !picks.is_empty() => return Ok(picks),
            Ok(_) => eprintln!("Select at least one index."),
            Err(reason) => eprintln!("{reason}"),
        }
    }
}

/// Pick one slot time out of a session's slot list.
pub fn select_slot(slots: &[String]) -> Result<usize, CliError> {
    Select::new()
        .with_prompt("Pick a slot")
        .items(slots)
        .default(0)
        .interact()
        .map_err(prompt_err)
}

/// Parse `"1, 3,4"` into `[0, 2, 3]`, rejecting anything out of
/// `1..=len`.
pub fn parse_index_list(raw: &str, len: usize) -> Result<Vec<usize>, String> {
    let mut picks = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let n: usize = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if n < 1 || n > len {
            return Err(format!("index {n} is out of range (1-{len})"));
        }
        if !picks.contains(&(n - 1)) {
            picks.push(n - 1);
        }
    }
    Ok(picks)
}
