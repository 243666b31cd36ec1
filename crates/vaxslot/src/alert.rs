//! Audible operator alerts.
//!
//! Each watched district gets its own tone so the operator can tell from
//! across the room which district turned up slots. Uses the `beep(1)`
//! binary where available and falls back to the terminal bell (which
//! ignores the frequency).

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

/// Frequency/duration of the attention tone for warnings and booking
/// success.
pub const WARNING_TONE_HZ: u32 = 1000;
pub const WARNING_TONE_MS: u32 = 2000;

/// Duration of each district alert chirp.
pub const DISTRICT_TONE_MS: u32 = 150;

/// Tone for the `order`-th selected district: 440 Hz, 660 Hz, 880 Hz, ...
pub fn district_tone(order: usize) -> u32 {
    440 + u32::try_from(order).unwrap_or(0) * 2 * 110
}

/// Best-effort beep; alerting must never fail a scan.
pub fn beep(freq_hz: u32, millis: u32) {
    let played = Command::new("beep")
        .arg("-f")
        .arg(freq_hz.to_string())
        .arg("-l")
        .arg(millis.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    if !played {
        debug!("beep(1) unavailable, falling back to terminal bell");
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::district_tone;

    #[test]
    fn tones_step_linearly_with_selection_order() {
        assert_eq!(district_tone(0), 440);
        assert_eq!(district_tone(1), 660);
        assert_eq!(district_tone(2), 880);
    }
}
