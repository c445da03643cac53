//! Worked-duration calculation for sessions.

use chrono::NaiveDateTime;

use crate::session::SessionState;

/// Worked seconds for a session, floored at zero.
///
/// Open sessions are measured against `now`, so callers driving a live
/// counter re-invoke this on every tick. Sub-second precision is dropped.
pub fn elapsed_seconds(session: SessionState, now: NaiveDateTime) -> i64 {
    let seconds = match session {
        SessionState::NoSession => 0,
        SessionState::Open { clock_in } => now.signed_duration_since(clock_in).num_seconds(),
        SessionState::Closed {
            clock_in,
            clock_out,
        } => clock_out.signed_duration_since(clock_in).num_seconds(),
    };
    seconds.max(0)
}

/// Formats seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
