//! Shared formatting helpers for the race views.
//!
//! Both the full-screen and pipe renderers show a participant as a
//! `current/max` pair; keeping the formatting here keeps the two outputs
//! consistent.

use crate::participant::RaceParticipant;

/// Label shown on a participant's gauge and in pipe-mode standings.
pub fn progress_label(participant: &RaceParticipant) -> String {
    format!(
        "{}/{}",
        participant.current_progress(),
        participant.max_progress()
    )
}

/// Gauge-safe ratio. The participant does not clamp overshoot and the gauge
/// widget only accepts [0, 1], so the rendering boundary clamps.
pub fn gauge_ratio(participant: &RaceParticipant) -> f64 {
    participant.progress_factor().clamp(0.0, 1.0)
}
