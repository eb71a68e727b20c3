//! Pipe mode: non-interactive race output for scripting.
//!
//! Starts the race immediately, prints one standings line to stdout
//! whenever any participant's progress changes, and exits once the whole
//! field has finished.

use crate::race::{RaceController, RacePhase};
use crate::ui::progress_label;
use std::time::Duration;

/// How often pipe mode samples the field for changes.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn display_race_pipe(
    mut race: RaceController,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    race.start();

    let mut last_seen = progress_snapshot(&race);
    println!("{}", standings_line(&race));

    while race.phase() != RacePhase::Finished {
        tokio::time::sleep(POLL_INTERVAL).await;
        race.reap_finished().await;

        let seen = progress_snapshot(&race);
        if seen != last_seen {
            println!("{}", standings_line(&race));
            last_seen = seen;
        }
    }
    Ok(())
}

fn progress_snapshot(race: &RaceController) -> Vec<u32> {
    race.participants()
        .iter()
        .map(|participant| participant.current_progress())
        .collect()
}

fn standings_line(race: &RaceController) -> String {
    race.participants()
        .iter()
        .map(|participant| format!("{} {}", participant.name(), progress_label(participant)))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{ParticipantConfig, RaceParticipant};
    use std::sync::Arc;

    #[test]
    fn standings_line_lists_every_participant() {
        let race = RaceController::new(vec![
            Arc::new(RaceParticipant::new("Player 1", ParticipantConfig::default()).unwrap()),
            Arc::new(
                RaceParticipant::new(
                    "Player 2",
                    ParticipantConfig {
                        initial_progress: 40,
                        ..ParticipantConfig::default()
                    },
                )
                .unwrap(),
            ),
        ]);
        assert_eq!(standings_line(&race), "Player 1 0/100  Player 2 40/100");
    }
}
