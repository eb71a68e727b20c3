// race.rs: drives a field of participants through start/pause/reset

use crate::participant::RaceParticipant;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Where the race currently stands. This lives on the controller, not the
/// participants: a participant only knows its counter, and "paused" means
/// nothing more than no run task being alive for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Owns the participants and one cancellable run task per participant.
/// The task handles are re-created on every start; the counters live in the
/// participants and survive across pause cycles.
pub struct RaceController {
    participants: Vec<Arc<RaceParticipant>>,
    runs: Vec<JoinHandle<()>>,
    phase: RacePhase,
}

impl RaceController {
    pub fn new(participants: Vec<Arc<RaceParticipant>>) -> Self {
        Self {
            participants,
            runs: Vec::new(),
            phase: RacePhase::Idle,
        }
    }

    pub fn participants(&self) -> &[Arc<RaceParticipant>] {
        &self.participants
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Spawns one run task per participant. Each participant resumes from
    /// whatever its counter already holds, which is what turns a later
    /// start into a resume.
    pub fn start(&mut self) {
        if self.phase == RacePhase::Running {
            return;
        }
        self.runs = self
            .participants
            .iter()
            .map(|participant| {
                let participant = Arc::clone(participant);
                tokio::spawn(async move { participant.run().await })
            })
            .collect();
        tracing::debug!(racers = self.participants.len(), "race started");
        self.phase = RacePhase::Running;
    }

    /// Aborts every run task and waits for each to wind down, so that by the
    /// time this returns nothing is left mutating a counter. The cancelled
    /// outcome is observed per participant rather than swallowed; a run that
    /// crossed the finish line before the abort landed joins normally.
    pub async fn pause(&mut self) {
        if self.phase != RacePhase::Running {
            return;
        }
        for (participant, run) in self.participants.iter().zip(self.runs.drain(..)) {
            run.abort();
            match run.await {
                Ok(()) => {}
                Err(err) if err.is_cancelled() => {
                    tracing::debug!(
                        name = %participant.name(),
                        progress = participant.current_progress(),
                        "run cancelled"
                    );
                }
                Err(err) => {
                    tracing::warn!(name = %participant.name(), error = %err, "run task failed");
                }
            }
        }
        self.phase = RacePhase::Paused;
    }

    /// Start/pause toggle backing the space key.
    pub async fn toggle(&mut self) {
        match self.phase {
            RacePhase::Running => self.pause().await,
            RacePhase::Finished => {}
            RacePhase::Idle | RacePhase::Paused => self.start(),
        }
    }

    /// Joins the run tasks once they have all completed on their own and
    /// moves the race to `Finished`. Called from the render tick; a cheap
    /// no-op until the whole field is done.
    pub async fn reap_finished(&mut self) {
        if self.phase != RacePhase::Running || self.runs.iter().any(|run| !run.is_finished()) {
            return;
        }
        for (participant, run) in self.participants.iter().zip(self.runs.drain(..)) {
            if let Err(err) = run.await {
                tracing::warn!(name = %participant.name(), error = %err, "run task failed");
            }
        }
        tracing::debug!("race finished");
        self.phase = RacePhase::Finished;
    }

    /// Cancels any in-flight race and puts every participant back on the
    /// starting line.
    pub async fn reset(&mut self) {
        self.pause().await;
        for participant in &self.participants {
            participant.reset();
        }
        self.phase = RacePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantConfig;
    use std::time::Duration;
    use tokio::time;

    fn field(count: usize, config: ParticipantConfig) -> Vec<Arc<RaceParticipant>> {
        (1..=count)
            .map(|i| {
                Arc::new(RaceParticipant::new(format!("Racer {i}"), config.clone()).unwrap())
            })
            .collect()
    }

    async fn tick(delay: Duration, times: u32) {
        for _ in 0..times {
            time::advance(delay).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pause_preserves_progress_and_stops_advancement() {
        let delay = Duration::from_millis(500);
        let mut race = RaceController::new(field(2, ParticipantConfig::default()));
        race.start();
        tokio::task::yield_now().await;
        tick(delay, 5).await;

        race.pause().await;
        assert_eq!(race.phase(), RacePhase::Paused);
        for participant in race.participants() {
            assert_eq!(participant.current_progress(), 5);
        }

        // time passing while paused moves nobody
        tick(delay, 3).await;
        for participant in race.participants() {
            assert_eq!(participant.current_progress(), 5);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_resumes_from_the_pause_point() {
        let delay = Duration::from_millis(500);
        let mut race = RaceController::new(field(2, ParticipantConfig::default()));
        race.toggle().await;
        tokio::task::yield_now().await;
        tick(delay, 5).await;
        race.toggle().await;

        race.toggle().await;
        tokio::task::yield_now().await;
        tick(delay, 5).await;
        race.pause().await;

        for participant in race.participants() {
            assert_eq!(participant.current_progress(), 10);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn whole_field_finishing_moves_race_to_finished() {
        let config = ParticipantConfig {
            max_progress: 3,
            ..ParticipantConfig::default()
        };
        let mut race = RaceController::new(field(2, config.clone()));
        race.start();
        tokio::task::yield_now().await;
        tick(config.progress_delay, 3).await;

        race.reap_finished().await;
        assert_eq!(race.phase(), RacePhase::Finished);
        for participant in race.participants() {
            assert!(participant.is_finished());
        }

        // toggling a finished race is a no-op
        race.toggle().await;
        assert_eq!(race.phase(), RacePhase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_the_field_to_the_starting_line() {
        let delay = Duration::from_millis(500);
        let mut race = RaceController::new(field(3, ParticipantConfig::default()));
        race.start();
        tokio::task::yield_now().await;
        tick(delay, 4).await;

        race.reset().await;
        assert_eq!(race.phase(), RacePhase::Idle);
        for participant in race.participants() {
            assert_eq!(participant.current_progress(), 0);
        }
    }
}
