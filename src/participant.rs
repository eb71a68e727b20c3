// participant.rs: progress state holder for a single race participant

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParticipantError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Tunable settings for one participant. `Default` is the stock race:
/// 100 steps, one increment every 500ms, starting from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantConfig {
    pub max_progress: u32,
    pub progress_delay: Duration,
    pub progress_increment: u32,
    pub initial_progress: u32,
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            max_progress: 100,
            progress_delay: Duration::from_millis(500),
            progress_increment: 1,
            initial_progress: 0,
        }
    }
}

/// State holder for one race participant.
///
/// The counter is owned by the participant: only [`RaceParticipant::run`]
/// and [`RaceParticipant::reset`] write it. It is atomic so the render loop
/// can read it while a run task is mid-race.
#[derive(Debug)]
pub struct RaceParticipant {
    name: String,
    max_progress: u32,
    progress_delay: Duration,
    progress_increment: u32,
    current_progress: AtomicU32,
}

impl RaceParticipant {
    pub fn new(
        name: impl Into<String>,
        config: ParticipantConfig,
    ) -> Result<Self, ParticipantError> {
        if config.max_progress == 0 {
            return Err(ParticipantError::InvalidConfiguration(format!(
                "max_progress={}; must be > 0",
                config.max_progress
            )));
        }
        if config.progress_increment == 0 {
            return Err(ParticipantError::InvalidConfiguration(format!(
                "progress_increment={}; must be > 0",
                config.progress_increment
            )));
        }
        // initial_progress is deliberately not checked against max_progress:
        // a participant constructed at or past the maximum is valid and its
        // run returns immediately.
        Ok(Self {
            name: name.into(),
            max_progress: config.max_progress,
            progress_delay: config.progress_delay,
            progress_increment: config.progress_increment,
            current_progress: AtomicU32::new(config.initial_progress),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_progress(&self) -> u32 {
        self.max_progress
    }

    pub fn progress_delay(&self) -> Duration {
        self.progress_delay
    }

    pub fn current_progress(&self) -> u32 {
        self.current_progress.load(Ordering::Relaxed)
    }

    /// Ratio of current progress to the maximum. Not clamped: an increment
    /// that overshoots on the final tick pushes this past 1.0, and consumers
    /// that need [0, 1] clamp at their own boundary.
    pub fn progress_factor(&self) -> f64 {
        f64::from(self.current_progress()) / f64::from(self.max_progress)
    }

    pub fn is_finished(&self) -> bool {
        self.current_progress() >= self.max_progress
    }

    /// Puts progress back to 0, regardless of the initial value the
    /// participant was constructed with.
    pub fn reset(&self) {
        self.current_progress.store(0, Ordering::Relaxed);
    }

    /// Advances progress by the configured increment until the maximum is
    /// reached, sleeping the configured delay before each step.
    ///
    /// The sleep is the only suspension point, so aborting the task driving
    /// this future stops the participant between whole increments; calling
    /// `run` again resumes from wherever the counter stopped.
    pub async fn run(&self) {
        while self.current_progress() < self.max_progress {
            time::sleep(self.progress_delay).await;
            self.current_progress
                .fetch_add(self.progress_increment, Ordering::Relaxed);
        }
    }
}
