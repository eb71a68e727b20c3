mod participant;
mod race;
mod ui;

use crate::participant::{ParticipantConfig, RaceParticipant};
use crate::race::RaceController;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Print progress standings to stdout (default is the full-screen UI)
    #[arg(long)]
    pipe: bool,
    /// Participant names (comma-separated)
    #[arg(
        long = "racers",
        value_name = "NAME1,NAME2",
        value_delimiter = ',',
        default_values_t = vec!["Player 1".to_string(), "Player 2".to_string()]
    )]
    racers: Vec<String>,
    /// Progress value at which a participant finishes
    #[arg(long, default_value_t = 100)]
    max_progress: u32,
    /// Milliseconds between increments
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Progress added per increment
    #[arg(long, default_value_t = 1)]
    increment: u32,
    /// Progress every participant starts from
    #[arg(long, default_value_t = 0)]
    head_start: u32,
    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug_log: bool,
}

impl Config {
    fn participant_config(&self) -> ParticipantConfig {
        ParticipantConfig {
            max_progress: self.max_progress,
            progress_delay: Duration::from_millis(self.delay_ms),
            progress_increment: self.increment,
            initial_progress: self.head_start,
        }
    }
}

fn init_tracing(debug_log: bool) {
    let default_directive = if debug_log {
        "racetracker=debug"
    } else {
        "racetracker=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cfg = Config::parse();
    init_tracing(cfg.debug_log);

    let participant_config = cfg.participant_config();
    let mut participants = Vec::with_capacity(cfg.racers.len());
    for name in &cfg.racers {
        participants.push(Arc::new(RaceParticipant::new(
            name.trim(),
            participant_config.clone(),
        )?));
    }
    let race = RaceController::new(participants);

    let result = if cfg.pipe {
        ui::pipe::display_race_pipe(race).await
    } else {
        ui::modern::display_race_modern(race).await
    };

    // Print error if any, for better diagnostics
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}
