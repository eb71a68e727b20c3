//! Full-screen TUI mode for watching the race live.
//!
//! One progress gauge per participant, the race phase in the header and the
//! key bindings in the footer. The event loop uses `tokio::select!` to
//! handle:
//! - User keyboard input (space to start/pause, r to reset, q/ESC to quit)
//! - A frame tick while the race is running, which redraws the gauges and
//!   reaps runs that crossed the finish line

use crate::race::{RaceController, RacePhase};
use crate::ui::styles::RaceStyles;
use crate::ui::{gauge_ratio, progress_label};
use crossterm::{
    event::{Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Gauge, Paragraph},
};
use std::io;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often the gauges are redrawn while the race advances.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Display the race in modern TUI mode until the user quits.
pub async fn display_race_modern(
    mut race: RaceController,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    enable_raw_mode().map_err(to_boxed_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(to_boxed_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(to_boxed_err)?;
    let styles = RaceStyles::default();

    // Single background thread to poll for crossterm events and forward them
    // to the async runtime via `event_rx`. Use try_send so the thread can
    // exit when the receiver is closed.
    let (event_tx, mut event_rx) = mpsc::channel(32);
    thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if event_tx.try_send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        // ignore and continue polling
                    }
                },
                Ok(false) => {
                    // timeout, continue
                }
                Err(_) => {
                    // on error, sleep a bit to avoid a busy loop
                    thread::sleep(Duration::from_millis(100));
                }
            }
        }
    });

    let mut should_exit = false;
    while !should_exit {
        draw(&mut terminal, &race, &styles)?;

        tokio::select! {
            biased;

            // User keyboard input
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(event) => process_event(event, &mut race, &mut should_exit).await,
                    // Event channel closed -> exit gracefully
                    None => should_exit = true,
                }
            }

            // Frame tick; only armed while the race advances
            _ = async {
                if race.phase() == RacePhase::Running {
                    tokio::time::sleep(FRAME_INTERVAL).await;
                } else {
                    futures_util::future::pending::<()>().await;
                }
            } => {
                race.reap_finished().await;
            }
        }
    }

    // Stop any run still going before giving the terminal back.
    race.pause().await;
    disable_raw_mode().map_err(to_boxed_err)?;
    execute!(io::stdout(), LeaveAlternateScreen).map_err(to_boxed_err)?;
    Ok(())
}

/// Handle user input events (keyboard)
async fn process_event(event: Event, race: &mut RaceController, should_exit: &mut bool) {
    if let Event::Key(key) = event {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *should_exit = true;
            }
            KeyCode::Char('c')
                if key
                    .modifiers
                    .contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                *should_exit = true;
            }
            KeyCode::Char(' ') => race.toggle().await,
            KeyCode::Char('r') => race.reset().await,
            _ => {}
        }
    }
}

fn draw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    race: &RaceController,
    styles: &RaceStyles,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    terminal
        .draw(|frame| {
            let mut constraints = vec![Constraint::Length(1)];
            constraints.extend(
                std::iter::repeat(Constraint::Length(3)).take(race.participants().len()),
            );
            constraints.push(Constraint::Min(0));
            constraints.push(Constraint::Length(1));
            let rows = Layout::vertical(constraints).split(frame.area());

            let header = format!("Race Tracker [{}]", phase_label(race.phase()));
            frame.render_widget(Paragraph::new(header).style(styles.header), rows[0]);

            for (i, participant) in race.participants().iter().enumerate() {
                let style = if participant.is_finished() {
                    styles.finished
                } else {
                    styles.gauge
                };
                let gauge = Gauge::default()
                    .block(Block::bordered().title(participant.name().to_string()))
                    .gauge_style(style)
                    .ratio(gauge_ratio(participant))
                    .label(progress_label(participant));
                frame.render_widget(gauge, rows[i + 1]);
            }

            frame.render_widget(
                Paragraph::new("space start/pause   r reset   q quit").style(styles.help),
                rows[rows.len() - 1],
            );
        })
        .map_err(to_boxed_err)?;
    Ok(())
}

fn phase_label(phase: RacePhase) -> &'static str {
    match phase {
        RacePhase::Idle => "press space to start",
        RacePhase::Running => "running",
        RacePhase::Paused => "paused",
        RacePhase::Finished => "finished",
    }
}

fn to_boxed_err<E: std::error::Error + Send + Sync + 'static>(
    e: E,
) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(e)
}
