use ratatui::style::{Color, Modifier, Style};

pub struct RaceStyles {
    pub header: Style,
    pub gauge: Style,
    pub finished: Style,
    pub help: Style,
}

impl Default for RaceStyles {
    fn default() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(Color::Green),
            finished: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help: Style::default().add_modifier(Modifier::DIM),
        }
    }
}
