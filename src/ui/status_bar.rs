use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct StatusBarState {
    pub last_updated: Option<DateTime<Local>>,
    pub remaining_seconds: u64,
}

pub fn render_status_bar(f: &mut Frame, state: &StatusBarState, area: ratatui::layout::Rect) {
    let last_updated = state
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let status_bar = Paragraph::new(Line::from(vec![
        Span::raw("Last updated: "),
        Span::styled(last_updated, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | Next refresh in: "),
        Span::styled(
            format!("{}s", state.remaining_seconds),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("n/d/s", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": sort | "),
        Span::styled("m", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": controls | "),
        Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": help | "),
        Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": quit"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(status_bar, area);
}
