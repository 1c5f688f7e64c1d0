use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::sorting::{SortField, SortState};

pub struct HeaderState<'a> {
    pub source: &'a str,
    pub sort: SortState,
    pub remaining_seconds: u64,
    pub show_controls: bool,
}

pub fn render_header(f: &mut Frame, state: &HeaderState, area: ratatui::layout::Rect) {
    let mut lines = vec![Line::from(Span::styled(
        format!("Dropdeck - {}", state.source),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if state.show_controls {
        let mut spans = Vec::new();
        for (key, field) in [
            ("n", SortField::Name),
            ("d", SortField::Date),
            ("s", SortField::Size),
        ] {
            if !spans.is_empty() {
                spans.push(Span::raw(" | "));
            }
            let style = if state.sort.field == field {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("[{}] ", key), Style::default().add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(state.sort.label(field).to_string(), style));
        }

        spans.push(Span::raw("    "));
        spans.push(Span::styled(
            format!("auto-refresh: {}s", state.remaining_seconds),
            Style::default().fg(Color::Green),
        ));

        lines.push(Line::from(spans));
    }

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, area);
}
