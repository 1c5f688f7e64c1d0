use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const BINDINGS: &[(&str, &str)] = &[
    ("n", "sort by name (press again to flip A → Z / Z → A)"),
    ("d", "sort by date (Oldest / Newest)"),
    ("s", "sort by size (Smallest / Largest)"),
    ("r", "refresh now"),
    ("j / Down", "select next file"),
    ("k / Up", "select previous file"),
    ("o / Enter", "open the selected file"),
    ("m", "show/hide the sort controls"),
    ("l", "show/hide the debug log"),
    ("?", "this help"),
    ("q / Esc", "quit"),
];

pub fn render_help_panel(f: &mut Frame, area: Rect) {
    // Centered overlay, 60% width, 70% height
    let popup_width = (area.width as f32 * 0.60) as u16;
    let popup_height = (area.height as f32 * 0.70) as u16;
    let popup_x = area.x + (area.width - popup_width) / 2;
    let popup_y = area.y + (area.height - popup_height) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Keybindings",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (keys, description) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", keys), Style::default().fg(Color::Green)),
            Span::raw(*description),
        ]));
    }

    let help_paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help - Press any key to close ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help_paragraph, popup_area);
}
