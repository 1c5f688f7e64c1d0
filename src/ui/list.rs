use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::format;
use crate::app::state::{Highlights, ListView};

pub struct FileListState<'a> {
    pub view: &'a ListView,
    pub selected: usize,
    pub highlights: &'a Highlights,
    /// Current unix time, for the relative-time column
    pub now: i64,
}

pub fn render_file_list(f: &mut Frame, state: &FileListState, area: ratatui::layout::Rect) {
    match state.view {
        ListView::Loading => {
            let loading = Paragraph::new("Loading file list...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(list_block(0));
            f.render_widget(loading, area);
        }
        ListView::Empty => {
            let empty = Paragraph::new("No files found in the source folder")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(list_block(0));
            f.render_widget(empty, area);
        }
        ListView::Error(err) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("⚠ {}", err.message),
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("Path: {}", err.path)),
                Line::from(err.suggestion.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "Check your config.toml to update the source folder.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let panel = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title("Source unavailable")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                );
            f.render_widget(panel, area);
        }
        ListView::Files(files) => {
            let items: Vec<ListItem> = files
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let hot = state.highlights.is_hot(&entry.key());
                    let mut style = if i == state.selected {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    if hot {
                        style = style.bg(Color::Rgb(60, 60, 0));
                    }

                    let line = Line::from(vec![
                        Span::styled(
                            format!("{:<40}", entry.name),
                            style.add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("{:>10}  ", format::file_size(entry.size)), style),
                        Span::styled(
                            format!(
                                "{} ({})",
                                format::relative_time(entry.modified, state.now),
                                format::full_date_time(entry.modified)
                            ),
                            style,
                        ),
                    ]);
                    ListItem::new(line)
                })
                .collect();

            let list = List::new(items).block(list_block(files.len()));
            f.render_widget(list, area);
        }
    }
}

fn list_block(count: usize) -> Block<'static> {
    Block::default()
        .title(format!("Files ({}) [j/k: move | o: open | r: refresh]", count))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}
