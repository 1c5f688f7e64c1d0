mod app;
mod config;
mod handlers;
mod notify;
mod prefs;
mod reconcile;
mod sorting;
mod source;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{io, time::Duration};

use app::App;
use handlers::{handle_key_event, KeyAction};
use ui::{
    render_file_list, render_header, render_help_panel, render_status_bar, FileListState,
    HeaderState, StatusBarState,
};

#[tokio::main]
async fn main() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            eprintln!("Failed to initialize app: {}", e);
            return Err(e);
        }
    };

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    // Initial load, then the two periodic actions take over
    app.poll_now().await;

    let mut last_tick = std::time::Instant::now();

    loop {
        // Countdown ticks once a second, independent of the poll cadence
        if last_tick.elapsed() >= Duration::from_secs(1) {
            app.tick_countdown();
            last_tick = std::time::Instant::now();
        }

        // Poll timer; the awaited fetch keeps polls serialized
        if app.refresh_due() {
            app.poll_now().await;
        }

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match handle_key_event(app, key).await {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Continue => {}
                }
            }
        }
    }
}

fn render_ui(f: &mut Frame, app: &mut App) {
    let header_height = if app.show_controls { 4 } else { 3 };

    let mut constraints = vec![Constraint::Length(header_height)];
    if app.show_debug {
        constraints.push(Constraint::Min(10));
        constraints.push(Constraint::Percentage(25));
    } else {
        constraints.push(Constraint::Min(10));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.area());

    let source_label = app.source.describe();
    let header_state = HeaderState {
        source: &source_label,
        sort: app.prefs.sort,
        remaining_seconds: app.refresh.remaining_seconds,
        show_controls: app.show_controls,
    };
    render_header(f, &header_state, chunks[0]);

    let list_state = FileListState {
        view: &app.view,
        selected: app.cursor.selected,
        highlights: &app.highlights,
        now: chrono::Utc::now().timestamp(),
    };
    render_file_list(f, &list_state, chunks[1]);

    let mut chunk_index = 2;
    if app.show_debug {
        let debug_text: String = app
            .debug_log
            .iter()
            .rev()
            .take(10)
            .rev()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let debug_panel = Paragraph::new(debug_text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Debug Log [l: hide]"),
            );
        f.render_widget(debug_panel, chunks[chunk_index]);
        chunk_index += 1;
    }

    let status_state = StatusBarState {
        last_updated: app.refresh.last_updated,
        remaining_seconds: app.refresh.remaining_seconds,
    };
    render_status_bar(f, &status_state, chunks[chunk_index]);

    // Help overlay on top of everything
    if app.show_help {
        render_help_panel(f, f.area());
    }
}
