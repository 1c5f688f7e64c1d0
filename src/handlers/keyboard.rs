use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::sorting::SortField;

pub enum KeyAction {
    Continue,
    Quit,
}

pub async fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // Any key dismisses the help overlay
    if app.show_help {
        app.show_help = false;
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,

        // Sort buttons: active field flips direction, new field starts ascending
        KeyCode::Char('n') => app.press_sort(SortField::Name),
        KeyCode::Char('d') => app.press_sort(SortField::Date),
        KeyCode::Char('s') => app.press_sort(SortField::Size),

        KeyCode::Char('r') => app.poll_now().await,

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),

        // Chrome toggles; no data-model interaction
        KeyCode::Char('m') => app.show_controls = !app.show_controls,
        KeyCode::Char('l') => app.show_debug = !app.show_debug,
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }

    KeyAction::Continue
}
