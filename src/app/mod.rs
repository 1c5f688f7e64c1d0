pub mod state;
mod refresh;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::Config;
use crate::notify::SoundPlayer;
use crate::prefs::Preferences;
use crate::reconcile::{reconcile, Effect};
use crate::sorting::{self, SortField};
use crate::source::http::HttpSource;
use crate::source::local::LocalFolder;
use crate::source::{FileSource, Listing};

pub use state::{Highlights, ListCursor, ListView, RefreshState};

const DEBUG_LOG_CAPACITY: usize = 100;

pub struct App {
    // Configuration and durable preferences
    pub config: Config,
    pub prefs: Preferences,
    prefs_path: Option<PathBuf>,

    // Where the listing comes from
    pub source: Box<dyn FileSource>,

    // Rendered list and its chrome state
    pub view: ListView,
    pub cursor: ListCursor,
    pub highlights: Highlights,

    // Refresh scheduler state
    pub refresh: RefreshState,
    pub(crate) last_poll: Instant,

    // Notifications
    pub sound: Option<SoundPlayer>,

    // UI chrome
    pub show_controls: bool,
    pub show_help: bool,
    pub show_debug: bool,
    pub debug_log: VecDeque<String>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        };

        let prefs = Preferences::load();

        let source: Box<dyn FileSource> = match &config.source.url {
            Some(url) if !url.is_empty() => Box::new(HttpSource::new(url.clone())),
            _ => Box::new(LocalFolder::new(
                config.source.folder.clone(),
                &config.source.file_types,
            )),
        };

        let mut app = Self::with_parts(config, prefs, source);
        match Preferences::storage_path() {
            Ok(path) => app.prefs_path = Some(path),
            Err(e) => {
                tracing::warn!("Cannot resolve preferences path: {}", e);
                app.add_debug(format!(
                    "Preferences will not persist (no config directory): {}",
                    e
                ));
            }
        }

        app.add_debug(format!("Watching {}", app.source.describe()));
        app.add_debug(format!(
            "Auto-refresh every {}s, sorting by {:?} {:?}",
            app.refresh.interval_seconds, app.prefs.sort.field, app.prefs.sort.direction
        ));

        match SoundPlayer::from_config(&app.config.notifications) {
            Ok(Some(player)) => {
                app.add_debug(format!("Notifications: {}", player.describe()));
                app.sound = Some(player);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Notifications disabled: {}", e);
                app.add_debug(format!("Notifications disabled: {}", e));
            }
        }

        Ok(app)
    }

    /// Wire an app from explicit parts; `new()` and the tests go through
    /// here so no test touches the real config directory
    pub fn with_parts(config: Config, prefs: Preferences, source: Box<dyn FileSource>) -> Self {
        let interval = config.refresh.interval();
        let highlight_ttl = Duration::from_secs(config.ui.highlight_seconds);
        let show_controls = config.ui.show_controls;

        Self {
            config,
            prefs,
            prefs_path: None,
            source,
            view: ListView::Loading,
            cursor: ListCursor::default(),
            highlights: Highlights::new(highlight_ttl),
            refresh: RefreshState::new(interval),
            last_poll: Instant::now(),
            sound: None,
            show_controls,
            show_help: false,
            show_debug: false,
            debug_log: VecDeque::new(),
        }
    }

    pub fn add_debug(&mut self, message: impl Into<String>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.debug_log
            .push_back(format!("[{}] {}", timestamp, message.into()));
        while self.debug_log.len() > DEBUG_LOG_CAPACITY {
            self.debug_log.pop_front();
        }
    }

    /// Sort-button press: same field flips direction, new field starts
    /// ascending. The choice is persisted immediately.
    pub fn press_sort(&mut self, field: SortField) {
        self.prefs.sort.press(field);
        self.persist_prefs();
        self.resort();
    }

    /// Re-order the rendered entries with the current sort state
    pub fn resort(&mut self) {
        if let ListView::Files(files) = &self.view {
            let sorted = sorting::order(files, self.prefs.sort.field, self.prefs.sort.direction);
            self.view = ListView::Files(sorted);
        }
    }

    /// Apply a fetched listing to the rendered list: diff, patch, re-sort.
    /// An unchanged listing produces no effects and leaves every row (and
    /// its highlight state) untouched.
    pub fn apply_listing(&mut self, listing: Listing) {
        let effects = reconcile(self.view.entries(), &listing);
        if effects.is_empty() {
            return;
        }

        let mut files = match &self.view {
            ListView::Files(files) => files.clone(),
            _ => Vec::new(),
        };

        for effect in effects {
            match effect {
                Effect::ShowError(err) => {
                    self.view = ListView::Error(err);
                    self.highlights.clear();
                    self.cursor.clamp(0);
                    return;
                }
                Effect::ShowEmpty => {
                    self.view = ListView::Empty;
                    self.highlights.clear();
                    self.cursor.clamp(0);
                    return;
                }
                Effect::Remove(key) => {
                    files.retain(|e| e.key() != key);
                    self.highlights.remove(&key);
                }
                Effect::Update(entry) => {
                    let key = entry.key();
                    if let Some(slot) = files.iter_mut().find(|e| e.key() == key) {
                        *slot = entry;
                    }
                    self.highlights.mark(key);
                }
                Effect::Add(entry) => {
                    self.highlights.mark(entry.key());
                    files.push(entry);
                }
            }
        }

        self.view = ListView::Files(files);
        self.resort();
        self.cursor.clamp(self.view.len());
    }

    pub(crate) fn persist_prefs(&mut self) {
        let Some(path) = self.prefs_path.clone() else {
            return;
        };
        if let Err(e) = self.prefs.save_to(&path) {
            tracing::warn!("Could not save preferences: {}", e);
            self.add_debug(format!("Could not save preferences: {}", e));
        }
    }

    pub fn select_next(&mut self) {
        let len = self.view.len();
        if len > 0 && self.cursor.selected < len - 1 {
            self.cursor.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.cursor.selected = self.cursor.selected.saturating_sub(1);
    }

    /// Open/download the selected entry with the platform opener
    pub fn open_selected(&mut self) {
        let Some(entry) = self.view.entries().get(self.cursor.selected).cloned() else {
            return;
        };

        let opener = ["xdg-open", "open"]
            .iter()
            .find_map(|name| which::which(name).ok());

        match opener {
            Some(bin) => {
                let spawned = Command::new(bin)
                    .arg(&entry.url)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn();
                match spawned {
                    Ok(child) => {
                        let _ = crate::notify::reap(child);
                        self.add_debug(format!("Opening {}", entry.name));
                    }
                    Err(e) => self.add_debug(format!("Could not open {}: {}", entry.name, e)),
                }
            }
            None => self.add_debug("No opener found (xdg-open/open)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FileEntry, SourceError};
    use crate::sorting::{SortDirection, SortField};
    use anyhow::Result as AnyResult;
    use async_trait::async_trait;

    struct StubSource;

    #[async_trait]
    impl FileSource for StubSource {
        async fn fetch(&self) -> AnyResult<Listing> {
            Ok(Listing::Files(vec![]))
        }

        fn describe(&self) -> String {
            "stub".to_string()
        }
    }

    fn test_app() -> App {
        App::with_parts(Config::default(), Preferences::default(), Box::new(StubSource))
    }

    fn entry(name: &str, size: u64, modified: i64) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size,
            modified,
            url: format!("drops/{}", name),
        }
    }

    #[test]
    fn test_apply_listing_adds_and_sorts() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![
            entry("zebra.apk", 1, 10),
            entry("alpha.apk", 2, 20),
        ]));

        let names: Vec<&str> = app.view.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.apk", "zebra.apk"]);
    }

    #[test]
    fn test_apply_same_listing_twice_keeps_rows_untouched() {
        let mut app = test_app();
        let listing = Listing::Files(vec![entry("a.apk", 1, 10), entry("b.apk", 2, 20)]);

        app.apply_listing(listing.clone());
        let before = app.view.clone();
        app.apply_listing(listing);
        assert_eq!(app.view, before);
    }

    #[test]
    fn test_apply_error_listing_replaces_everything() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![entry("a.apk", 1, 10)]));

        let err = SourceError {
            message: "Source folder not found".to_string(),
            path: "drops".to_string(),
            suggestion: "Create the folder".to_string(),
        };
        app.apply_listing(Listing::Unavailable(err.clone()));
        assert_eq!(app.view, ListView::Error(err));
        assert_eq!(app.view.len(), 0);
    }

    #[test]
    fn test_apply_empty_listing_discards_entries() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![entry("a.apk", 1, 10)]));
        app.apply_listing(Listing::Files(vec![]));
        assert_eq!(app.view, ListView::Empty);
    }

    #[test]
    fn test_update_replaces_row_in_place() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![entry("a.apk", 1, 10)]));

        let mut replaced = entry("a.apk", 999, 30);
        replaced.url = "drops/a.apk".to_string();
        app.apply_listing(Listing::Files(vec![replaced.clone()]));

        assert_eq!(app.view.entries(), &[replaced]);
        assert!(app.highlights.is_hot("a.apk"));
    }

    #[test]
    fn test_removal_clamps_cursor() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![
            entry("a.apk", 1, 1),
            entry("b.apk", 2, 2),
            entry("c.apk", 3, 3),
        ]));
        app.cursor.selected = 2;

        app.apply_listing(Listing::Files(vec![entry("a.apk", 1, 1)]));
        assert_eq!(app.cursor.selected, 0);
    }

    #[test]
    fn test_press_sort_toggles_and_resorts() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![
            entry("small.apk", 1, 1),
            entry("big.apk", 100, 2),
        ]));

        app.press_sort(SortField::Size);
        assert_eq!(app.prefs.sort.field, SortField::Size);
        assert_eq!(app.prefs.sort.direction, SortDirection::Asc);
        assert_eq!(app.view.entries()[0].name, "small.apk");

        app.press_sort(SortField::Size);
        assert_eq!(app.prefs.sort.direction, SortDirection::Desc);
        assert_eq!(app.view.entries()[0].name, "big.apk");
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut app = test_app();
        app.apply_listing(Listing::Files(vec![entry("a.apk", 1, 1), entry("b.apk", 2, 2)]));

        app.select_previous();
        assert_eq!(app.cursor.selected, 0);

        app.select_next();
        assert_eq!(app.cursor.selected, 1);
        app.select_next();
        assert_eq!(app.cursor.selected, 1);
    }

    #[test]
    fn test_press_sort_writes_preferences_when_path_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        let mut app = test_app();
        app.prefs_path = Some(path.clone());

        app.press_sort(SortField::Date);

        let saved = Preferences::load_from(&path);
        assert_eq!(saved.sort.field, SortField::Date);
    }

    #[test]
    fn test_debug_log_is_bounded() {
        let mut app = test_app();
        for i in 0..150 {
            app.add_debug(format!("line {}", i));
        }
        assert_eq!(app.debug_log.len(), DEBUG_LOG_CAPACITY);
        assert!(app.debug_log.back().unwrap().contains("line 149"));
    }
}
