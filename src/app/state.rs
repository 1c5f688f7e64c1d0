use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::source::{FileEntry, SourceError};

/// What the list area is currently showing. Error and Empty are terminal
/// states for a poll; they never coexist with rendered entries.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// Nothing fetched yet
    Loading,
    Files(Vec<FileEntry>),
    Empty,
    Error(SourceError),
}

impl ListView {
    /// Entries currently rendered; empty for every non-Files state
    pub fn entries(&self) -> &[FileEntry] {
        match self {
            ListView::Files(files) => files,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Countdown and poll bookkeeping shared by the two periodic actions
pub struct RefreshState {
    /// Configured poll interval
    pub interval_seconds: u64,
    /// Seconds shown on the countdown badge
    pub remaining_seconds: u64,
    /// Wall-clock stamp of the last successful poll
    pub last_updated: Option<DateTime<Local>>,
    /// False until the first successful poll; suppresses the notification
    /// sound for files that were already there when the session started
    pub has_loaded_once: bool,
}

impl RefreshState {
    pub fn new(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            remaining_seconds: interval_seconds,
            last_updated: None,
            has_loaded_once: false,
        }
    }
}

/// Row selection
#[derive(Default)]
pub struct ListCursor {
    pub selected: usize,
}

impl ListCursor {
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Short-lived "recently changed" markers keyed by lower-cased file name.
/// The marker is the page's fade-in animation analogue: added and updated
/// rows get one, untouched rows keep whatever they had.
pub struct Highlights {
    marks: HashMap<String, Instant>,
    ttl: Duration,
}

impl Highlights {
    pub fn new(ttl: Duration) -> Self {
        Self {
            marks: HashMap::new(),
            ttl,
        }
    }

    pub fn mark(&mut self, key: String) {
        self.marks.insert(key, Instant::now());
    }

    pub fn remove(&mut self, key: &str) {
        self.marks.remove(key);
    }

    pub fn is_hot(&self, key: &str) -> bool {
        self.marks.get(key).is_some_and(|t| t.elapsed() < self.ttl)
    }

    /// Drop expired marks; called from the one-second tick
    pub fn sweep(&mut self) {
        let ttl = self.ttl;
        self.marks.retain(|_, t| t.elapsed() < ttl);
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_view_entries() {
        assert!(ListView::Loading.entries().is_empty());
        assert!(ListView::Empty.entries().is_empty());

        let entry = FileEntry {
            name: "a.apk".to_string(),
            size: 1,
            modified: 1,
            url: "a".to_string(),
        };
        let view = ListView::Files(vec![entry]);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_cursor_clamps_after_removals() {
        let mut cursor = ListCursor { selected: 5 };
        cursor.clamp(3);
        assert_eq!(cursor.selected, 2);

        cursor.clamp(0);
        assert_eq!(cursor.selected, 0);
    }

    #[test]
    fn test_highlights_expire() {
        let mut highlights = Highlights::new(Duration::from_secs(0));
        highlights.mark("a.apk".to_string());
        assert!(!highlights.is_hot("a.apk"));

        let mut highlights = Highlights::new(Duration::from_secs(60));
        highlights.mark("a.apk".to_string());
        assert!(highlights.is_hot("a.apk"));
        assert!(!highlights.is_hot("b.apk"));

        highlights.remove("a.apk");
        assert!(!highlights.is_hot("a.apk"));
    }

    #[test]
    fn test_refresh_state_starts_at_full_countdown() {
        let state = RefreshState::new(30);
        assert_eq!(state.remaining_seconds, 30);
        assert!(!state.has_loaded_once);
        assert!(state.last_updated.is_none());
    }
}
