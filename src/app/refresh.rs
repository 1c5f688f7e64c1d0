// The refresh scheduler half of the app: the poll cycle and the
// one-second countdown tick. Both are driven from the single UI loop, so
// polls are serialized by construction; a slow fetch delays the next poll
// instead of overlapping it.

use std::time::{Duration, Instant};

use chrono::Local;

use crate::app::App;
use crate::source::Listing;

impl App {
    /// True when a full interval has elapsed since the last poll fired
    pub fn refresh_due(&self) -> bool {
        self.last_poll.elapsed() >= Duration::from_secs(self.refresh.interval_seconds)
    }

    /// One poll cycle: fetch, notification check, reconcile, stamp,
    /// countdown reset. A failed fetch is logged and absorbed; rendered
    /// state and countdown stay as they were until the next scheduled poll.
    pub async fn poll_now(&mut self) {
        self.last_poll = Instant::now();

        match self.source.fetch().await {
            Ok(listing) => {
                if self.check_for_new_files(&listing) {
                    if let Some(sound) = &self.sound {
                        sound.play();
                    }
                    self.add_debug("New or updated files detected");
                }
                self.apply_listing(listing);
                self.refresh.last_updated = Some(Local::now());
                self.refresh.remaining_seconds = self.refresh.interval_seconds;
            }
            Err(e) => {
                tracing::warn!("Could not refresh file list: {:#}", e);
                self.add_debug(format!("Refresh failed: {}", e));
            }
        }
    }

    /// Countdown tick, fired once a second: counts the badge down to zero,
    /// then clamps back to the full interval. Runs independently of the
    /// poll timer apart from sharing the interval. Also expires stale
    /// row highlights.
    pub fn tick_countdown(&mut self) {
        if self.refresh.remaining_seconds == 0 {
            self.refresh.remaining_seconds = self.refresh.interval_seconds;
        } else {
            self.refresh.remaining_seconds -= 1;
        }
        self.highlights.sweep();
    }

    /// Decide whether this listing warrants the notification sound, and
    /// keep the ledger current. The first successful poll of the session
    /// marks every file silently so pre-existing files never alert.
    /// Returns true when at least one file is new or replaced (one sound
    /// per poll, not per file).
    pub(crate) fn check_for_new_files(&mut self, listing: &Listing) -> bool {
        if !self.config.notifications.enabled {
            return false;
        }
        let Listing::Files(files) = listing else {
            return false;
        };

        if !self.refresh.has_loaded_once {
            for file in files {
                self.prefs.mark_notified(&file.name, file.modified);
            }
            self.refresh.has_loaded_once = true;
            self.persist_prefs();
            return false;
        }

        let mut has_new = false;
        for file in files {
            if self.prefs.should_notify(&file.name, file.modified) {
                has_new = true;
                self.prefs.mark_notified(&file.name, file.modified);
            }
        }

        if has_new {
            self.persist_prefs();
        }
        has_new
    }
}
