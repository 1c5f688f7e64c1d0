// Pure diff between the rendered file list and a freshly fetched listing.
// The decision (which rows to add, update, remove) is computed here without
// touching any UI state; the app layer applies the effects and re-sorts.

use std::collections::{HashMap, HashSet};

use crate::source::{FileEntry, Listing, SourceError};

/// One change to apply to the rendered list
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// New entry, not previously rendered
    Add(FileEntry),
    /// Same name, different modification time: replace the row
    Update(FileEntry),
    /// Entry disappeared from the listing; key is the lower-cased name
    Remove(String),
    /// The source cannot enumerate files; replaces the whole list
    ShowError(SourceError),
    /// The listing is empty; replaces the whole list
    ShowEmpty,
}

/// Diff `rendered` against `latest`.
///
/// Unchanged entries (same name, same modified time) produce no effect, so
/// their rows keep identity and highlight state. Reconciling the same
/// listing twice in a row yields no add/update/remove effects the second
/// time.
pub fn reconcile(rendered: &[FileEntry], latest: &Listing) -> Vec<Effect> {
    let files = match latest {
        Listing::Unavailable(err) => return vec![Effect::ShowError(err.clone())],
        Listing::Files(files) if files.is_empty() => return vec![Effect::ShowEmpty],
        Listing::Files(files) => files,
    };

    let mut effects = Vec::new();

    let existing: HashMap<String, &FileEntry> =
        rendered.iter().map(|e| (e.key(), e)).collect();
    let incoming: HashSet<String> = files.iter().map(|e| e.key()).collect();

    // Rows that no longer exist go first, matching removal-before-insert
    // in the rendered list
    for entry in rendered {
        if !incoming.contains(&entry.key()) {
            effects.push(Effect::Remove(entry.key()));
        }
    }

    for entry in files {
        match existing.get(&entry.key()) {
            None => effects.push(Effect::Add(entry.clone())),
            Some(prev) if prev.modified != entry.modified => {
                effects.push(Effect::Update(entry.clone()));
            }
            Some(_) => {} // unchanged, leave the row alone
        }
    }

    effects
}
