pub mod http;
pub mod local;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One file in the drop folder listing.
///
/// Entries are immutable per fetch; a changed `modified` for the same name
/// is treated as a replacement, never an in-place edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name, unique within a listing (compared case-insensitively)
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Modification time as unix seconds
    pub modified: i64,
    /// Where the file can be opened/downloaded from
    pub url: String,
}

impl FileEntry {
    /// Case-insensitive key used for display and reconciliation
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Why the source could not enumerate files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceError {
    pub message: String,
    pub path: String,
    pub suggestion: String,
}

/// Result of one fetch: either the files, or a terminal error state that
/// replaces the whole list for this poll.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Files(Vec<FileEntry>),
    Unavailable(SourceError),
}

/// A place the file list comes from. Implemented by the local folder
/// scanner and the remote HTTP listing endpoint.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Fetch the current listing. An `Err` means the fetch itself failed
    /// (network, IO) and the caller keeps its previous state; an
    /// `Ok(Listing::Unavailable)` means the source answered but cannot
    /// enumerate files, which replaces the rendered list.
    async fn fetch(&self) -> Result<Listing>;

    /// Short human-readable label for the header
    fn describe(&self) -> String;
}
