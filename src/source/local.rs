// Drop folder scanner. Enumerates files of the configured extensions and
// stats size and mtime. A missing folder is created on first use when
// possible; otherwise the scan reports an Unavailable listing that the UI
// shows as a full-list error panel.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::Result;
use async_trait::async_trait;

use super::{FileEntry, FileSource, Listing, SourceError};

pub struct LocalFolder {
    folder: PathBuf,
    file_types: Vec<String>,
}

impl LocalFolder {
    pub fn new(folder: impl Into<PathBuf>, file_types: &[String]) -> Self {
        Self {
            folder: folder.into(),
            file_types: file_types.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    fn unavailable(&self, message: &str, suggestion: &str) -> Listing {
        Listing::Unavailable(SourceError {
            message: message.to_string(),
            path: self.folder.display().to_string(),
            suggestion: suggestion.to_string(),
        })
    }

    fn wanted(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext {
            Some(ext) => self.file_types.iter().any(|t| *t == ext),
            None => false,
        }
    }

    fn scan(&self) -> Listing {
        if !self.folder.is_dir() && fs::create_dir_all(&self.folder).is_err() {
            return self.unavailable(
                "Source folder not found",
                "Create the folder manually or update config.toml",
            );
        }

        let items = match fs::read_dir(&self.folder) {
            Ok(items) => items,
            Err(_) => {
                return self.unavailable(
                    "Cannot read source folder",
                    "Check folder permissions",
                );
            }
        };

        let mut files = Vec::new();
        for item in items.flatten() {
            let path = item.path();
            if !path.is_file() || !self.wanted(&path) {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Ok(metadata) = item.metadata() else {
                continue;
            };
            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);

            files.push(FileEntry {
                name: name.to_string(),
                size: metadata.len(),
                modified,
                url: path.display().to_string(),
            });
        }

        Listing::Files(files)
    }
}

#[async_trait]
impl FileSource for LocalFolder {
    async fn fetch(&self) -> Result<Listing> {
        Ok(self.scan())
    }

    fn describe(&self) -> String {
        self.folder.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn source(dir: &Path, types: &[&str]) -> LocalFolder {
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        LocalFolder::new(dir, &types)
    }

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(bytes).unwrap();
    }

    #[tokio::test]
    async fn test_scans_only_configured_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "app.apk", b"aaaa");
        write_file(dir.path(), "notes.txt", b"bbbb");
        write_file(dir.path(), "other.APK", b"cc");

        let listing = source(dir.path(), &["apk"]).fetch().await.unwrap();
        let Listing::Files(mut files) = listing else {
            panic!("expected files");
        };
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "app.apk");
        assert_eq!(files[0].size, 4);
        assert!(files[0].modified > 0);
        // Extension matching is case-insensitive
        assert_eq!(files[1].name, "other.APK");
    }

    #[tokio::test]
    async fn test_empty_folder_yields_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let listing = source(dir.path(), &["apk"]).fetch().await.unwrap();
        assert_eq!(listing, Listing::Files(vec![]));
    }

    #[tokio::test]
    async fn test_missing_folder_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("not-yet-there");

        let listing = source(&nested, &["apk"]).fetch().await.unwrap();
        assert_eq!(listing, Listing::Files(vec![]));
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_uncreatable_folder_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the folder should be makes creation fail
        write_file(dir.path(), "blocker", b"x");
        let path = dir.path().join("blocker");

        let listing = source(&path, &["apk"]).fetch().await.unwrap();
        let Listing::Unavailable(err) = listing else {
            panic!("expected unavailable");
        };
        assert_eq!(err.message, "Source folder not found");
        assert_eq!(err.path, path.display().to_string());
        assert!(err.suggestion.contains("config.toml"));
    }

    #[tokio::test]
    async fn test_subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub.apk")).unwrap();
        write_file(dir.path(), "real.apk", b"data");

        let listing = source(dir.path(), &["apk"]).fetch().await.unwrap();
        let Listing::Files(files) = listing else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "real.apk");
    }

    #[tokio::test]
    async fn test_multiple_file_types() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.apk", b"1");
        write_file(dir.path(), "b.pdf", b"22");
        write_file(dir.path(), "c.zip", b"333");
        write_file(dir.path(), "d.txt", b"4444");

        let listing = source(dir.path(), &["apk", "pdf", "zip"]).fetch().await.unwrap();
        let Listing::Files(files) = listing else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 3);
    }
}
