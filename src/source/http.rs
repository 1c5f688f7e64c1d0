// Remote listing source. The endpoint answers the same shape the web page
// consumed: a JSON array of entries, or an error object when the directory
// behind it cannot be enumerated. Transport errors and non-success statuses
// (including 401 from an unauthenticated session) are fetch failures; the
// caller keeps its previous state.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{FileEntry, FileSource, Listing, SourceError};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Files(Vec<FileEntry>),
    Error(ApiError),
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[allow(dead_code)]
    error: bool,
    message: String,
    path: String,
    suggestion: String,
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    fn convert(response: ApiResponse) -> Listing {
        match response {
            ApiResponse::Files(files) => Listing::Files(files),
            ApiResponse::Error(err) => Listing::Unavailable(SourceError {
                message: err.message,
                path: err.path,
                suggestion: err.suggestion,
            }),
        }
    }
}

#[async_trait]
impl FileSource for HttpSource {
    async fn fetch(&self) -> Result<Listing> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Listing request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Listing request returned {}", response.status());
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .context("Could not parse listing response")?;

        Ok(Self::convert(parsed))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_entry_array() {
        let body = r#"[
            {"name": "app.apk", "size": 1024, "modified": 1700000000, "url": "drops/app.apk"},
            {"name": "b.apk", "size": 5, "modified": 1700000100, "url": "drops/b.apk"}
        ]"#;

        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        let Listing::Files(files) = HttpSource::convert(parsed) else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "app.apk");
        assert_eq!(files[0].size, 1024);
        assert_eq!(files[0].modified, 1_700_000_000);
    }

    #[test]
    fn test_parses_empty_array() {
        let parsed: ApiResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(HttpSource::convert(parsed), Listing::Files(vec![]));
    }

    #[test]
    fn test_parses_error_object() {
        let body = r#"{
            "error": true,
            "message": "Source folder not found",
            "path": "/srv/drops",
            "suggestion": "Please create the folder manually or update config.php"
        }"#;

        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        let Listing::Unavailable(err) = HttpSource::convert(parsed) else {
            panic!("expected unavailable");
        };
        assert_eq!(err.message, "Source folder not found");
        assert_eq!(err.path, "/srv/drops");
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let result: Result<ApiResponse, _> = serde_json::from_str("{\"unexpected\": 1}");
        assert!(result.is_err());
    }
}
