use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub refresh: RefreshConfig,
    pub notifications: NotificationsConfig,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            refresh: RefreshConfig::default(),
            notifications: NotificationsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Where the file listing comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Drop folder to scan
    pub folder: String,
    /// Extensions to list, lower-case, without the dot
    pub file_types: Vec<String>,
    /// Optional remote listing endpoint; when set, the folder is ignored
    /// and the list is fetched from this URL instead
    pub url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            folder: "drops".to_string(),
            file_types: vec!["apk".to_string()],
            url: None,
        }
    }
}

/// Auto-refresh cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between polls
    pub interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
        }
    }
}

impl RefreshConfig {
    /// Interval floored at one second
    pub fn interval(&self) -> u64 {
        self.interval_seconds.max(1)
    }
}

/// Sound notification for new or replaced files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub enabled: bool,
    /// Sound file to play (MP3, WAV, OGG)
    pub sound_path: String,
    /// Player binary override (empty = auto-detect)
    pub player: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sound_path: "assets/newupload.mp3".to_string(),
            player: String::new(),
        }
    }
}

/// UI customization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the sort controls bar on startup
    pub show_controls: bool,
    /// How long a changed row stays highlighted, in seconds
    pub highlight_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_controls: true,
            highlight_seconds: 3,
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("dropdeck");

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .context("Failed to read config file")?;

            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;

            Ok(config)
        } else {
            // Create default config and save it
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.source.folder, "drops");
        assert_eq!(config.source.file_types, vec!["apk"]);
        assert!(config.source.url.is_none());
        assert_eq!(config.refresh.interval_seconds, 30);
        assert!(!config.notifications.enabled);
        assert!(config.ui.show_controls);
        assert_eq!(config.ui.highlight_seconds, 3);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.source.folder, config.source.folder);
        assert_eq!(deserialized.refresh.interval_seconds, config.refresh.interval_seconds);
        assert_eq!(deserialized.notifications.enabled, config.notifications.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial_toml = r#"
[source]
folder = "/srv/uploads"
file_types = ["apk", "zip"]
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom values
        assert_eq!(config.source.folder, "/srv/uploads");
        assert_eq!(config.source.file_types, vec!["apk", "zip"]);
        // Default values
        assert_eq!(config.refresh.interval_seconds, 30);
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_full_config_parsing() {
        let full_toml = r#"
[source]
folder = "/srv/drops"
file_types = ["apk", "pdf", "zip"]
url = "https://example.test/?api=files"

[refresh]
interval_seconds = 15

[notifications]
enabled = true
sound_path = "assets/ding.wav"
player = "paplay"

[ui]
show_controls = false
highlight_seconds = 5
"#;

        let config: Config = toml::from_str(full_toml).unwrap();

        assert_eq!(config.source.folder, "/srv/drops");
        assert_eq!(config.source.file_types.len(), 3);
        assert_eq!(config.source.url.as_deref(), Some("https://example.test/?api=files"));
        assert_eq!(config.refresh.interval_seconds, 15);
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.sound_path, "assets/ding.wav");
        assert_eq!(config.notifications.player, "paplay");
        assert!(!config.ui.show_controls);
        assert_eq!(config.ui.highlight_seconds, 5);
    }

    #[test]
    fn test_interval_is_floored_at_one_second() {
        let toml_str = r#"
[refresh]
interval_seconds = 0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.refresh.interval(), 1);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid [[ toml";
        let result: Result<Config, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }
}
