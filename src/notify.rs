// Notification sound playback. There is no in-process audio stack; like the
// rest of the machine integration, this shells out to whatever player is
// installed. Playback failure never affects the notification ledger.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use anyhow::Result;

use crate::config::NotificationsConfig;

/// Player binaries probed in order when none is configured
const PLAYER_CANDIDATES: &[&str] = &["paplay", "aplay", "afplay", "ffplay", "mpv"];

pub struct SoundPlayer {
    player: PathBuf,
    sound_path: String,
}

impl SoundPlayer {
    /// Set up a player from config. Returns `Ok(None)` when notifications
    /// are disabled; missing binaries or sound files are an error the
    /// caller reports once at startup.
    pub fn from_config(config: &NotificationsConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let player = if config.player.is_empty() {
            find_player().ok_or_else(|| {
                anyhow::anyhow!(
                    "No audio player found (tried {})",
                    PLAYER_CANDIDATES.join(", ")
                )
            })?
        } else {
            which::which(&config.player)
                .map_err(|e| anyhow::anyhow!("Configured player '{}': {}", config.player, e))?
        };

        Ok(Some(Self {
            player,
            sound_path: config.sound_path.clone(),
        }))
    }

    /// Play the notification sound once, fire-and-forget. Errors are
    /// logged and swallowed; a blocked or failed playback must not stall
    /// the refresh cycle.
    pub fn play(&self) {
        let mut cmd = Command::new(&self.player);

        // ffplay and mpv need flags to not open a window or linger
        match self.player.file_stem().and_then(|s| s.to_str()) {
            Some("ffplay") => {
                cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet"]);
            }
            Some("mpv") => {
                cmd.args(["--no-video", "--really-quiet"]);
            }
            _ => {}
        }

        let spawned = cmd
            .arg(&self.sound_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                let _ = reap(child);
            }
            Err(e) => tracing::warn!("Could not play notification sound: {}", e),
        }
    }

    pub fn describe(&self) -> String {
        format!("{} {}", self.player.display(), self.sound_path)
    }
}

fn find_player() -> Option<PathBuf> {
    PLAYER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Collect a detached child's exit status off the UI task so finished
/// players and openers do not linger as defunct processes
pub(crate) fn reap(child: Child) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let mut child = child;
        let _ = child.wait();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifications_yield_no_player() {
        let config = NotificationsConfig::default();
        assert!(!config.enabled);
        assert!(SoundPlayer::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_unknown_player_binary_is_an_error() {
        let config = NotificationsConfig {
            enabled: true,
            sound_path: "assets/ding.wav".to_string(),
            player: "definitely-not-a-real-player-binary".to_string(),
        };
        assert!(SoundPlayer::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_reap_collects_exited_child() {
        let child = Command::new("sh")
            .args(["-c", "exit 0"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let pid = child.id();

        reap(child).await.unwrap();

        // Once waited on, the pid is gone; an unreaped child would stay
        // visible in /proc as a zombie
        assert!(!std::path::Path::new(&format!("/proc/{}", pid)).exists());
    }
}
