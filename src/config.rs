//! Application configuration management.
//!
//! This module handles the persistent configuration for jumpdeck: the track to
//! play when none is given on the command line, the jump size of the back and
//! forward buttons, the position poll interval, how long notifications stay on
//! screen, the log level and the user-visible message templates. Configuration
//! is stored in the user's config directory (typically
//! ~/.config/jumpdeck/config.toml) and every field falls back to a default.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::bundled;
use crate::constants::{APP_DIR, CONFIG_FILE, JUMP_MS, LOG_LEVELS, POLL_INTERVAL_MS, TOAST_MS};
use crate::messages::Messages;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default = "default_jump_ms")]
    pub jump_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub messages: Messages,
}

fn default_jump_ms() -> u64 {
    JUMP_MS
}

fn default_poll_interval_ms() -> u64 {
    POLL_INTERVAL_MS
}

fn default_toast_ms() -> u64 {
    TOAST_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            track: None,
            jump_ms: default_jump_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            toast_ms: default_toast_ms(),
            log_level: default_log_level(),
            messages: Messages::default(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join(APP_DIR)
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join(APP_DIR)
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.jump_ms == 0 {
            return Err("jump_ms must be greater than zero".into());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than zero".into());
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Unknown log_level '{}', expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )
            .into());
        }
        Ok(())
    }

    /// Set one key from its string form. The config is left untouched when the
    /// key is unknown or the result would not validate.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let mut updated = self.clone();
        match key {
            "track" => {
                updated.track = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "jump_ms" => updated.jump_ms = parse_millis(key, value)?,
            "poll_interval_ms" => updated.poll_interval_ms = parse_millis(key, value)?,
            "toast_ms" => updated.toast_ms = parse_millis(key, value)?,
            "log_level" => updated.log_level = value.to_lowercase(),
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// The configured track with `~` and environment variables expanded.
    pub fn track_path(&self) -> Option<PathBuf> {
        self.track
            .as_deref()
            .map(|track| PathBuf::from(shellexpand::tilde(track).as_ref()))
    }

    /// Pick the track to play: the command-line argument, else the configured
    /// track, else the bundled demo track.
    pub fn resolve_track(&self, requested: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
        let path = match requested {
            Some(track) => PathBuf::from(shellexpand::tilde(track).as_ref()),
            None => match self.track_path() {
                Some(path) => path,
                None => return bundled::bundled_track_path(),
            },
        };

        if !path.is_file() {
            return Err(format!("Track not found: {}", path.display()).into());
        }
        Ok(path)
    }

    pub fn jump(&self) -> Duration {
        Duration::from_millis(self.jump_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64, Box<dyn Error>> {
    value
        .parse::<u64>()
        .map_err(|_| format!("Value for {key} must be a whole number of milliseconds").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Use a mutex to ensure tests that modify environment variables don't run concurrently
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.track.is_none());
        assert_eq!(config.jump_ms, 5000);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.toast_ms, 2000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_durations() {
        let config = Config::new();
        assert_eq!(config.jump(), Duration::from_secs(5));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.toast_lifetime(), Duration::from_secs(2));
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::new();

        config.set_value("jump_ms", "10000").unwrap();
        assert_eq!(config.jump_ms, 10_000);

        config.set_value("poll_interval_ms", "250").unwrap();
        assert_eq!(config.poll_interval_ms, 250);

        config.set_value("toast_ms", "0").unwrap();
        assert_eq!(config.toast_ms, 0);

        config.set_value("log_level", "DEBUG").unwrap();
        assert_eq!(config.log_level, "debug");

        config.set_value("track", "/tmp/song.wav").unwrap();
        assert_eq!(config.track.as_deref(), Some("/tmp/song.wav"));

        config.set_value("track", "").unwrap();
        assert!(config.track.is_none());

        assert!(config.set_value("jump_ms", "five").is_err());
        assert!(config.set_value("jump_ms", "0").is_err());
        assert_eq!(config.jump_ms, 10_000);
        assert!(config.set_value("poll_interval_ms", "0").is_err());
        assert!(config.set_value("log_level", "loud").is_err());
        assert!(config.set_value("unknown_key", "value").is_err());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("jump_ms = 3000\n").unwrap();
        assert_eq!(config.jump_ms, 3000);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.messages.timer, "{m}:{ss}");
    }

    #[test]
    fn test_track_path_expands_tilde() {
        let mut config = Config::new();
        config.track = Some("~/music/track.wav".to_string());
        let path = config.track_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("music/track.wav"));
    }

    #[test]
    fn test_resolve_track_prefers_argument_then_config() {
        let temp_dir = TempDir::new().unwrap();
        let cli_track = temp_dir.path().join("cli.wav");
        let config_track = temp_dir.path().join("config.wav");
        fs::write(&cli_track, b"RIFF").unwrap();
        fs::write(&config_track, b"RIFF").unwrap();

        let mut config = Config::new();
        config.track = Some(config_track.to_string_lossy().to_string());

        let resolved = config
            .resolve_track(Some(cli_track.to_str().unwrap()))
            .unwrap();
        assert_eq!(resolved, cli_track);

        let resolved = config.resolve_track(None).unwrap();
        assert_eq!(resolved, config_track);

        let missing = temp_dir.path().join("missing.wav");
        assert!(config.resolve_track(Some(missing.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_resolve_track_falls_back_to_bundled() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let original_cache = std::env::var("XDG_CACHE_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CACHE_HOME", temp_dir.path());
        }

        let resolved = Config::new().resolve_track(None).unwrap();
        assert_eq!(resolved, temp_dir.path().join("jumpdeck").join("bundled.wav"));
        assert!(resolved.exists());

        unsafe {
            if let Some(original) = original_cache {
                std::env::set_var("XDG_CACHE_HOME", original);
            } else {
                std::env::remove_var("XDG_CACHE_HOME");
            }
        }
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        assert!(!Config::exists().unwrap());
        assert_eq!(Config::load().unwrap(), Config::new());

        let mut config = Config::new();
        config.track = Some("/tmp/anthem.wav".to_string());
        config.messages.playing = "Now playing".to_string();
        config.save().unwrap();

        let config_path = Config::config_path().unwrap();
        assert!(config_path.starts_with(temp_dir.path().join("jumpdeck")));
        assert!(Config::exists().unwrap());

        let loaded = Config::load().unwrap();
        assert_eq!(loaded, config);

        // A hand-edited file with an invalid value is rejected on load
        fs::write(&config_path, "jump_ms = 0\n").unwrap();
        assert!(Config::load().is_err());

        unsafe {
            if let Some(original) = original_xdg {
                std::env::set_var("XDG_CONFIG_HOME", original);
            } else {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }
}
