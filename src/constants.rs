//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency between the controller, the configuration defaults and the CLI.

/// Directory name used under the user's config and cache directories
pub const APP_DIR: &str = "jumpdeck";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Distance covered by the back and forward buttons, in milliseconds
pub const JUMP_MS: u64 = 5000;

/// Interval between two position polls while playing, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Lifetime of a transient notification, in milliseconds
pub const TOAST_MS: u64 = 2000;

/// File name of the synthesized demo track inside the cache directory
pub const BUNDLED_TRACK_FILE: &str = "bundled.wav";

/// Log levels accepted by the `log_level` setting
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];
