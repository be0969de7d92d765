//! User-visible message templates.
//!
//! Every string the player shows is looked up here rather than written inline,
//! so the text can be changed from the `[messages]` table of the config file.
//! Jump templates may use `{seconds}`. The timer template uses `{m}` for whole
//! minutes, `{s}` for remaining seconds and `{ss}` for the same value padded to
//! two digits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_playing")]
    pub playing: String,
    #[serde(default = "default_paused")]
    pub paused: String,
    #[serde(default = "default_jumped_back")]
    pub jumped_back: String,
    #[serde(default = "default_back_not_possible")]
    pub back_not_possible: String,
    #[serde(default = "default_jumped_forward")]
    pub jumped_forward: String,
    #[serde(default = "default_forward_not_possible")]
    pub forward_not_possible: String,
    #[serde(default = "default_timer")]
    pub timer: String,
}

fn default_playing() -> String {
    "Playing sound".to_string()
}

fn default_paused() -> String {
    "Pausing sound".to_string()
}

fn default_jumped_back() -> String {
    "You have jumped backward {seconds} seconds".to_string()
}

fn default_back_not_possible() -> String {
    "Cannot jump backward {seconds} seconds".to_string()
}

fn default_jumped_forward() -> String {
    "You have jumped forward {seconds} seconds".to_string()
}

fn default_forward_not_possible() -> String {
    "Cannot jump forward {seconds} seconds".to_string()
}

fn default_timer() -> String {
    "{m}:{ss}".to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            playing: default_playing(),
            paused: default_paused(),
            jumped_back: default_jumped_back(),
            back_not_possible: default_back_not_possible(),
            jumped_forward: default_jumped_forward(),
            forward_not_possible: default_forward_not_possible(),
            timer: default_timer(),
        }
    }
}

/// The notifications the controller can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Playing,
    Paused,
    JumpedBack,
    BackNotPossible,
    JumpedForward,
    ForwardNotPossible,
}

impl Messages {
    /// Render the text for a notice, substituting the jump size in seconds.
    pub fn render(&self, notice: Notice, jump_ms: u64) -> String {
        let template = match notice {
            Notice::Playing => &self.playing,
            Notice::Paused => &self.paused,
            Notice::JumpedBack => &self.jumped_back,
            Notice::BackNotPossible => &self.back_not_possible,
            Notice::JumpedForward => &self.jumped_forward,
            Notice::ForwardNotPossible => &self.forward_not_possible,
        };
        template.replace("{seconds}", &(jump_ms / 1000).to_string())
    }

    /// Render a millisecond time through the timer template.
    pub fn format_timer(&self, time_ms: u64) -> String {
        let (minutes, seconds) = split_minutes_seconds(time_ms);
        // `{ss}` first so the `{s}` pass cannot eat into it
        self.timer
            .replace("{ss}", &format!("{seconds:02}"))
            .replace("{m}", &minutes.to_string())
            .replace("{s}", &seconds.to_string())
    }
}

/// Whole minutes and the remaining whole seconds of a millisecond time.
pub fn split_minutes_seconds(time_ms: u64) -> (u64, u64) {
    let minutes = time_ms / 60_000;
    let seconds = time_ms / 1000 - minutes * 60;
    (minutes, seconds)
}
