//! Playback controller binding the on-screen controls to the playback resource.
//!
//! The controller owns the playback resource and the widget models (four
//! buttons, a display-only progress slider and two time labels). Button handlers
//! mutate the resource and refresh the widgets; a repeating poll timer reads the
//! playhead once per interval while playing. Everything runs on the caller's
//! thread: the terminal loop feeds input into the handlers and calls [`tick`]
//! every frame, so handlers and polls never overlap.
//!
//! Time is passed in explicitly as an [`Instant`] so the poll schedule and
//! notification lifetimes can be driven deterministically from tests.
//!
//! [`tick`]: PlaybackController::tick

use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::messages::{Messages, Notice};
use crate::playback::Playback;

/// Identifies one of the four transport buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Back,
    Pause,
    Play,
    Forward,
}

impl ControlId {
    /// Buttons in on-screen order, left to right.
    pub const ALL: [ControlId; 4] = [
        ControlId::Back,
        ControlId::Pause,
        ControlId::Play,
        ControlId::Forward,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ControlId::Back => "◀◀ Back",
            ControlId::Pause => "❚❚ Pause",
            ControlId::Play => "▶ Play",
            ControlId::Forward => "Forward ▶▶",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub enabled: bool,
}

/// Progress display. Never interactive: the user cannot drag it to seek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSlider {
    pub max: u64,
    pub value: u64,
    pub interactive: bool,
}

impl ProgressSlider {
    /// Filled fraction in `0.0..=1.0`, zero until a maximum is set.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            (self.value as f64 / self.max as f64).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeLabel {
    pub text: String,
}

/// A short-lived notification shown after a control is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notice: Notice,
    pub message: String,
    shown_at: Instant,
    lifetime: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.lifetime
    }
}

/// Cancellable repeating timer for the position poll.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the timer to fire one interval after `now`, replacing any pending run.
    pub fn schedule(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub jump: Duration,
    pub poll_interval: Duration,
    pub toast_lifetime: Duration,
    pub messages: Messages,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            jump: config.jump(),
            poll_interval: config.poll_interval(),
            toast_lifetime: config.toast_lifetime(),
            messages: config.messages.clone(),
        }
    }
}

pub struct PlaybackController<P: Playback> {
    player: Option<P>,
    settings: ControllerSettings,
    position_ms: u64,
    duration_ms: u64,
    has_started_once: bool,
    rewind_on_play: bool,
    back_button: Button,
    pause_button: Button,
    play_button: Button,
    forward_button: Button,
    slider: ProgressSlider,
    elapsed_label: TimeLabel,
    total_label: TimeLabel,
    poll: PollTimer,
    toast: Option<Toast>,
}

impl<P: Playback> PlaybackController<P> {
    /// Take ownership of a loaded playback resource and set up the initial
    /// stopped state: play enabled, pause disabled, slider display-only.
    pub fn on_create(player: P, settings: ControllerSettings) -> Self {
        let poll = PollTimer::new(settings.poll_interval);
        let zero = settings.messages.format_timer(0);

        info!(
            "Controller created: jump {:?}, poll every {:?}",
            settings.jump, settings.poll_interval
        );

        Self {
            player: Some(player),
            settings,
            position_ms: 0,
            duration_ms: 0,
            has_started_once: false,
            rewind_on_play: false,
            back_button: Button { enabled: true },
            pause_button: Button { enabled: false },
            play_button: Button { enabled: true },
            forward_button: Button { enabled: true },
            slider: ProgressSlider {
                max: 0,
                value: 0,
                interactive: false,
            },
            elapsed_label: TimeLabel { text: zero.clone() },
            total_label: TimeLabel { text: zero },
            poll,
            toast: None,
        }
    }

    /// Dispatch a button press. Presses on disabled buttons are ignored.
    pub fn press(&mut self, control: ControlId, now: Instant) {
        if !self.button(control).enabled {
            debug!("Ignoring press on disabled {control:?} button");
            return;
        }
        match control {
            ControlId::Back => self.on_back_pressed(now),
            ControlId::Pause => self.on_pause_pressed(now),
            ControlId::Play => self.on_play_pressed(now),
            ControlId::Forward => self.on_forward_pressed(now),
        }
    }

    pub fn on_play_pressed(&mut self, now: Instant) {
        if !self.play_button.enabled {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        if self.rewind_on_play {
            if let Err(e) = player.seek_to(0) {
                warn!("Could not rewind finished track: {e}");
            }
            self.rewind_on_play = false;
        }

        player.start();
        self.duration_ms = player.duration();
        self.position_ms = player.current_position().min(self.duration_ms);

        if !self.has_started_once {
            self.slider.max = self.duration_ms;
            self.has_started_once = true;
        }

        self.total_label.text = self.settings.messages.format_timer(self.duration_ms);
        self.refresh_progress();
        self.poll.schedule(now);
        self.set_playing(true);
        self.notify(Notice::Playing, now);

        info!(
            "Playing from {} ms of {} ms",
            self.position_ms, self.duration_ms
        );
    }

    pub fn on_pause_pressed(&mut self, now: Instant) {
        if !self.pause_button.enabled {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        player.pause();
        self.position_ms = player.current_position().min(self.duration_ms);
        self.poll.cancel();
        self.refresh_progress();
        self.set_playing(false);
        self.notify(Notice::Paused, now);

        info!("Paused at {} ms", self.position_ms);
    }

    pub fn on_back_pressed(&mut self, now: Instant) {
        let jump_ms = self.jump_ms();
        // Strictly greater: a position equal to the jump size stays put
        let target = self.position_ms.checked_sub(jump_ms).filter(|t| *t > 0);

        if let Some(target) = target
            && self.seek(target)
        {
            self.notify(Notice::JumpedBack, now);
        } else {
            debug!("Jump back rejected at {} ms", self.position_ms);
            self.notify(Notice::BackNotPossible, now);
        }
    }

    pub fn on_forward_pressed(&mut self, now: Instant) {
        let target = self.position_ms.saturating_add(self.jump_ms());

        if target <= self.duration_ms && self.seek(target) {
            self.notify(Notice::JumpedForward, now);
        } else {
            debug!(
                "Jump forward rejected at {} ms of {} ms",
                self.position_ms, self.duration_ms
            );
            self.notify(Notice::ForwardNotPossible, now);
        }
    }

    /// Advance the controller clock: expire the toast and run the position
    /// poll when it is due.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
        if self.poll.is_due(now) {
            self.poll_position(now);
        }
    }

    /// Cancel the poll and release the playback resource. Safe to call twice.
    pub fn on_destroy(&mut self) {
        self.poll.cancel();
        if self.player.take().is_some() {
            info!("Playback resource released");
        }
    }

    /// Write `time_ms` into `label` through the timer template.
    pub fn format_timer(&self, time_ms: u64, label: &mut TimeLabel) {
        label.text = self.settings.messages.format_timer(time_ms);
    }

    fn poll_position(&mut self, now: Instant) {
        let Some(player) = self.player.as_mut() else {
            self.poll.cancel();
            return;
        };

        let finished = player.is_finished();
        self.position_ms = if finished {
            self.duration_ms
        } else {
            player.current_position().min(self.duration_ms)
        };

        if finished {
            player.pause();
            self.poll.cancel();
            self.rewind_on_play = true;
            self.refresh_progress();
            self.set_playing(false);
            info!("Track finished");
        } else {
            debug!("Poll: {} ms", self.position_ms);
            self.refresh_progress();
            self.poll.schedule(now);
        }
    }

    /// Seek the resource and mirror the new position on screen. Returns false
    /// when the resource rejects the seek, leaving the position unchanged.
    fn seek(&mut self, target_ms: u64) -> bool {
        let Some(player) = self.player.as_mut() else {
            return false;
        };
        match player.seek_to(target_ms) {
            Ok(()) => {
                info!("Seek {} ms -> {} ms", self.position_ms, target_ms);
                self.position_ms = target_ms;
                self.rewind_on_play = false;
                self.refresh_progress();
                true
            }
            Err(e) => {
                warn!("Seek to {target_ms} ms failed: {e}");
                false
            }
        }
    }

    fn refresh_progress(&mut self) {
        self.elapsed_label.text = self.settings.messages.format_timer(self.position_ms);
        self.slider.value = self.position_ms;
    }

    fn set_playing(&mut self, playing: bool) {
        self.pause_button.enabled = playing;
        self.play_button.enabled = !playing;
    }

    fn notify(&mut self, notice: Notice, now: Instant) {
        let message = self.settings.messages.render(notice, self.jump_ms());
        info!("Notice: {message}");
        self.toast = Some(Toast {
            notice,
            message,
            shown_at: now,
            lifetime: self.settings.toast_lifetime,
        });
    }

    fn jump_ms(&self) -> u64 {
        self.settings.jump.as_millis() as u64
    }

    pub fn button(&self, control: ControlId) -> &Button {
        match control {
            ControlId::Back => &self.back_button,
            ControlId::Pause => &self.pause_button,
            ControlId::Play => &self.play_button,
            ControlId::Forward => &self.forward_button,
        }
    }

    pub fn slider(&self) -> &ProgressSlider {
        &self.slider
    }

    pub fn elapsed_label(&self) -> &TimeLabel {
        &self.elapsed_label
    }

    pub fn total_label(&self) -> &TimeLabel {
        &self.total_label
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn poll(&self) -> &PollTimer {
        &self.poll
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_playing(&self) -> bool {
        self.pause_button.enabled
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.player.is_none()
    }
}

impl<P: Playback> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        self.on_destroy();
    }
}
