use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use jumpdeck::controller::{ControlId, ControllerSettings, PlaybackController};
use jumpdeck::messages::{Messages, Notice};
use jumpdeck::playback::{Playback, SeekResult};

/// Advances in lockstep with a clock shared with the test.
struct ClockedPlayer {
    clock: Rc<Cell<Instant>>,
    duration_ms: u64,
    anchor_ms: u64,
    started_at: Option<Instant>,
}

impl ClockedPlayer {
    fn new(duration_ms: u64, clock: &Rc<Cell<Instant>>) -> Self {
        Self {
            clock: Rc::clone(clock),
            duration_ms,
            anchor_ms: 0,
            started_at: None,
        }
    }
}

impl Playback for ClockedPlayer {
    fn start(&mut self) {
        self.started_at = Some(self.clock.get());
    }

    fn pause(&mut self) {
        self.anchor_ms = self.current_position();
        self.started_at = None;
    }

    fn seek_to(&mut self, position_ms: u64) -> SeekResult {
        self.anchor_ms = position_ms;
        if self.started_at.is_some() {
            self.started_at = Some(self.clock.get());
        }
        Ok(())
    }

    fn current_position(&self) -> u64 {
        let played = self
            .started_at
            .map(|t| self.clock.get().duration_since(t).as_millis() as u64)
            .unwrap_or(0);
        (self.anchor_ms + played).min(self.duration_ms)
    }

    fn duration(&self) -> u64 {
        self.duration_ms
    }

    fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.current_position() >= self.duration_ms
    }
}

fn advance(clock: &Rc<Cell<Instant>>, by: Duration) -> Instant {
    let now = clock.get() + by;
    clock.set(now);
    now
}

#[test]
fn test_end_to_end_session() {
    let clock = Rc::new(Cell::new(Instant::now()));
    let now = clock.get();
    let mut controller = PlaybackController::on_create(
        ClockedPlayer::new(200_000, &clock),
        ControllerSettings::default(),
    );

    controller.press(ControlId::Play, now);
    assert_eq!(controller.elapsed_label().text, "0:00");
    assert_eq!(controller.total_label().text, "3:20");
    assert_eq!(controller.slider().max, 200_000);

    controller.press(ControlId::Forward, now);
    assert_eq!(controller.position_ms(), 5_000);
    assert_eq!(controller.toast().unwrap().notice, Notice::JumpedForward);

    // Exactly one jump in: going back would land on 0, which is refused
    controller.press(ControlId::Back, now);
    assert_eq!(controller.position_ms(), 5_000);
    assert_eq!(controller.toast().unwrap().notice, Notice::BackNotPossible);
    assert_eq!(
        controller.toast().unwrap().message,
        "Cannot jump backward 5 seconds"
    );

    let now = advance(&clock, Duration::from_secs(1));
    controller.tick(now);
    assert_eq!(controller.position_ms(), 6_000);

    controller.press(ControlId::Back, now);
    assert_eq!(controller.position_ms(), 1_000);
    assert_eq!(controller.elapsed_label().text, "0:01");
    assert_eq!(controller.toast().unwrap().notice, Notice::JumpedBack);

    controller.press(ControlId::Back, now);
    assert_eq!(controller.position_ms(), 1_000);
    assert_eq!(controller.toast().unwrap().notice, Notice::BackNotPossible);
}

#[test]
fn test_poll_tracks_playback_and_stops_on_pause() {
    let clock = Rc::new(Cell::new(Instant::now()));
    let mut controller = PlaybackController::on_create(
        ClockedPlayer::new(200_000, &clock),
        ControllerSettings::default(),
    );
    controller.press(ControlId::Play, clock.get());

    let mut now = clock.get();
    for _ in 0..65 {
        now = advance(&clock, Duration::from_secs(1));
        controller.tick(now);
    }
    assert_eq!(controller.position_ms(), 65_000);
    assert_eq!(controller.elapsed_label().text, "1:05");
    assert_eq!(controller.slider().value, 65_000);

    controller.press(ControlId::Pause, now);
    assert!(!controller.poll().is_scheduled());

    for _ in 0..5 {
        now = advance(&clock, Duration::from_secs(1));
        controller.tick(now);
    }
    assert_eq!(controller.elapsed_label().text, "1:05");

    controller.press(ControlId::Play, now);
    now = advance(&clock, Duration::from_secs(1));
    controller.tick(now);
    assert_eq!(controller.elapsed_label().text, "1:06");
}

#[test]
fn test_track_end_returns_to_stopped_and_replays_from_start() {
    let clock = Rc::new(Cell::new(Instant::now()));
    let mut controller = PlaybackController::on_create(
        ClockedPlayer::new(3_000, &clock),
        ControllerSettings::default(),
    );
    controller.press(ControlId::Play, clock.get());

    let mut now = clock.get();
    for _ in 0..3 {
        now = advance(&clock, Duration::from_secs(1));
        controller.tick(now);
    }
    assert_eq!(controller.elapsed_label().text, "0:03");
    assert!(!controller.is_playing());
    assert!(!controller.poll().is_scheduled());

    controller.press(ControlId::Play, now);
    assert_eq!(controller.position_ms(), 0);
    assert!(controller.is_playing());
}

#[test]
fn test_custom_messages_and_jump() {
    let clock = Rc::new(Cell::new(Instant::now()));
    let now = clock.get();
    let settings = ControllerSettings {
        jump: Duration::from_secs(10),
        messages: Messages {
            jumped_forward: "+{seconds}s".to_string(),
            timer: "{m}m{ss}s".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut controller =
        PlaybackController::on_create(ClockedPlayer::new(200_000, &clock), settings);

    controller.press(ControlId::Play, now);
    controller.press(ControlId::Forward, now);

    assert_eq!(controller.position_ms(), 10_000);
    assert_eq!(controller.toast().unwrap().message, "+10s");
    assert_eq!(controller.elapsed_label().text, "0m10s");
    assert_eq!(controller.total_label().text, "3m20s");
}
