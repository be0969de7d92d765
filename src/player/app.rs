//! Main application state and control flow for the player screen.
//!
//! This module owns the terminal session and the event loop. Each frame it
//! advances the controller clock (which runs the position poll when due),
//! redraws, and feeds key presses and mouse clicks into the controller's button
//! handlers. Everything happens on this one thread.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::{
    error::Error,
    io,
    path::Path,
    time::{Duration, Instant},
};

use jumpdeck::config::Config;
use jumpdeck::controller::{ControlId, ControllerSettings, PlaybackController};
use jumpdeck::playback::Playback;

use super::audio::RodioPlayback;
use super::ui::{self, ScreenLayout};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press(ControlId),
    Quit,
}

pub struct App<P: Playback> {
    pub should_quit: bool,
    pub track_name: String,
    pub controller: PlaybackController<P>,
    /// Area of the last drawn frame, used to hit test mouse clicks
    pub screen: Rect,
}

impl<P: Playback> App<P> {
    pub fn new(track_name: String, controller: PlaybackController<P>) -> Self {
        Self {
            should_quit: false,
            track_name,
            controller,
            screen: Rect::default(),
        }
    }

    /// Map a key to an action. Space stands for whichever of play or pause is
    /// currently enabled.
    pub fn action_for_key(&self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Left | KeyCode::Char('b') => Some(Action::Press(ControlId::Back)),
            KeyCode::Right | KeyCode::Char('f') => Some(Action::Press(ControlId::Forward)),
            KeyCode::Char('p') => Some(Action::Press(ControlId::Pause)),
            KeyCode::Enter | KeyCode::Char('l') => Some(Action::Press(ControlId::Play)),
            KeyCode::Char(' ') => {
                if self.controller.is_playing() {
                    Some(Action::Press(ControlId::Pause))
                } else {
                    Some(Action::Press(ControlId::Play))
                }
            }
            _ => None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        match self.action_for_key(code) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::Press(control)) => self.controller.press(control, now),
            None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let layout = ScreenLayout::new(self.screen);
        if let Some(control) = layout.button_at(mouse.column, mouse.row) {
            self.controller.press(control, now);
        }
    }
}

pub fn run_with_track(track: &Path, config: &Config) -> Result<(), Box<dyn Error>> {
    init_logging(config)?;
    info!("Starting jumpdeck with {}", track.display());

    // Load errors must surface before the terminal enters raw mode
    let player = RodioPlayback::open(track)?;
    let controller = PlaybackController::on_create(player, ControllerSettings::from(config));

    let track_name = track
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("track")
        .to_string();
    let mut app = App::new(track_name, controller);

    // Setup terminal, leaving it as found if any step fails
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    undo_on_error(
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture),
        disable_raw_mode,
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = undo_on_error(Terminal::new(backend), || {
        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)
    })?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.controller.on_destroy();
    info!("Player closed");

    res
}

/// Run `undo` when `result` is an error, then return `result` unchanged.
fn undo_on_error<T>(
    result: io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err()
        && let Err(e) = undo()
    {
        log::warn!("Could not restore terminal: {e}");
    }
    result
}

fn run_app<B: ratatui::backend::Backend, P: Playback>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
) -> Result<(), Box<dyn Error>> {
    loop {
        app.controller.tick(Instant::now());

        let frame = terminal.draw(|f| ui::draw(f, app))?;
        app.screen = frame.area;

        // Poll for events with a short timeout to keep the clock moving
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    use simplelog::{CombinedLogger, LevelFilter, WriteLogger};
    use std::fs::File;

    let level: LevelFilter = config
        .log_level
        .parse()
        .map_err(|_| format!("Unknown log_level '{}'", config.log_level))?;
    let log_file = std::env::temp_dir().join("jumpdeck.log");
    CombinedLogger::init(vec![WriteLogger::new(
        level,
        simplelog::Config::default(),
        File::create(log_file)?,
    )])?;

    Ok(())
}
