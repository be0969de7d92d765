use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use jumpdeck::controller::ControlId;
use jumpdeck::playback::Playback;

use super::app::App;

/// Screen regions, shared by drawing and mouse hit testing.
pub struct ScreenLayout {
    pub title: Rect,
    pub track: Rect,
    pub labels: Rect,
    pub slider: Rect,
    pub buttons: [(ControlId, Rect); 4],
    pub toast: Rect,
    pub help: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(2), // Track name
                Constraint::Length(1), // Time labels
                Constraint::Length(3), // Progress slider
                Constraint::Length(3), // Buttons
                Constraint::Length(2), // Toast
                Constraint::Min(0),    // Spacer
                Constraint::Length(1), // Key help
            ])
            .split(area);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(chunks[4]);

        Self {
            title: chunks[0],
            track: chunks[1],
            labels: chunks[2],
            slider: chunks[3],
            buttons: [
                (ControlId::ALL[0], row[0]),
                (ControlId::ALL[1], row[1]),
                (ControlId::ALL[2], row[2]),
                (ControlId::ALL[3], row[3]),
            ],
            toast: chunks[5],
            help: chunks[7],
        }
    }

    /// The button under a terminal cell, if any.
    pub fn button_at(&self, column: u16, row: u16) -> Option<ControlId> {
        let position = Position::new(column, row);
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(control, _)| *control)
    }
}

pub fn draw<P: Playback>(f: &mut Frame, app: &App<P>) {
    let layout = ScreenLayout::new(f.area());
    let controller = &app.controller;

    let title = Paragraph::new("🎵 jumpdeck")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, layout.title);

    let track = Paragraph::new(format!("Loaded: {}", app.track_name))
        .style(Style::default().fg(Color::White));
    f.render_widget(track, layout.track);

    draw_time_labels(
        f,
        layout.labels,
        &controller.elapsed_label().text,
        &controller.total_label().text,
    );

    let slider = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(controller.slider().ratio())
        .label("");
    f.render_widget(slider, layout.slider);

    for (control, area) in layout.buttons {
        let enabled = controller.button(control).enabled;
        draw_button(f, area, control.label(), enabled);
    }

    if let Some(toast) = controller.toast() {
        let toast_widget = Paragraph::new(toast.message.as_str())
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(toast_widget, layout.toast);
    }

    draw_help(f, layout.help, controller.is_playing());
}

fn draw_time_labels(f: &mut Frame, area: Rect, elapsed: &str, total: &str) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    f.render_widget(
        Paragraph::new(elapsed).alignment(Alignment::Left),
        halves[0],
    );
    f.render_widget(
        Paragraph::new(total).alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_button(f: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let (border, text) = if enabled {
        (
            Style::default().fg(Color::Green),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let button = Paragraph::new(label)
        .style(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(button, area);
}

fn draw_help(f: &mut Frame, area: Rect, is_playing: bool) {
    let help = vec![
        Span::styled("[space]", Style::default().fg(Color::Green)),
        Span::raw(if is_playing { " pause  " } else { " play  " }),
        Span::styled("[←→]", Style::default().fg(Color::Magenta)),
        Span::raw(" jump  "),
        Span::styled("[p]", Style::default().fg(Color::Yellow)),
        Span::raw(" pause  "),
        Span::styled("[enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" play  "),
        Span::styled("[q]", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ];

    f.render_widget(
        Paragraph::new(Line::from(help)).alignment(Alignment::Center),
        area,
    );
}
