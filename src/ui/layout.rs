//! Layout components (header, field list, status bar)

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of one field box: borders, value line, error line
pub const FIELD_HEIGHT: u16 = 4;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Form-level state: dirty, touched and validity of the root
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let valid = app.form.is_valid();
    let state = |on: bool, yes: &'static str, no: &'static str| {
        let (text, color) = if on {
            (yes, Color::Yellow)
        } else {
            (no, Color::Green)
        };
        Span::styled(text, Style::default().fg(color))
    };

    let mut spans = vec![
        Span::styled(" Sign up ", Style::default().fg(Color::Cyan)),
        Span::raw("│ "),
        state(app.form.dirty(), "dirty", "pristine"),
        Span::raw(" │ "),
        state(app.form.touched(), "touched", "untouched"),
        Span::raw(" │ "),
        if valid {
            Span::styled("valid", Style::default().fg(Color::Green))
        } else {
            Span::styled("invalid", Style::default().fg(Color::Red))
        },
    ];

    // Sequence-level errors have no field box of their own
    if let Some(message) = app
        .form
        .validate_at(app.tags)
        .errors
        .and_then(|errors| errors.iter().find(|e| e.path.is_empty()).cloned())
        .map(|e| e.message)
    {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("tags {message}"),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints, the last status message and the last form event
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Tab: next  ^N: add tag  ^D: remove tag  ^R: reset  ^V: validate  Esc: quit ",
        Style::default().fg(Color::DarkGray),
    )];

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(event) = app.last_event_label() {
        spans.push(Span::styled(
            format!(" [{event}]"),
            Style::default().fg(Color::Magenta),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
