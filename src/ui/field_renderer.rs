//! Field rendering for form controls

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

/// What a single field box shows
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: Option<Value>,
    pub is_active: bool,
    pub is_dirty: bool,
    pub error: Option<String>,
}

/// Text shown for a leaf value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Draw one leaf control with its dirty marker and first validation error
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    let accent = if field.error.is_some() {
        Color::Red
    } else if field.is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let style = Style::default().fg(accent);

    let text = field.value.as_ref().map(display_value).unwrap_or_default();
    let display_str = if text.is_empty() && !field.is_active {
        "(empty)".to_string()
    } else {
        text
    };

    let cursor = if field.is_active { "▌" } else { "" };

    let mut lines = vec![Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])];
    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    let title = if field.is_dirty {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
