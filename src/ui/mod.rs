//! UI module for rendering the TUI

mod field_renderer;
mod layout;

use crate::app::App;
use field_renderer::FieldView;
use layout::FIELD_HEIGHT;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, content_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);
    draw_fields(frame, content_area, app);
    layout::draw_status_bar(frame, status_area, app);
}

/// First field index to show so the active field stays on screen
fn scroll_offset(active: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        active.saturating_sub(visible - 1)
    }
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let visible = (area.height / FIELD_HEIGHT) as usize;
    let offset = scroll_offset(app.active_field, visible);

    for (row, (index, (label, id))) in app
        .fields
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let field_area = Rect {
            x: area.x,
            y: area.y + row as u16 * FIELD_HEIGHT,
            width: area.width,
            height: FIELD_HEIGHT,
        };
        let view = FieldView {
            label,
            value: app.form.value_at(*id),
            is_active: index == app.active_field,
            is_dirty: app.form.is_dirty(*id),
            error: app.error_for(*id),
        };
        field_renderer::draw_field(frame, field_area, &view);
    }
}
