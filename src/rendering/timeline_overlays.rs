//! Timeline overlay rendering for the current-time marker and cursor line.

use eframe::egui;
use egui::Color32;
use tdg::{TimeWindow, Timestamp};
use crate::domain::viewport_operations;
use crate::presentation::color_mapping::{CURRENT_TIME_COLOR, CURSOR_COLOR};
use crate::utils::format_timestamp;

/// Draws the current-time marker if `now` is inside the window.
pub fn render_current_time(
    painter: &egui::Painter,
    canvas_rect: egui::Rect,
    window: TimeWindow,
    now: Timestamp,
) {
    if now < window.start || now > window.end {
        return;
    }
    let x = viewport_operations::time_to_x(now, window, canvas_rect);
    painter.line_segment(
        [egui::pos2(x, canvas_rect.top()), egui::pos2(x, canvas_rect.bottom())],
        egui::Stroke::new(2.0, CURRENT_TIME_COLOR),
    );
}

/// Renders the vertical cursor line and timestamp label at the hover position.
///
/// # Arguments
/// * `ctx` - The egui context for accessing the debug painter
/// * `canvas_rect` - The canvas rectangle the line spans
/// * `hover_pos` - The cursor hover position
/// * `hover_time` - The timestamp at the hover position
pub fn render_cursor_overlay(
    ctx: &egui::Context,
    canvas_rect: egui::Rect,
    hover_pos: egui::Pos2,
    hover_time: Timestamp,
) {
    let line_x = hover_pos.x;

    // debug_painter draws on top of everything
    let painter = ctx.debug_painter();

    painter.line_segment(
        [egui::pos2(line_x, canvas_rect.top()), egui::pos2(line_x, canvas_rect.bottom())],
        egui::Stroke::new(1.5, CURSOR_COLOR),
    );

    let label_text = format_timestamp(hover_time, true);
    let font_id = egui::FontId::proportional(12.0);
    let bg_color = Color32::from_rgba_premultiplied(0, 0, 0, 200);

    let galley = painter.layout_no_wrap(label_text.clone(), font_id.clone(), CURSOR_COLOR);
    let text_size = galley.size();
    let padding = egui::vec2(4.0, 2.0);
    let label_pos = egui::pos2(line_x, canvas_rect.bottom() - text_size.y - padding.y * 2.0 - 4.0);

    let bg_rect = egui::Rect::from_min_size(
        egui::pos2(label_pos.x - padding.x, label_pos.y - padding.y),
        egui::vec2(text_size.x + padding.x * 2.0, text_size.y + padding.y * 2.0),
    );
    painter.rect_filled(bg_rect, 2.0, bg_color);
    painter.rect_stroke(bg_rect, 2.0, egui::Stroke::new(1.0, CURSOR_COLOR), egui::StrokeKind::Outside);

    painter.text(
        egui::pos2(label_pos.x + padding.x, label_pos.y + padding.y),
        egui::Align2::LEFT_TOP,
        label_text,
        font_id,
        CURSOR_COLOR,
    );
}
