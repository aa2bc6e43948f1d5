//! Time axis rendering logic
//!
//! Draws major and minor tick marks with time-of-day labels.

use eframe::egui;
use tdg::TimeWindow;
use crate::domain::viewport_operations;
use crate::utils::format_timestamp;

/// Upper bound of labelled ticks across the axis.
const MAX_MAJOR_TICKS: usize = 10;

/// Renders the time axis into `axis_rect`.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `axis_rect` - The rectangular area to draw the time axis in
/// * `window` - The visible time range
pub fn render_time_axis(ui: &mut egui::Ui, axis_rect: egui::Rect, window: TimeWindow) {
    ui.painter().rect_filled(axis_rect, 0.0, ui.visuals().extreme_bg_color);

    if !window.is_valid() {
        return;
    }

    let tick_interval = viewport_operations::tick_interval(window, MAX_MAJOR_TICKS);
    let with_millis = tick_interval < 1_000.0;
    let text_color = ui.visuals().text_color();

    let mut tick = (window.start / tick_interval).floor() * tick_interval;
    while tick <= window.end {
        let x = viewport_operations::time_to_x(tick, window, axis_rect);

        if x >= axis_rect.left() {
            ui.painter().line_segment(
                [egui::pos2(x, axis_rect.top()), egui::pos2(x, axis_rect.top() + 8.0)],
                egui::Stroke::new(2.0, text_color),
            );
            ui.painter().text(
                egui::pos2(x, axis_rect.top() + 12.0),
                egui::Align2::CENTER_TOP,
                format_timestamp(tick, with_millis),
                egui::FontId::proportional(10.0),
                text_color,
            );
        }

        for i in 1..5 {
            let minor = tick + tick_interval * i as f64 / 5.0;
            if minor > window.end {
                break;
            }
            let minor_x = viewport_operations::time_to_x(minor, window, axis_rect);
            if minor_x < axis_rect.left() {
                continue;
            }
            ui.painter().line_segment(
                [egui::pos2(minor_x, axis_rect.top()), egui::pos2(minor_x, axis_rect.top() + 4.0)],
                egui::Stroke::new(1.0, text_color.gamma_multiply(0.5)),
            );
        }

        tick += tick_interval;
    }
}
