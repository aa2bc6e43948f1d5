//! Timeline panel UI rendering
//!
//! Time axis on top, one lane per row below, with the current-time marker,
//! dependency arrows and the hover cursor drawn over the lanes.

use std::collections::HashMap;

use egui::ScrollArea;
use tdg::TimelineHandle;

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::timeline_renderer::{self, LABEL_WIDTH};
use crate::rendering::{time_axis_renderer, timeline_overlays};
use crate::ui::input::timeline_input_handler::{self, TimelineInputResult};
use crate::utils::{format_memory_mb, get_current_memory_mb};

/// Height of the time axis header.
const AXIS_HEIGHT: f32 = 24.0;

/// Renders the complete timeline panel.
pub fn render_timeline_panel(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    state: &mut AppState,
    loader: &AsyncLoader,
) {
    if loader.is_loading() {
        render_loading_indicator(ui);
        ctx.request_repaint_after(std::time::Duration::from_secs_f32(0.1));
        return;
    }

    if !state.has_tasks {
        ui.label("No tasks loaded - open a task file or generate demo tasks");
        return;
    }

    // Time axis header, aligned with the bar area of each lane
    let (header_rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), AXIS_HEIGHT), egui::Sense::hover());
    let axis_rect = egui::Rect::from_min_max(
        egui::pos2(header_rect.left() + LABEL_WIDTH, header_rect.top()),
        header_rect.max,
    );
    ui.separator();

    let canvas_rect = ui.available_rect_before_wrap();
    let bars_canvas = egui::Rect::from_min_max(
        egui::pos2(canvas_rect.left() + LABEL_WIDTH, canvas_rect.top()),
        canvas_rect.max,
    );
    let canvas_response = ui.interact(
        bars_canvas,
        ui.id().with("timeline_canvas"),
        egui::Sense::drag().union(egui::Sense::hover()),
    );

    let mut timeline = state.timeline.borrow_mut();
    timeline.set_canvas_width(bars_canvas.width());

    let input_result = timeline_input_handler::handle_timeline_input(
        ctx,
        bars_canvas,
        &canvas_response,
        &mut *timeline,
        &mut state.interaction,
    );
    if input_result != TimelineInputResult::None {
        ctx.request_repaint();
    }

    let window = timeline.get_window();
    let now = timeline.now();
    time_axis_renderer::render_time_axis(ui, axis_rect, window);

    let rows = timeline.rows();
    let items = timeline.items();
    let is_dragging = state.interaction.is_dragging();
    let mut anchors = HashMap::new();

    let scroll_output = ScrollArea::vertical()
        .id_salt("timeline_scroll_area")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in &rows {
                timeline_renderer::render_timeline_row(ui, row, items, window, now, is_dragging, &mut anchors);
            }
        });

    let visible_rect = scroll_output.inner_rect;
    let bars_visible = egui::Rect::from_min_max(
        egui::pos2(visible_rect.left() + LABEL_WIDTH, visible_rect.top()),
        visible_rect.max,
    );
    let painter = ui.painter().with_clip_rect(bars_visible);
    timeline_renderer::render_dependencies(&painter, items, &anchors);
    timeline_overlays::render_current_time(&painter, bars_visible, window, now);

    if let Some((hover_pos, hover_time)) = state.interaction.hover() {
        timeline_overlays::render_cursor_overlay(ctx, bars_visible, hover_pos, hover_time);
    }
}

/// Renders a loading indicator while a task file is being read.
fn render_loading_indicator(ui: &mut egui::Ui) {
    let center_pos = ui.available_rect_before_wrap().center();
    let color = ui.visuals().weak_text_color();

    ui.painter().text(
        center_pos,
        egui::Align2::CENTER_CENTER,
        "Loading...",
        egui::FontId::proportional(48.0),
        color,
    );
    ui.painter().text(
        egui::pos2(center_pos.x, center_pos.y + 60.0),
        egui::Align2::CENTER_CENTER,
        format_memory_mb(get_current_memory_mb()),
        egui::FontId::proportional(24.0),
        color,
    );
}
