//! Toolbar UI rendering
//!
//! One button per toolbar action. Buttons stay disabled until a timeline is
//! attached to the controller.

use eframe::egui;
use tdg::{ToolbarController, ToolbarEvent};

/// Renders the toolbar row.
///
/// # Returns
/// * `Option<ToolbarEvent>` - Notification for the parent (grouping changed)
pub fn render_toolbar(
    ui: &mut egui::Ui,
    toolbar: &mut ToolbarController,
    error_message: &mut Option<String>,
) -> Option<ToolbarEvent> {
    let mut event = None;
    let enabled = toolbar.has_timeline();

    ui.horizontal(|ui| {
        ui.add_enabled_ui(enabled, |ui| {
            if ui.button("🔍+").on_hover_text("Zoom in").clicked() {
                report(toolbar.zoom_in(), error_message);
            }
            if ui.button("🔍-").on_hover_text("Zoom out").clicked() {
                report(toolbar.zoom_out(), error_message);
            }
            if ui.button("◀").on_hover_text("Move left").clicked() {
                report(toolbar.move_left(), error_message);
            }
            if ui.button("▶").on_hover_text("Move right").clicked() {
                report(toolbar.move_right(), error_message);
            }
            if ui.button("⛶ Fit").on_hover_text("Fit all tasks").clicked() {
                report(toolbar.fit(), error_message);
            }

            ui.separator();

            if ui.selectable_label(toolbar.grouped(), "▤ Group").on_hover_text("Group tasks").clicked() {
                event = Some(toolbar.group_tasks());
            }
            if ui
                .selectable_label(toolbar.rolling_mode(), "⏵ Rolling")
                .on_hover_text("Follow the current time")
                .clicked()
            {
                toolbar.toggle_rolling();
            }

            ui.separator();

            if ui.button("⏮ Earliest").on_hover_text("Focus on the earliest task").clicked() {
                toolbar.focus_earliest();
            }
            if ui.button("⏭ Latest").on_hover_text("Focus on the latest task").clicked() {
                toolbar.focus_latest();
            }
        });
    });

    event
}

fn report(result: anyhow::Result<()>, error_message: &mut Option<String>) {
    if let Err(e) = result {
        log::error!("Toolbar action failed: {}", e);
        *error_message = Some(format!("Toolbar action failed: {}", e));
    }
}
