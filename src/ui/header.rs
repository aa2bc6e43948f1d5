//! Header panel UI rendering
//!
//! File controls on the top line, the toolbar below, and the error label.

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use tdg::ToolbarEvent;
use crate::app::AppState;
use crate::ui::toolbar;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a task file
    OpenFileRequested(PathBuf),
    /// User clicked "Demo Tasks"
    OpenDemoTasksRequested,
    /// The toolbar notified a change
    Toolbar(ToolbarEvent),
}

/// Renders the application header with file controls and the toolbar
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Tasks").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Task Files", &["json", "br"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Demo Tasks").clicked() {
            interaction = Some(HeaderInteraction::OpenDemoTasksRequested);
        }

        ui.separator();

        if let Some(event) = toolbar::render_toolbar(ui, &mut state.toolbar, &mut state.error_message) {
            interaction = Some(HeaderInteraction::Toolbar(event));
        }
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
