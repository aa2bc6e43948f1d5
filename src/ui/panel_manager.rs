//! Panel orchestration and layout management.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{header, status_bar, timeline_panel};
use tdg::ToolbarEvent;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to open a file
    OpenFileRequested(std::path::PathBuf),
    /// User requested demo tasks
    OpenDemoTasksRequested,
    /// Toolbar notification for the parent
    Toolbar(ToolbarEvent),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// The header (and its toolbar) runs first so toolbar actions never
    /// overlap the timeline panel's borrow of the widget.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => {
                        PanelInteraction::OpenFileRequested(path)
                    }
                    header::HeaderInteraction::OpenDemoTasksRequested => {
                        PanelInteraction::OpenDemoTasksRequested
                    }
                    header::HeaderInteraction::Toolbar(event) => PanelInteraction::Toolbar(event),
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let timeline_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(timeline_frame)
            .show(ctx, |ui| {
                timeline_panel::render_timeline_panel(ui, ctx, state, loader);
            });

        interaction
    }
}
