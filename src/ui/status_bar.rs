//! Status bar UI rendering
//!
//! Memory usage, visible window, task counts and toolbar modes.

use eframe::egui;
use egui::RichText;
use tdg::TimelineHandle;
use crate::app::AppState;
use crate::utils::{format_duration, format_memory_mb, format_timestamp, get_current_memory_mb};

/// Renders the status panel at the bottom of the window
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());

        if !state.has_tasks {
            ui.label(RichText::new("| No tasks loaded").strong());
            return;
        }

        let timeline = state.timeline.borrow();
        let window = timeline.get_window();
        let items = timeline.items();
        let running = items.iter().filter(|i| i.start.is_some() && i.end.is_none()).count();
        let pending = items.iter().filter(|i| i.start.is_none()).count();

        let source = state
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Demo".to_string());

        ui.label(RichText::new(format!(
            "| {} | Window: {} - {} ({}) | Tasks: {} ({} running, {} pending)",
            source,
            format_timestamp(window.start, false),
            format_timestamp(window.end, false),
            format_duration(window.interval()),
            items.len(),
            running,
            pending,
        )).strong());

        if state.toolbar.rolling_mode() {
            ui.label(RichText::new("| ROLLING").strong().color(egui::Color32::YELLOW));
        }
        if state.toolbar.grouped() {
            ui.label(RichText::new("| GROUPED").strong());
        }
    });
}
