//! Task Timeline Viewer GUI Application
//!
//! Shows tasks on a zoomable timeline with a toolbar for zooming, panning,
//! fitting, grouping and following the current time ("rolling" mode).

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! The application is built with a modular architecture:
//! - `app/` - Application state, coordination and settings persistence
//! - `domain/` - Coordinate transformations for the time axis
//! - `presentation/` - Bar colors
//! - `io/` - Background task file loading
//! - `utils/` - Formatting helpers
//! - `ui/` - Panels, toolbar and input handling
//! - `rendering/` - Low-level drawing of lanes, axis and overlays
//! - `state/` - Interaction state

use eframe::egui;
use std::path::PathBuf;

mod utils;
mod domain;
mod presentation;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    // First positional argument is a task file to open on startup
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Task Timeline Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Task Timeline Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineViewerApp::new(cc, initial_file)))),
    )
}

/// The main application. Delegates to `ApplicationCoordinator` and `PanelManager`.
struct TimelineViewerApp {
    state: AppState,
    loader: AsyncLoader,
    /// File to load on the first frame
    pending_file_load: Option<PathBuf>,
}

impl TimelineViewerApp {
    /// Creates the app with toolbar toggles restored from persistent storage.
    ///
    /// Without a command-line file, the last opened file is reopened.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let preferences = SettingsCoordinator::load_toolbar_preferences(cc.storage);
        let pending_file_load = initial_file.or_else(|| SettingsCoordinator::load_last_file(cc.storage));

        log::info!(
            "Starting with grouped={} rolling={}",
            preferences.grouped,
            preferences.rolling_mode
        );

        Self {
            state: AppState::with_preferences(tdg::now_ms(), preferences),
            loader: AsyncLoader::new(),
            pending_file_load,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::OpenDemoTasksRequested => {
                ApplicationCoordinator::open_demo_tasks(&mut self.state, &self.loader, tdg::now_ms());
            }
            PanelInteraction::Toolbar(event) => {
                ApplicationCoordinator::handle_toolbar_event(&mut self.state, event);
            }
        }
    }

    fn save_settings(&self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_toolbar_preferences(storage, &self.state.preferences());
        SettingsCoordinator::save_last_file(storage, self.state.file_path.as_ref());
    }
}

impl eframe::App for TimelineViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.save_settings(storage);
    }

    /// Main update loop:
    /// 1. Pick up finished background loads
    /// 2. Open the startup file on the first frame
    /// 3. Advance the timeline clock (animations, ticks)
    /// 4. Render panels and handle their interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        ApplicationCoordinator::advance_frame(&mut self.state, tdg::now_ms(), ctx);

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
