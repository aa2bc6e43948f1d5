//! Application-level coordination and workflow management.
//!
//! Handles task loading, toolbar notifications and driving the timeline
//! clock once per frame.

use std::path::PathBuf;
use std::time::Duration;

use tdg::{TimelineHandle, Timestamp, ToolbarEvent};

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Starts reading a task file in the background.
    ///
    /// Clears the current tasks immediately so the loading indicator shows.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.reset_task_state();
        loader.start_file_load(path, ctx);
    }

    /// Applies a finished background load to the state.
    ///
    /// Called once per frame. Returns true if a load finished (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { items, path } => {
                log::info!("Loaded {} tasks", items.len());
                Self::show_items(state, items);
                state.file_path = path;
                true
            }
            LoadResult::Error(error_msg) => {
                log::error!("Failed to load tasks: {}", error_msg);
                state.error_message = Some(format!("Error loading tasks: {}", error_msg));
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates demo tasks around `now` and shows them.
    pub fn open_demo_tasks(state: &mut AppState, loader: &AsyncLoader, now: Timestamp) {
        state.reset_task_state();
        match loader.load_demo_tasks(now) {
            Ok(items) => {
                log::info!("Generated {} demo tasks", items.len());
                Self::show_items(state, items);
            }
            Err(e) => {
                state.error_message = Some(format!("Error generating demo tasks: {}", e));
            }
        }
    }

    fn show_items(state: &mut AppState, items: Vec<tdg::Item>) {
        {
            let mut timeline = state.timeline.borrow_mut();
            timeline.set_items(items);
            timeline.fit();
        }
        state.has_tasks = true;
        state.error_message = None;
    }

    /// Forwards a toolbar notification to the timeline.
    pub fn handle_toolbar_event(state: &mut AppState, event: ToolbarEvent) {
        state.apply_toolbar_event(event);
    }

    /// Advances the timeline clock and schedules the next repaint.
    ///
    /// Animations and rolling mode repaint every frame; otherwise the next
    /// repaint is due at the next current-time tick.
    pub fn advance_frame(state: &mut AppState, now: Timestamp, ctx: &egui::Context) {
        let (animating, tick_period) = {
            let mut timeline = state.timeline.borrow_mut();
            timeline.advance(now);
            (timeline.is_animating(), timeline.tick_period())
        };

        if animating || state.toolbar.rolling_mode() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_secs_f64(tick_period / 1000.0));
        }
    }
}
