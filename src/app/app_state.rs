//! Centralized application state for the timeline viewer.
//!
//! The parent of the toolbar: it owns the timeline widget and hands the
//! toolbar a shared handle to it.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tdg::{SharedTimeline, TimeWindow, TimelineWidget, Timestamp, ToolbarController};

use crate::app::ToolbarPreferences;
use crate::state::InteractionState;

/// Visible range before any tasks are loaded.
const INITIAL_LOOKBACK_MS: f64 = 10.0 * 60_000.0;
const INITIAL_LOOKAHEAD_MS: f64 = 2.0 * 60_000.0;

/// Main application state.
pub struct AppState {
    /// Timeline widget, shared with the toolbar's tick subscription
    pub timeline: Rc<RefCell<TimelineWidget>>,

    /// Toolbar controller holding a weak reference to `timeline`
    pub toolbar: ToolbarController,

    /// Drag and hover state of the timeline canvas
    pub interaction: InteractionState,

    /// Path of the loaded task file (None for demo tasks or nothing loaded)
    pub file_path: Option<PathBuf>,

    /// True once any task list was loaded
    pub has_tasks: bool,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates the state with an empty timeline around `now` and attaches the toolbar.
    pub fn new(now: Timestamp) -> Self {
        let mut timeline = TimelineWidget::new(TimeWindow::new(
            now - INITIAL_LOOKBACK_MS,
            now + INITIAL_LOOKAHEAD_MS,
        ));
        timeline.advance(now);

        let timeline = Rc::new(RefCell::new(timeline));
        let mut toolbar = ToolbarController::new();
        let shared: SharedTimeline = timeline.clone();
        toolbar.attach(&shared);

        Self {
            timeline,
            toolbar,
            interaction: InteractionState::new(),
            file_path: None,
            has_tasks: false,
            error_message: None,
        }
    }

    /// Creates the state and restores toolbar toggles saved by a previous session.
    pub fn with_preferences(now: Timestamp, preferences: ToolbarPreferences) -> Self {
        let mut state = Self::new(now);
        if preferences.grouped {
            let event = state.toolbar.group_tasks();
            state.apply_toolbar_event(event);
        }
        if preferences.rolling_mode {
            state.toolbar.toggle_rolling();
        }
        state
    }

    /// Current toolbar toggles, for persistence.
    pub fn preferences(&self) -> ToolbarPreferences {
        ToolbarPreferences {
            grouped: self.toolbar.grouped(),
            rolling_mode: self.toolbar.rolling_mode(),
        }
    }

    /// Reacts to a notification from the toolbar.
    pub fn apply_toolbar_event(&mut self, event: tdg::ToolbarEvent) {
        match event {
            tdg::ToolbarEvent::GroupedChanged(grouped) => {
                self.timeline.borrow_mut().set_grouped(grouped);
            }
        }
    }

    /// Clears the task-related state before a new list is loaded.
    pub fn reset_task_state(&mut self) {
        self.timeline.borrow_mut().set_items(Vec::new());
        self.interaction.reset();
        self.file_path = None;
        self.has_tasks = false;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdg::TimelineHandle;

    #[test]
    fn test_new_state_attaches_toolbar() {
        let state = AppState::new(1_000_000.0);
        assert!(state.toolbar.has_timeline());
        let window = state.timeline.borrow().get_window();
        assert!(window.start < 1_000_000.0 && window.end > 1_000_000.0);
    }

    #[test]
    fn test_grouped_event_reaches_widget() {
        let mut state = AppState::new(0.0);
        let event = state.toolbar.group_tasks();
        state.apply_toolbar_event(event);
        assert!(state.timeline.borrow().grouped());
    }

    #[test]
    fn test_preferences_restore() {
        let state = AppState::with_preferences(
            0.0,
            ToolbarPreferences { grouped: true, rolling_mode: true },
        );
        assert!(state.timeline.borrow().grouped());
        assert_eq!(state.preferences(), ToolbarPreferences { grouped: true, rolling_mode: true });
    }
}
