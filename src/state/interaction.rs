//! Mouse interaction state of the timeline canvas.

use tdg::Timestamp;

/// State of ongoing mouse interactions.
///
/// Responsibilities:
/// - Tracking drag panning
/// - Tracking the hovered position for the cursor line
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Whether user is currently dragging to pan
    is_dragging: bool,
    /// Pointer position and time under the cursor
    hover: Option<(egui::Pos2, Timestamp)>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all interaction state.
    pub fn reset(&mut self) {
        self.is_dragging = false;
        self.hover = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    pub fn hover(&self) -> Option<(egui::Pos2, Timestamp)> {
        self.hover
    }

    pub fn set_hover(&mut self, hover: Option<(egui::Pos2, Timestamp)>) {
        self.hover = hover;
    }
}
