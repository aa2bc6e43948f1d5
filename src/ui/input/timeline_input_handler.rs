//! Timeline input handling for panning, zooming, and cursor tracking.
//!
//! - Drag panning (left mouse + drag)
//! - Scroll wheel zoom around the pointer (Ctrl + wheel)
//! - Scroll wheel pan (wheel without Ctrl)
//! - Cursor tracking for the hover line

use eframe::egui;
use tdg::{TimeWindow, TimelineHandle, WindowUpdate};
use crate::domain::viewport_operations;
use crate::state::InteractionState;

/// Result of timeline input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineInputResult {
    /// No interaction occurred
    None,
    /// Window was updated (pan or zoom)
    WindowUpdated,
    /// Cursor hover position changed
    CursorMoved,
}

/// Zoom factor per scroll unit for Ctrl + wheel.
const WHEEL_ZOOM_SPEED: f64 = 0.002;

/// Handles timeline input and applies resulting window changes.
///
/// Window changes are applied without animation so the timeline tracks the pointer.
pub fn handle_timeline_input(
    ctx: &egui::Context,
    canvas_rect: egui::Rect,
    canvas_response: &egui::Response,
    timeline: &mut dyn TimelineHandle,
    interaction: &mut InteractionState,
) -> TimelineInputResult {
    let mut result = TimelineInputResult::None;
    let window = timeline.get_window();

    if canvas_response.dragged() {
        interaction.set_dragging(true);
        let delta_ms = viewport_operations::pixels_to_ms(canvas_response.drag_delta().x, window, canvas_rect);
        if delta_ms != 0.0 {
            apply(timeline, window.shifted(-delta_ms));
            result = TimelineInputResult::WindowUpdated;
        }
    } else if interaction.is_dragging() {
        interaction.set_dragging(false);
    }

    let hover_pos = ctx
        .input(|i| i.pointer.hover_pos())
        .filter(|pos| canvas_rect.contains(*pos));

    let window = timeline.get_window();
    interaction.set_hover(hover_pos.map(|pos| {
        (pos, viewport_operations::x_to_time(pos.x, window, canvas_rect))
    }));
    if hover_pos.is_some() && result == TimelineInputResult::None {
        result = TimelineInputResult::CursorMoved;
    }

    let Some(pointer) = hover_pos else {
        return result;
    };

    let (scroll_y, ctrl) = ctx.input(|i| {
        let scroll_y = if i.raw_scroll_delta.y != 0.0 {
            i.raw_scroll_delta.y
        } else {
            i.smooth_scroll_delta.y
        };
        (scroll_y, i.modifiers.ctrl)
    });
    if scroll_y == 0.0 {
        return result;
    }

    if ctrl {
        // Zoom keeping the time under the pointer fixed
        let factor = 1.0 + scroll_y as f64 * WHEEL_ZOOM_SPEED;
        if factor > 0.0 {
            let anchor = viewport_operations::x_to_time(pointer.x, window, canvas_rect);
            let zoomed = viewport_operations::zoom_around(window, anchor, factor);
            if zoomed != window {
                apply(timeline, zoomed);
                result = TimelineInputResult::WindowUpdated;
            }
        }
    } else {
        // Scrolling down shows later times, with a floor so high zoom still moves
        let interval = window.interval();
        let pan = (-scroll_y as f64 / 100.0) * interval * 0.1;
        let min_pan = interval * 0.02;
        let pan = if pan.abs() < min_pan { min_pan.copysign(pan) } else { pan };
        apply(timeline, window.shifted(pan));
        result = TimelineInputResult::WindowUpdated;
    }

    result
}

fn apply(timeline: &mut dyn TimelineHandle, window: TimeWindow) {
    timeline.set_window(WindowUpdate::new(window.start, window.end).with_animation(false));
}
