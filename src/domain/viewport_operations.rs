//! Viewport operations for coordinate transformation and time axis scales.
//!
//! This module provides pure functions for:
//! - Converting between timestamps and screen coordinates
//! - Picking a readable tick interval for the time axis
//!
//! These functions are stateless and can be tested independently.

use tdg::widget::{ZOOM_MAX_MS, ZOOM_MIN_MS};
use tdg::{TimeWindow, Timestamp};

/// Converts a timestamp to an X coordinate within the canvas rect.
///
/// # Arguments
/// * `time` - The timestamp to convert
/// * `window` - The visible time range
/// * `canvas_rect` - The canvas rectangle for positioning
pub fn time_to_x(time: Timestamp, window: TimeWindow, canvas_rect: egui::Rect) -> f32 {
    let interval = window.interval();
    if interval <= 0.0 {
        return canvas_rect.left();
    }
    let normalized = (time - window.start) / interval;
    canvas_rect.left() + (normalized * canvas_rect.width() as f64) as f32
}

/// Converts an X coordinate to a timestamp within the visible range.
///
/// # Arguments
/// * `x` - The X coordinate to convert
/// * `window` - The visible time range
/// * `canvas_rect` - The canvas rectangle for positioning
pub fn x_to_time(x: f32, window: TimeWindow, canvas_rect: egui::Rect) -> Timestamp {
    if canvas_rect.width() <= 0.0 {
        return window.start;
    }
    let normalized = ((x - canvas_rect.left()) / canvas_rect.width()) as f64;
    window.start + normalized * window.interval()
}

/// Converts a horizontal pixel distance into milliseconds.
pub fn pixels_to_ms(pixels: f32, window: TimeWindow, canvas_rect: egui::Rect) -> f64 {
    if canvas_rect.width() <= 0.0 {
        return 0.0;
    }
    pixels as f64 * window.interval() / canvas_rect.width() as f64
}

/// Scales the window by `1 / factor` keeping `anchor` at the same screen position.
///
/// The new interval is clamped to the widget's zoom limits.
pub fn zoom_around(window: TimeWindow, anchor: Timestamp, factor: f64) -> TimeWindow {
    let interval = window.interval();
    if interval <= 0.0 || factor <= 0.0 {
        return window;
    }
    let new_interval = (interval / factor).clamp(ZOOM_MIN_MS, ZOOM_MAX_MS);
    let anchor_ratio = (anchor - window.start) / interval;
    let new_start = anchor - anchor_ratio * new_interval;
    TimeWindow::new(new_start, new_start + new_interval)
}

/// Tick steps the time axis snaps to, in milliseconds.
const TICK_STEPS_MS: [f64; 19] = [
    1.0, 5.0, 10.0, 50.0, 100.0, 500.0,
    1_000.0, 5_000.0, 10_000.0, 30_000.0,
    60_000.0, 300_000.0, 600_000.0, 1_800_000.0,
    3_600_000.0, 10_800_000.0, 21_600_000.0, 43_200_000.0,
    86_400_000.0,
];

/// Returns the smallest tick step that keeps at most `max_ticks` ticks in view.
///
/// Windows wider than the largest step use whole multiples of a day.
pub fn tick_interval(window: TimeWindow, max_ticks: usize) -> f64 {
    let target = window.interval() / max_ticks.max(1) as f64;
    for step in TICK_STEPS_MS {
        if step >= target {
            return step;
        }
    }
    let day = TICK_STEPS_MS[TICK_STEPS_MS.len() - 1];
    (target / day).ceil() * day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 0.0), egui::vec2(1000.0, 50.0))
    }

    #[test]
    fn test_time_x_round_trip() {
        let window = TimeWindow::new(10_000.0, 20_000.0);
        assert_eq!(time_to_x(15_000.0, window, rect()), 600.0);
        assert_eq!(x_to_time(600.0, window, rect()), 15_000.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = TimeWindow::new(5.0, 5.0);
        assert_eq!(time_to_x(5.0, empty, rect()), 100.0);
        let flat = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(0.0, 10.0));
        assert_eq!(x_to_time(3.0, TimeWindow::new(1.0, 2.0), flat), 1.0);
        assert_eq!(pixels_to_ms(10.0, TimeWindow::new(1.0, 2.0), flat), 0.0);
    }

    #[test]
    fn test_pixels_to_ms() {
        let window = TimeWindow::new(0.0, 60_000.0);
        assert_eq!(pixels_to_ms(100.0, window, rect()), 6_000.0);
    }

    #[test]
    fn test_zoom_around_keeps_anchor() {
        let zoomed = zoom_around(TimeWindow::new(0.0, 1000.0), 250.0, 2.0);
        assert_eq!(zoomed, TimeWindow::new(125.0, 625.0));
    }

    #[test]
    fn test_zoom_around_respects_limits() {
        let narrow = zoom_around(TimeWindow::new(0.0, 20.0), 10.0, 100.0);
        assert_eq!(narrow.interval(), ZOOM_MIN_MS);
        assert_eq!(narrow, TimeWindow::new(5.0, 15.0));

        let wide = zoom_around(TimeWindow::new(0.0, ZOOM_MAX_MS), 0.0, 0.5);
        assert_eq!(wide.interval(), ZOOM_MAX_MS);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(TimeWindow::new(0.0, 60_000.0), 10), 10_000.0);
        assert_eq!(tick_interval(TimeWindow::new(0.0, 3.0), 10), 1.0);
        assert_eq!(tick_interval(TimeWindow::new(0.0, 86_400_000.0 * 30.0), 10), 86_400_000.0 * 3.0);
    }
}
