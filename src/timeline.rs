use std::time::{SystemTime, UNIX_EPOCH};

use crate::item::Item;

/// Milliseconds since the Unix epoch.
///
/// Kept as `f64` so window arithmetic (`end - start`, fractional shifts)
/// never truncates.
pub type Timestamp = f64;

/// The visible time range of a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns the width of the window.
    pub fn interval(&self) -> f64 {
        self.end - self.start
    }

    /// Returns true if the window is finite and non-empty.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }

    /// Returns the window moved by `delta` milliseconds.
    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }
}

/// Request to change the visible window.
///
/// `animation: None` leaves the choice to the timeline (animated by default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowUpdate {
    pub start: Timestamp,
    pub end: Timestamp,
    pub animation: Option<bool>,
}

impl WindowUpdate {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end, animation: None }
    }

    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// Options for zoom operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomOptions {
    pub animation: bool,
}

/// Events a timeline can notify subscribers about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineEvent {
    /// Fired periodically so the current-time marker can be redrawn
    CurrentTimeTick,
}

/// Callback invoked on timeline events.
///
/// The timeline passes itself in, so handlers can read and change the window
/// while the timeline is being driven.
pub type TickHandler = Box<dyn FnMut(&mut dyn TimelineHandle)>;

/// Operations the toolbar needs from a timeline widget.
pub trait TimelineHandle {
    /// Zooms in by `ratio` around the window centre
    fn zoom_in(&mut self, ratio: f64, options: ZoomOptions);

    /// Zooms out by `ratio` around the window centre
    fn zoom_out(&mut self, ratio: f64, options: ZoomOptions);

    /// Changes the visible window
    fn set_window(&mut self, update: WindowUpdate);

    /// Returns the visible window
    fn get_window(&self) -> TimeWindow;

    /// Adjusts the window so all items are visible
    fn fit(&mut self);

    /// Returns the items currently on the timeline
    fn items(&self) -> &[Item];

    /// Subscribes `handler` to `event`
    fn on(&mut self, event: TimelineEvent, handler: TickHandler);
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock based on `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        now_ms()
    }
}

/// Returns the current wall-clock time in milliseconds since the epoch.
pub fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_interval_and_shift() {
        let window = TimeWindow::new(100.0, 300.0);
        assert_eq!(window.interval(), 200.0);
        assert_eq!(window.shifted(-50.0), TimeWindow::new(50.0, 250.0));
    }

    #[test]
    fn test_window_validity() {
        assert!(TimeWindow::new(0.0, 1.0).is_valid());
        assert!(!TimeWindow::new(1.0, 1.0).is_valid());
        assert!(!TimeWindow::new(2.0, 1.0).is_valid());
        assert!(!TimeWindow::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_577_836_800_000.0);
    }
}
