//! Timeline widget state.
//!
//! `TimelineWidget` is the concrete `TimelineHandle` used by the GUI. It owns
//! the items, the visible window (with optional eased animation), the
//! grouping layout and the current-time tick timer. Drawing lives in the
//! `ui` and `rendering` modules of the GUI binary; this type holds no egui state.

use std::collections::BTreeMap;

use crate::item::Item;
use crate::timeline::{
    TickHandler, TimeWindow, TimelineEvent, TimelineHandle, Timestamp, WindowUpdate, ZoomOptions,
};

/// Duration of an animated window change.
pub const ANIMATION_DURATION_MS: f64 = 500.0;

/// Narrowest window zoom can reach.
pub const ZOOM_MIN_MS: f64 = 10.0;

/// Widest window zoom can reach (about 10 000 years).
pub const ZOOM_MAX_MS: f64 = 315_360_000_000_000.0;

/// Bounds of the current-time tick period.
pub const MIN_TICK_PERIOD_MS: f64 = 30.0;
pub const MAX_TICK_PERIOD_MS: f64 = 1000.0;

/// Padding used by `fit` when all items sit on one instant.
const FIT_POINT_PADDING_MS: f64 = 5_000.0;

/// Fraction of the item extent added on each side by `fit`.
const FIT_PADDING_RATIO: f64 = 0.05;

/// Label of the row collecting items without a group.
pub const UNGROUPED_LABEL: &str = "Ungrouped";

/// An in-flight animated window change.
#[derive(Debug, Clone, Copy)]
struct WindowAnimation {
    from: TimeWindow,
    to: TimeWindow,
    started_at: Timestamp,
}

impl WindowAnimation {
    /// Returns the window at `now` and whether the animation has finished.
    fn sample(&self, now: Timestamp) -> (TimeWindow, bool) {
        let t = ((now - self.started_at) / ANIMATION_DURATION_MS).clamp(0.0, 1.0);
        let eased = ease_in_out_quad(t);
        let window = TimeWindow::new(
            self.from.start + (self.to.start - self.from.start) * eased,
            self.from.end + (self.to.end - self.from.end) * eased,
        );
        if t >= 1.0 {
            (self.to, true)
        } else {
            (window, false)
        }
    }
}

fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// One horizontal lane of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub label: String,
    /// Indices into `TimelineWidget::items()`
    pub item_indices: Vec<usize>,
}

/// Timeline state driven by the toolbar and by mouse input.
pub struct TimelineWidget {
    items: Vec<Item>,
    window: TimeWindow,
    animation: Option<WindowAnimation>,
    grouped: bool,
    handlers: Vec<(TimelineEvent, TickHandler)>,
    /// Width of the drawing area in pixels, used for the tick period
    canvas_width: f32,
    /// Time of the latest `advance` call
    now: Timestamp,
    last_tick: Option<Timestamp>,
}

impl TimelineWidget {
    /// Creates a widget showing `window` with no items.
    pub fn new(window: TimeWindow) -> Self {
        Self {
            items: Vec::new(),
            window,
            animation: None,
            grouped: false,
            handlers: Vec::new(),
            canvas_width: 1000.0,
            now: 0.0,
            last_tick: None,
        }
    }

    /// Replaces the items. The window is left as is.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn grouped(&self) -> bool {
        self.grouped
    }

    pub fn set_grouped(&mut self, grouped: bool) {
        self.grouped = grouped;
    }

    pub fn set_canvas_width(&mut self, width: f32) {
        if width > 0.0 {
            self.canvas_width = width;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Returns the time passed to the latest `advance` call.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Time between current-time ticks: half the time one pixel covers,
    /// clamped to `[MIN_TICK_PERIOD_MS, MAX_TICK_PERIOD_MS]`.
    pub fn tick_period(&self) -> f64 {
        let ms_per_pixel = self.window.interval() / self.canvas_width as f64;
        (ms_per_pixel / 2.0).clamp(MIN_TICK_PERIOD_MS, MAX_TICK_PERIOD_MS)
    }

    /// Steps the animation and fires due ticks.
    ///
    /// Called once per frame with the current time.
    pub fn advance(&mut self, now: Timestamp) {
        self.now = now;

        if let Some(animation) = self.animation {
            let (window, done) = animation.sample(now);
            self.window = window;
            if done {
                self.animation = None;
            }
        }

        match self.last_tick {
            None => self.last_tick = Some(now),
            Some(last) if now - last >= self.tick_period() => {
                self.last_tick = Some(now);
                self.emit(TimelineEvent::CurrentTimeTick);
            }
            Some(_) => {}
        }
    }

    fn emit(&mut self, event: TimelineEvent) {
        let mut handlers = std::mem::take(&mut self.handlers);
        for (subscribed, handler) in handlers.iter_mut() {
            if *subscribed == event {
                handler(&mut *self);
            }
        }
        // Keep handlers registered while emitting
        handlers.append(&mut self.handlers);
        self.handlers = handlers;
    }

    /// Returns the lanes to draw for the current grouping mode.
    pub fn rows(&self) -> Vec<TimelineRow> {
        if !self.grouped {
            return self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| TimelineRow {
                    label: item.content.clone(),
                    item_indices: vec![index],
                })
                .collect();
        }

        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        let mut ungrouped = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            match item.group.as_deref() {
                Some(group) => groups.entry(group).or_default().push(index),
                None => ungrouped.push(index),
            }
        }

        let mut rows: Vec<TimelineRow> = groups
            .into_iter()
            .map(|(label, item_indices)| TimelineRow {
                label: label.to_string(),
                item_indices,
            })
            .collect();
        if !ungrouped.is_empty() {
            rows.push(TimelineRow {
                label: UNGROUPED_LABEL.to_string(),
                item_indices: ungrouped,
            });
        }
        rows
    }

    /// Returns the window with the same centre and `interval` clamped to the zoom limits.
    fn resized(window: TimeWindow, interval: f64) -> TimeWindow {
        let interval = interval.clamp(ZOOM_MIN_MS, ZOOM_MAX_MS);
        let center = window.start + window.interval() / 2.0;
        TimeWindow::new(center - interval / 2.0, center + interval / 2.0)
    }
}

impl TimelineHandle for TimelineWidget {
    fn zoom_in(&mut self, ratio: f64, options: ZoomOptions) {
        let window = self.get_window();
        let target = Self::resized(window, window.interval() / (1.0 + ratio));
        self.set_window(WindowUpdate::new(target.start, target.end).with_animation(options.animation));
    }

    fn zoom_out(&mut self, ratio: f64, options: ZoomOptions) {
        let window = self.get_window();
        let target = Self::resized(window, window.interval() * (1.0 + ratio));
        self.set_window(WindowUpdate::new(target.start, target.end).with_animation(options.animation));
    }

    fn set_window(&mut self, update: WindowUpdate) {
        let target = update.window();
        if !target.is_valid() {
            log::warn!("Ignoring invalid window {:?}", target);
            return;
        }

        if update.animation.unwrap_or(true) {
            self.animation = Some(WindowAnimation {
                from: self.window,
                to: target,
                started_at: self.now,
            });
        } else {
            self.animation = None;
            self.window = target;
        }
    }

    fn get_window(&self) -> TimeWindow {
        self.window
    }

    fn fit(&mut self) {
        let extent = self
            .items
            .iter()
            .filter_map(Item::span)
            .fold(None, |acc: Option<(f64, f64)>, (start, end)| match acc {
                None => Some((start, end)),
                Some((min, max)) => Some((min.min(start), max.max(end))),
            });

        let Some((min, max)) = extent else {
            log::debug!("Fit skipped: no items with a start time");
            return;
        };

        let padding = if max > min {
            (max - min) * FIT_PADDING_RATIO
        } else {
            FIT_POINT_PADDING_MS
        };
        self.set_window(WindowUpdate::new(min - padding, max + padding));
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn on(&mut self, event: TimelineEvent, handler: TickHandler) {
        self.handlers.push((event, handler));
    }
}
