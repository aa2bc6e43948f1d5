//! Toolbar controller driving a timeline.
//!
//! The controller owns two flags (`grouped`, `rolling_mode`) and forwards
//! button actions to whatever timeline the parent attached. It never owns
//! the timeline: it keeps a `Weak` reference, and every action re-resolves it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::{anyhow, Result};

use crate::item::{earliest_item, latest_item, Item};
use crate::timeline::{
    Clock, SystemClock, TimelineEvent, TimelineHandle, WindowUpdate, ZoomOptions,
};

/// Zoom step applied per click.
pub const ZOOM_RATIO: f64 = 0.2;

/// Fraction of the visible interval moved per pan click and per rolling tick.
pub const MOTION_RATIO: f64 = 0.2;

/// Padding around an item when focusing on it.
pub const FOCUS_MARGIN_MS: f64 = 5_000.0;

/// Shared handle type the parent hands to the controller.
pub type SharedTimeline = Rc<RefCell<dyn TimelineHandle>>;

/// Notifications the controller sends back to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarEvent {
    /// The grouped flag changed to the contained value
    GroupedChanged(bool),
}

/// Toolbar controller.
///
/// Responsibilities:
/// - Zoom, pan and fit commands on the attached timeline
/// - Focusing on the earliest/latest item
/// - Grouped and rolling mode toggles
/// - Advancing the window on every tick while rolling
pub struct ToolbarController {
    grouped: bool,
    /// Shared with the tick handler registered on the timeline
    rolling_mode: Rc<Cell<bool>>,
    timeline: Option<Weak<RefCell<dyn TimelineHandle>>>,
    /// Active flag of the tick handler registered on the current timeline
    subscription: Option<Rc<Cell<bool>>>,
    clock: Rc<dyn Clock>,
}

impl Default for ToolbarController {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolbarController {
    /// Creates a controller using the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    /// Creates a controller reading "now" from `clock`.
    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            grouped: false,
            rolling_mode: Rc::new(Cell::new(false)),
            timeline: None,
            subscription: None,
            clock,
        }
    }

    // ===== State Queries =====

    pub fn grouped(&self) -> bool {
        self.grouped
    }

    pub fn rolling_mode(&self) -> bool {
        self.rolling_mode.get()
    }

    /// Returns true if a live timeline is attached.
    pub fn has_timeline(&self) -> bool {
        self.timeline().is_some()
    }

    // ===== Timeline Binding =====

    /// Assigns (or clears) the timeline.
    ///
    /// Each attached timeline gets one tick subscription. When the timeline
    /// is detached or replaced, the old subscription goes inactive and its
    /// handler ignores further ticks. Assigning the same timeline again
    /// changes nothing.
    pub fn set_timeline(&mut self, timeline: Option<&SharedTimeline>) {
        let unchanged = match (self.timeline(), timeline) {
            (Some(current), Some(new)) => Rc::ptr_eq(&current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        self.release_subscription();
        self.timeline = timeline.map(Rc::downgrade);

        if let Some(timeline) = timeline {
            self.subscription = Some(self.subscribe_tick(timeline));
        }
    }

    /// Attaches a timeline. Shorthand for `set_timeline(Some(..))`.
    pub fn attach(&mut self, timeline: &SharedTimeline) {
        self.set_timeline(Some(timeline));
    }

    /// Drops the reference to the timeline and its tick subscription.
    pub fn detach(&mut self) {
        self.set_timeline(None);
    }

    fn subscribe_tick(&self, timeline: &SharedTimeline) -> Rc<Cell<bool>> {
        let active = Rc::new(Cell::new(true));
        let handler_active = Rc::clone(&active);
        let rolling_mode = Rc::clone(&self.rolling_mode);
        let clock = Rc::clone(&self.clock);

        timeline.borrow_mut().on(
            TimelineEvent::CurrentTimeTick,
            Box::new(move |timeline: &mut dyn TimelineHandle| {
                if handler_active.get() && rolling_mode.get() {
                    roll_window(timeline, clock.now());
                }
            }),
        );
        log::debug!("Subscribed to current time ticks");
        active
    }

    fn release_subscription(&mut self) {
        if let Some(active) = self.subscription.take() {
            active.set(false);
            log::debug!("Released current time tick subscription");
        }
    }

    fn timeline(&self) -> Option<SharedTimeline> {
        self.timeline.as_ref().and_then(Weak::upgrade)
    }

    fn require_timeline(&self) -> Result<SharedTimeline> {
        self.timeline().ok_or_else(|| anyhow!("no timeline attached"))
    }

    // ===== Button Actions =====

    pub fn zoom_in(&self) -> Result<()> {
        let timeline = self.require_timeline()?;
        timeline.borrow_mut().zoom_in(ZOOM_RATIO, self.zoom_options());
        Ok(())
    }

    pub fn zoom_out(&self) -> Result<()> {
        let timeline = self.require_timeline()?;
        timeline.borrow_mut().zoom_out(ZOOM_RATIO, self.zoom_options());
        Ok(())
    }

    pub fn move_left(&self) -> Result<()> {
        self.move_by(MOTION_RATIO)
    }

    pub fn move_right(&self) -> Result<()> {
        self.move_by(-MOTION_RATIO)
    }

    pub fn fit(&self) -> Result<()> {
        let timeline = self.require_timeline()?;
        timeline.borrow_mut().fit();
        Ok(())
    }

    /// Flips the grouped flag and returns the notification for the parent.
    pub fn group_tasks(&mut self) -> ToolbarEvent {
        self.grouped = !self.grouped;
        log::info!("Grouping {}", if self.grouped { "enabled" } else { "disabled" });
        ToolbarEvent::GroupedChanged(self.grouped)
    }

    pub fn toggle_rolling(&mut self) {
        let rolling = !self.rolling_mode.get();
        self.rolling_mode.set(rolling);
        log::info!("Rolling mode {}", if rolling { "enabled" } else { "disabled" });
    }

    pub fn focus_earliest(&self) {
        self.focus_with(earliest_item);
    }

    pub fn focus_latest(&self) {
        self.focus_with(latest_item);
    }

    // ===== Internals =====

    fn zoom_options(&self) -> ZoomOptions {
        ZoomOptions { animation: !self.rolling_mode.get() }
    }

    /// Moves the window back by `percentage` of its width (negative moves forward).
    fn move_by(&self, percentage: f64) -> Result<()> {
        let timeline = self.require_timeline()?;
        let mut timeline = timeline.borrow_mut();

        let range = timeline.get_window();
        let offset = range.interval() * percentage;
        timeline.set_window(WindowUpdate::new(range.start - offset, range.end - offset));
        Ok(())
    }

    fn focus_with(&self, pick: fn(&[Item]) -> Option<&Item>) {
        let Some(timeline) = self.timeline() else {
            log::debug!("Focus skipped: no timeline attached");
            return;
        };
        let mut timeline = timeline.borrow_mut();

        let target = pick(timeline.items()).and_then(|item| Some((item.start?, item.end?)));
        match target {
            Some((start, end)) => {
                timeline.set_window(WindowUpdate::new(start - FOCUS_MARGIN_MS, end + FOCUS_MARGIN_MS));
            }
            None => log::debug!("Focus skipped: no item with both start and end"),
        }
    }
}

impl Drop for ToolbarController {
    fn drop(&mut self) {
        self.release_subscription();
    }
}

/// Recentres the window so it ends at `now`, then pushes it forward by
/// `MOTION_RATIO` of its width. Applied without animation.
fn roll_window(timeline: &mut dyn TimelineHandle, now: f64) {
    let range = timeline.get_window();
    let interval = range.interval();

    let mut new_end = now;
    let mut new_start = new_end - interval;

    new_start += interval * MOTION_RATIO;
    new_end += interval * MOTION_RATIO;

    timeline.set_window(WindowUpdate::new(new_start, new_end).with_animation(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{TickHandler, TimeWindow};

    /// Records every call made by the controller.
    #[derive(Default)]
    struct MockTimeline {
        window: Option<TimeWindow>,
        items: Vec<Item>,
        zoom_in_calls: Vec<(f64, ZoomOptions)>,
        zoom_out_calls: Vec<(f64, ZoomOptions)>,
        set_window_calls: Vec<WindowUpdate>,
        fit_calls: usize,
        handlers: Vec<(TimelineEvent, TickHandler)>,
    }

    impl MockTimeline {
        fn with_window(start: f64, end: f64) -> Self {
            Self {
                window: Some(TimeWindow::new(start, end)),
                ..Default::default()
            }
        }

        fn fire_tick(&mut self) {
            let mut handlers = std::mem::take(&mut self.handlers);
            for (event, handler) in handlers.iter_mut() {
                if *event == TimelineEvent::CurrentTimeTick {
                    handler(&mut *self);
                }
            }
            self.handlers = handlers;
        }
    }

    impl TimelineHandle for MockTimeline {
        fn zoom_in(&mut self, ratio: f64, options: ZoomOptions) {
            self.zoom_in_calls.push((ratio, options));
        }

        fn zoom_out(&mut self, ratio: f64, options: ZoomOptions) {
            self.zoom_out_calls.push((ratio, options));
        }

        fn set_window(&mut self, update: WindowUpdate) {
            self.set_window_calls.push(update);
        }

        fn get_window(&self) -> TimeWindow {
            self.window.unwrap_or(TimeWindow::new(0.0, 1.0))
        }

        fn fit(&mut self) {
            self.fit_calls += 1;
        }

        fn items(&self) -> &[Item] {
            &self.items
        }

        fn on(&mut self, event: TimelineEvent, handler: TickHandler) {
            self.handlers.push((event, handler));
        }
    }

    struct FixedClock(f64);

    impl Clock for FixedClock {
        fn now(&self) -> f64 {
            self.0
        }
    }

    fn attached(mock: MockTimeline) -> (ToolbarController, Rc<RefCell<MockTimeline>>) {
        let mock = Rc::new(RefCell::new(mock));
        let shared: SharedTimeline = mock.clone();
        let mut controller = ToolbarController::with_clock(Rc::new(FixedClock(10_000.0)));
        controller.attach(&shared);
        (controller, mock)
    }

    #[test]
    fn test_defaults() {
        let controller = ToolbarController::new();
        assert!(!controller.grouped());
        assert!(!controller.rolling_mode());
        assert!(!controller.has_timeline());
    }

    #[test]
    fn test_zoom_calls_timeline_once() {
        let (controller, mock) = attached(MockTimeline::with_window(0.0, 1.0));

        controller.zoom_in().unwrap();
        assert_eq!(mock.borrow().zoom_in_calls, vec![(0.2, ZoomOptions { animation: true })]);

        controller.zoom_out().unwrap();
        assert_eq!(mock.borrow().zoom_out_calls, vec![(0.2, ZoomOptions { animation: true })]);
        assert_eq!(mock.borrow().zoom_in_calls.len(), 1);
    }

    #[test]
    fn test_zoom_disables_animation_while_rolling() {
        let (mut controller, mock) = attached(MockTimeline::with_window(0.0, 1.0));
        controller.toggle_rolling();

        controller.zoom_in().unwrap();
        controller.zoom_out().unwrap();
        assert!(!mock.borrow().zoom_in_calls[0].1.animation);
        assert!(!mock.borrow().zoom_out_calls[0].1.animation);
    }

    #[test]
    fn test_move_left() {
        let (controller, mock) = attached(MockTimeline::with_window(0.0, 1.0));
        controller.move_left().unwrap();
        assert_eq!(mock.borrow().set_window_calls, vec![WindowUpdate::new(-0.2, 0.8)]);
    }

    #[test]
    fn test_move_right() {
        let (controller, mock) = attached(MockTimeline::with_window(0.0, 1.0));
        controller.move_right().unwrap();
        assert_eq!(mock.borrow().set_window_calls, vec![WindowUpdate::new(0.2, 1.2)]);
    }

    #[test]
    fn test_fit_delegates() {
        let (controller, mock) = attached(MockTimeline::default());
        controller.fit().unwrap();
        assert_eq!(mock.borrow().fit_calls, 1);
    }

    #[test]
    fn test_actions_fail_without_timeline() {
        let controller = ToolbarController::new();
        assert!(controller.zoom_in().is_err());
        assert!(controller.zoom_out().is_err());
        assert!(controller.move_left().is_err());
        assert!(controller.move_right().is_err());
        assert!(controller.fit().is_err());
        // Focus is a silent no-op
        controller.focus_earliest();
        controller.focus_latest();
    }

    #[test]
    fn test_actions_fail_after_timeline_dropped() {
        let (controller, mock) = attached(MockTimeline::default());
        drop(mock);
        assert!(!controller.has_timeline());
        assert!(controller.fit().is_err());
    }

    #[test]
    fn test_group_tasks_emits_each_toggle() {
        let mut controller = ToolbarController::new();
        assert_eq!(controller.group_tasks(), ToolbarEvent::GroupedChanged(true));
        assert!(controller.grouped());
        assert_eq!(controller.group_tasks(), ToolbarEvent::GroupedChanged(false));
        assert!(!controller.grouped());
    }

    #[test]
    fn test_toggle_rolling() {
        let mut controller = ToolbarController::new();
        controller.toggle_rolling();
        assert!(controller.rolling_mode());
        controller.toggle_rolling();
        assert!(!controller.rolling_mode());
        assert!(!controller.grouped());
    }

    #[test]
    fn test_focus_earliest_and_latest() {
        let mut mock = MockTimeline::default();
        mock.items = vec![
            Item::new(1, "late", Some(50_000.0), Some(60_000.0)),
            Item::new(2, "early", Some(20_000.0), Some(30_000.0)),
        ];
        let (controller, mock) = attached(mock);

        controller.focus_earliest();
        controller.focus_latest();
        assert_eq!(
            mock.borrow().set_window_calls,
            vec![
                WindowUpdate::new(15_000.0, 35_000.0),
                WindowUpdate::new(45_000.0, 65_000.0),
            ]
        );
    }

    #[test]
    fn test_focus_skips_item_without_end() {
        let mut mock = MockTimeline::default();
        mock.items = vec![Item::new(1, "running", Some(20_000.0), None)];
        let (controller, mock) = attached(mock);

        controller.focus_earliest();
        controller.focus_latest();
        assert!(mock.borrow().set_window_calls.is_empty());
    }

    #[test]
    fn test_focus_with_no_items() {
        let (controller, mock) = attached(MockTimeline::default());
        controller.focus_earliest();
        assert!(mock.borrow().set_window_calls.is_empty());
    }

    #[test]
    fn test_attach_subscribes_once() {
        let mock = Rc::new(RefCell::new(MockTimeline::default()));
        let shared: SharedTimeline = mock.clone();
        let mut controller = ToolbarController::new();

        controller.attach(&shared);
        controller.attach(&shared);
        assert_eq!(mock.borrow().handlers.len(), 1);
        assert_eq!(mock.borrow().handlers[0].0, TimelineEvent::CurrentTimeTick);
    }

    #[test]
    fn test_replacing_timeline_moves_subscription() {
        let first = Rc::new(RefCell::new(MockTimeline::with_window(0.0, 1000.0)));
        let second = Rc::new(RefCell::new(MockTimeline::with_window(0.0, 1000.0)));
        let first_shared: SharedTimeline = first.clone();
        let second_shared: SharedTimeline = second.clone();
        let mut controller = ToolbarController::with_clock(Rc::new(FixedClock(10_000.0)));
        controller.toggle_rolling();

        controller.attach(&first_shared);
        controller.attach(&second_shared);
        assert_eq!(second.borrow().handlers.len(), 1);

        first.borrow_mut().fire_tick();
        assert!(first.borrow().set_window_calls.is_empty());

        second.borrow_mut().fire_tick();
        assert_eq!(second.borrow().set_window_calls.len(), 1);
    }

    #[test]
    fn test_detached_timeline_ignores_ticks() {
        let (mut controller, mock) = attached(MockTimeline::with_window(0.0, 1000.0));
        controller.toggle_rolling();
        controller.detach();

        mock.borrow_mut().fire_tick();
        assert!(mock.borrow().set_window_calls.is_empty());
    }

    #[test]
    fn test_reattach_after_detach_subscribes_again() {
        let (mut controller, mock) = attached(MockTimeline::with_window(0.0, 1000.0));
        let shared: SharedTimeline = mock.clone();
        controller.toggle_rolling();
        controller.detach();
        controller.attach(&shared);
        assert_eq!(mock.borrow().handlers.len(), 2);

        // Only the handler of the current attachment reacts
        mock.borrow_mut().fire_tick();
        assert_eq!(mock.borrow().set_window_calls.len(), 1);
    }

    #[test]
    fn test_dropped_controller_ignores_ticks() {
        let (mut controller, mock) = attached(MockTimeline::with_window(0.0, 1000.0));
        controller.toggle_rolling();
        drop(controller);

        mock.borrow_mut().fire_tick();
        assert!(mock.borrow().set_window_calls.is_empty());
    }

    #[test]
    fn test_tick_is_noop_when_not_rolling() {
        let (_controller, mock) = attached(MockTimeline::with_window(0.0, 1000.0));
        mock.borrow_mut().fire_tick();
        assert!(mock.borrow().set_window_calls.is_empty());
    }

    #[test]
    fn test_rolling_tick_follows_clock() {
        let (mut controller, mock) = attached(MockTimeline::with_window(0.0, 1000.0));
        controller.toggle_rolling();

        mock.borrow_mut().fire_tick();
        // now = 10_000, interval = 1000, bias = +200
        assert_eq!(
            mock.borrow().set_window_calls,
            vec![WindowUpdate::new(9_200.0, 10_200.0).with_animation(false)]
        );
    }

    #[test]
    fn test_rolling_tick_with_system_clock() {
        let mock = Rc::new(RefCell::new(MockTimeline::with_window(0.0, 60_000.0)));
        let shared: SharedTimeline = mock.clone();
        let mut controller = ToolbarController::new();
        controller.attach(&shared);
        controller.toggle_rolling();

        let before = crate::timeline::now_ms();
        mock.borrow_mut().fire_tick();
        let after = crate::timeline::now_ms();

        let update = mock.borrow().set_window_calls[0];
        let bias = 60_000.0 * MOTION_RATIO;
        assert!(update.end >= before + bias && update.end <= after + bias);
        assert!((update.end - update.start - 60_000.0).abs() < 0.01);
        assert_eq!(update.animation, Some(false));
    }
}
