pub mod timeline;
pub mod item;
pub mod toolbar;
pub mod widget;
pub mod task_reader;

// Export timeline abstraction
pub use timeline::{
    TimelineHandle, TimelineEvent, TickHandler,
    TimeWindow, WindowUpdate, ZoomOptions,
    Timestamp, Clock, SystemClock, now_ms
};

// Export task model
pub use item::{Item, ItemId, earliest_item, latest_item};

// Export toolbar controller
pub use toolbar::{
    ToolbarController, ToolbarEvent, SharedTimeline,
    ZOOM_RATIO, MOTION_RATIO, FOCUS_MARGIN_MS
};

// Export concrete widget
pub use widget::{TimelineWidget, TimelineRow, UNGROUPED_LABEL};

// Export task readers
pub use task_reader::{TaskReader, JsonTaskReader, DemoTaskReader, parse_tasks};
