//! Rendering subsystem for drawing the timeline
//!
//! - Timeline row rendering (task bars, dependency arrows)
//! - Time axis rendering (time labels and tick marks)
//! - Timeline overlays (current-time marker, cursor line)

pub mod timeline_renderer;
pub mod time_axis_renderer;
pub mod timeline_overlays;
