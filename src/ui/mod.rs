//! UI panel rendering subsystem
//!
//! - Header panel (file controls, toolbar)
//! - Toolbar (zoom, pan, fit, grouping, rolling, focus buttons)
//! - Timeline panel (task lanes with panning and zooming)
//! - Status bar (window and task summary)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (mouse interactions)

pub mod header;
pub mod toolbar;
pub mod timeline_panel;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
