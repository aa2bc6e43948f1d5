//! Input handling subsystem for UI interactions.
//!
//! Timeline input handling (pan, zoom, cursor tracking).

pub mod timeline_input_handler;
