//! Utility modules for the timeline viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_timestamp, format_duration, get_current_memory_mb, format_memory_mb};
