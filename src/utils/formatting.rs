//! Text formatting utilities for the timeline viewer.
//!
//! This module provides helper functions for formatting values in a human-readable way.

use sysinfo::{System, RefreshKind, ProcessRefreshKind, Pid};
use tdg::Timestamp;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Formats a timestamp as UTC time of day.
///
/// Milliseconds are shown only when `with_millis` is set.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_timestamp(3_723_004.0, true), "01:02:03.004");
/// assert_eq!(format_timestamp(3_723_004.0, false), "01:02:03");
/// ```
pub fn format_timestamp(time: Timestamp, with_millis: bool) -> String {
    let of_day = time.rem_euclid(MS_PER_DAY).floor() as u64;
    let hours = of_day / MS_PER_HOUR as u64;
    let minutes = (of_day / MS_PER_MINUTE as u64) % 60;
    let seconds = (of_day / MS_PER_SECOND as u64) % 60;
    let millis = of_day % 1_000;

    if with_millis {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Formats a duration using the largest unit that keeps the number readable.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_duration(250.0), "250 ms");
/// assert_eq!(format_duration(90_000.0), "1.5 min");
/// ```
pub fn format_duration(duration_ms: f64) -> String {
    let abs = duration_ms.abs();
    if abs < MS_PER_SECOND {
        format!("{:.0} ms", duration_ms)
    } else if abs < MS_PER_MINUTE {
        format!("{:.1} s", duration_ms / MS_PER_SECOND)
    } else if abs < MS_PER_HOUR {
        format!("{:.1} min", duration_ms / MS_PER_MINUTE)
    } else if abs < MS_PER_DAY {
        format!("{:.1} h", duration_ms / MS_PER_HOUR)
    } else {
        format!("{:.1} d", duration_ms / MS_PER_DAY)
    }
}

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory())
    );
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    if let Some(process) = sys.process(Pid::from_u32(std::process::id())) {
        process.memory() as f64 / (1024.0 * 1024.0)
    } else {
        0.0
    }
}

/// Formats memory usage in MB as a human-readable string.
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}
