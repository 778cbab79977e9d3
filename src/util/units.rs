//! Units formatting
//!
//! Human-readable rendering of byte counts and durations for the shell.

use std::time::Duration;

/// Format bytes into human-readable size with binary units
///
/// # Examples
/// ```
/// use rigmark::util::units::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(104_857_600), "100.0 MiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}

/// Format a duration as seconds with millisecond precision, switching to
/// minutes past the one-minute mark
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use rigmark::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(2340)), "2.34s");
/// assert_eq!(format_duration(Duration::from_secs(95)), "1m 35s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs >= 60 {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
