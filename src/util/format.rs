//! Display formatting for scores and durations

use std::time::Duration;

/// Format a percentage with one decimal place
///
/// # Examples
/// ```
/// use trivium::util::format::format_percentage;
///
/// assert_eq!(format_percentage(100.0), "100.0%");
/// assert_eq!(format_percentage(200.0 / 3.0), "66.7%");
/// ```
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Results headline, e.g. "You scored 2 out of 3 (66.7%)"
pub fn score_line(score: usize, total: usize) -> String {
    format!(
        "You scored {} out of {} ({})",
        score,
        total,
        format_percentage(crate::quiz::percentage(score, total))
    )
}

/// Format a quiz duration in whole seconds
pub fn format_elapsed(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", total_secs)
    }
}

/// Same as [`format_elapsed`] for a chrono duration; negative spans read as 0s
pub fn format_chrono_elapsed(duration: chrono::Duration) -> String {
    format_elapsed(duration.to_std().unwrap_or_default())
}
