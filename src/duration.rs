/// Format a millisecond count as `1h 23m 45s`, `1m 1s` or `12s`.
///
/// Negative input is treated as zero. Only the largest non-zero unit decides
/// the layout; smaller units are always shown below it, even when zero.
pub fn format_duration(milliseconds: i64) -> String {
    let milliseconds = milliseconds.max(0);
    let seconds = milliseconds / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
