//! Time label formatting

/// Format a time in seconds as `[hh:]mm:ss[.fff]`
///
/// Hours are only shown when non-zero. The fractional part is truncated
/// (not rounded) to `precision` digits, so a label never shows a time later
/// than the boundary it belongs to.
///
/// Negative values get a leading `-`. Non-finite values render as `--:--`.
///
/// ```
/// use wavemark_core::format_time;
///
/// assert_eq!(format_time(75.5, 2), "01:15.50");
/// assert_eq!(format_time(3725.0, 0), "01:02:05");
/// ```
pub fn format_time(seconds: f64, precision: u32) -> String {
    if !seconds.is_finite() {
        return "--:--".to_string();
    }

    let sign = if seconds < 0.0 { "-" } else { "" };
    let seconds = seconds.abs();

    let precision = precision.min(9);
    let scale = 10u64.pow(precision);

    // Fixed-point units first so 4.35 doesn't floor to 4.34
    let units = (seconds * scale as f64 + 1e-6).floor() as u64;
    let whole = units / scale;
    let fraction = units % scale;

    let minutes = whole / 60;
    let hours = minutes / 60;

    let mut result = String::from(sign);
    if hours > 0 {
        result.push_str(&format!("{:02}:", hours));
    }
    result.push_str(&format!("{:02}:{:02}", minutes % 60, whole % 60));

    if precision > 0 {
        result.push_str(&format!(".{:0width$}", fraction, width = precision as usize));
    }

    result
}
