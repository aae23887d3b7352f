//! Human-readable byte sizes and compression ratios for batch reports

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with 1024-based units, up to two decimals
///
/// # Examples
///
/// ```
/// use ewp_common::human_bytes::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Bytes");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Trim trailing zeros the way a parsed float prints
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Size reduction of `output` relative to `input`, in percent
///
/// Negative when the output grew; 0 when the input is empty.
pub fn savings_percent(input: u64, output: u64) -> f64 {
    if input == 0 {
        return 0.0;
    }
    (1.0 - output as f64 / input as f64) * 100.0
}

/// Savings formatted to one decimal with a `%` suffix (e.g. `"72.4%"`)
pub fn format_savings(input: u64, output: u64) -> String {
    format!("{:.1}%", savings_percent(input, output))
}
