//! Human-readable byte and duration formatting helpers.

const BYTE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count with 1024-based units ("512 B", "1.50 KB", "12.3 MB").
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn fmt_bytes(bytes: i64) -> String {
    const UNIT: i64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < BYTE_UNITS.len() - 1 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let value = bytes as f64 / div as f64;
    let unit = BYTE_UNITS.get(exp).copied().unwrap_or("EB");
    if value >= 10.0 {
        format!("{value:.1} {unit}")
    } else {
        format!("{value:.2} {unit}")
    }
}

/// Format seconds as "1d 2h 3m", dropping zero components ("2h", "45m", "0m").
pub fn fmt_uptime(secs: i64) -> String {
    let secs = secs.max(0);
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(v, _)| *v > 0)
        .map(|(v, unit)| format!("{v}{unit}"))
        .collect();

    if parts.is_empty() {
        "0m".into()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_small_values() {
        assert_eq!(fmt_bytes(0), "0 B");
        assert_eq!(fmt_bytes(1023), "1023 B");
    }

    #[test]
    fn bytes_precision_switches_at_ten() {
        assert_eq!(fmt_bytes(1536), "1.50 KB");
        assert_eq!(fmt_bytes(10 * 1024), "10.0 KB");
        assert_eq!(fmt_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(fmt_bytes(123 * 1024 * 1024), "123.0 MB");
    }

    #[test]
    fn uptime_components() {
        assert_eq!(fmt_uptime(0), "0m");
        assert_eq!(fmt_uptime(59), "0m");
        assert_eq!(fmt_uptime(1800), "30m");
        assert_eq!(fmt_uptime(3600), "1h");
        assert_eq!(fmt_uptime(5400), "1h 30m");
        assert_eq!(fmt_uptime(86_400), "1d");
        assert_eq!(fmt_uptime(86_400 + 180), "1d 3m");
        assert_eq!(fmt_uptime(2 * 86_400 + 7_200 + 60), "2d 2h 1m");
    }
}
