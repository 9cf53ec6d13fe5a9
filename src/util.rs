/// Chart border title, e.g. "CPU Usage: 42.17%".
pub fn format_usage_title(percent: f64) -> String {
    format!("CPU Usage: {:5.2}%", percent)
}

/// Format a sample count compactly (e.g., "1.2k").
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_title_is_padded() {
        assert_eq!(format_usage_title(3.14159), "CPU Usage:  3.14%");
        assert_eq!(format_usage_title(250.0), "CPU Usage: 250.00%");
    }

    #[test]
    fn counts() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_250), "1.2k");
        assert_eq!(format_count(3_400_000), "3.4M");
    }
}
