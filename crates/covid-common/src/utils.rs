//! Shared utility functions.

use chrono::{DateTime, Utc};

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Builds the attribution line stamped onto every chart.
pub fn attribution_text(source: &str, generated_at: DateTime<Utc>) -> String {
    format!("Data: {source} | Generated {}", format_timestamp(generated_at))
}

/// Turns a chart identifier into a safe file stem.
pub fn sanitize_file_stem(input: &str) -> String {
    let stem: String = input
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "chart".to_string()
    } else {
        stem
    }
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2020, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(timestamp), "2020-03-15 12:00:00 UTC");
    }

    #[test]
    fn test_attribution_text() {
        let timestamp = Utc.with_ymd_and_hms(2020, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(
            attribution_text("JHU CSSE", timestamp),
            "Data: JHU CSSE | Generated 2020-03-15 12:00:00 UTC"
        );
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Confirmed Cases"), "confirmed_cases");
        assert_eq!(sanitize_file_stem("confirmed_vs_deaths"), "confirmed_vs_deaths");
        assert_eq!(sanitize_file_stem("../etc"), "___etc");
        assert_eq!(sanitize_file_stem("  "), "chart");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("United Kingdom", 10), "United ...");
        assert_eq!(truncate_string("Italy", 10), "Italy");
    }
}
