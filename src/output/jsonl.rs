#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! One JSON object per colleague, in list order.

use crate::types::Colleague;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Formats `(position, colleague)` rows as JSON Lines
    ///
    /// `local_time` is RFC 3339 in the colleague's zone, or `null` if the
    /// zone cannot be resolved.
    pub fn format(&self, rows: &[(usize, Colleague)], now: DateTime<Utc>) -> String {
        let mut output = String::new();

        for (position, colleague) in rows {
            let record = ColleagueRecord {
                position: *position,
                name: colleague.name(),
                city: colleague.city(),
                timezone: colleague.timezone(),
                local_time: colleague.local_time(now).map(|t| t.to_rfc3339()),
            };

            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct ColleagueRecord<'a> {
    position: usize,
    name: &'a str,
    city: &'a str,
    timezone: &'a str,
    local_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_format_empty() {
        let now = Utc.with_ymd_and_hms(2025, 12, 6, 12, 0, 0).unwrap();
        assert_eq!(JsonlFormatter::new().format(&[], now), "");
    }

    #[test]
    fn test_format_one_line_per_colleague() {
        let now = Utc.with_ymd_and_hms(2025, 12, 6, 12, 0, 0).unwrap();
        let rows = vec![
            (1, Colleague::new("Alice", "London", "Europe/London").unwrap()),
            (2, Colleague::new("Dai", "Tokyo", "Asia/Tokyo").unwrap()),
        ];

        let output = JsonlFormatter::new().format(&rows, now);
        let lines: Vec<Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["position"], 1);
        assert_eq!(lines[0]["name"], "Alice");
        assert_eq!(lines[0]["city"], "London");
        assert_eq!(lines[0]["local_time"], "2025-12-06T12:00:00+00:00");
        assert_eq!(lines[1]["timezone"], "Asia/Tokyo");
        assert_eq!(lines[1]["local_time"], "2025-12-06T21:00:00+09:00");
    }
}
