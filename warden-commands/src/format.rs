//! Value formatting shared by the lookup renderers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse the timestamp shapes the upstream APIs emit into unix seconds.
///
/// Offset-less values are taken as UTC.
pub fn parse_unix_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|datetime| datetime.and_utc().timestamp())
}

/// Discord relative timestamp markup (`in 3 days`, `2 hours ago`).
pub fn relative_timestamp(raw: &str) -> Option<String> {
    parse_unix_timestamp(raw).map(|unix| format!("<t:{unix}:R>"))
}

/// Discord full date/time markup.
pub fn full_timestamp(raw: &str) -> Option<String> {
    parse_unix_timestamp(raw).map(|unix| format!("<t:{unix}:F>"))
}

/// Bold inline-code span. Backticks inside the value are dropped so the span stays intact.
pub fn code(value: &str) -> String {
    format!("**`{}`**", value.replace('`', ""))
}

/// Plain-text view of a scalar JSON value. Null and empty strings yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.trim().to_owned()).filter(|text| !text.is_empty()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Neutralise mentions in user-supplied text.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_upstream_timestamp_shapes() {
        assert_eq!(parse_unix_timestamp("2018-12-20T20:55:14+00:00"), Some(1_545_339_314));
        assert_eq!(parse_unix_timestamp("2018-12-20T20:55:14.000Z"), Some(1_545_339_314));
        assert_eq!(parse_unix_timestamp("2018-12-20T20:55:14"), Some(1_545_339_314));
        assert_eq!(parse_unix_timestamp("1995-08-14"), Some(808_358_400));
        assert_eq!(parse_unix_timestamp("yesterday"), None);
    }

    #[test]
    fn renders_discord_timestamps() {
        assert_eq!(
            relative_timestamp("2018-12-20T20:55:14+00:00").as_deref(),
            Some("<t:1545339314:R>")
        );
        assert_eq!(
            full_timestamp("2018-12-20T20:55:14").as_deref(),
            Some("<t:1545339314:F>")
        );
    }

    #[test]
    fn code_spans_survive_backticks() {
        assert_eq!(code("a`b"), "**`ab`**");
    }

    #[test]
    fn scalar_text_skips_blank_values() {
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!("  ")), None);
        assert_eq!(scalar_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(scalar_text(&json!(42)).as_deref(), Some("42"));
    }
}
