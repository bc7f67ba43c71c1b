use twilight_model::channel::message::embed::{Embed, EmbedField};
use twilight_util::builder::embed::EmbedBuilder;

use warden_apis::{abuseipdb::IpReport, ncmec::MissingPerson};
use warden_utils::embed::{ALERT_EMBED_COLOR, embed_field, truncate_chars};

use crate::format::{relative_timestamp, sanitize_mentions};

/// Individual reports listed under an AbuseIPDB summary.
const MAX_LISTED_REPORTS: usize = 5;
const REPORT_COMMENT_LIMIT: usize = 300;

fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or("Unknown")
}

/// Summary embed for an AbuseIPDB `/check` result.
pub fn abuse_report_embed(queried: &str, report: &IpReport) -> anyhow::Result<Embed> {
    let country = match (report.country_name.as_deref(), report.country_code.as_deref()) {
        (Some(name), Some(code)) => format!("{name} ({code})"),
        (None, Some(code)) => code.to_owned(),
        (name, None) => or_unknown(name).to_owned(),
    };

    let last_reported = report
        .last_reported_at
        .as_deref()
        .and_then(relative_timestamp)
        .map_or_else(|| "Never".to_owned(), |stamp| format!("**{stamp}**"));

    let mut builder = EmbedBuilder::new()
        .title(format!("AbuseIPDB report for {queried}"))
        .color(ALERT_EMBED_COLOR)
        .field(embed_field("IP address", &report.ip_address, true))
        .field(embed_field(
            "Abuse confidence score",
            format!("{}%", report.abuse_confidence_score),
            true,
        ))
        .field(embed_field("Country", country, true))
        .field(embed_field("ISP", or_unknown(report.isp.as_deref()), true))
        .field(embed_field("Domain", or_unknown(report.domain.as_deref()), true))
        .field(embed_field(
            "Total reports",
            report.total_reports.to_string(),
            true,
        ))
        .field(embed_field("Last reported", last_reported, true));

    for (index, entry) in report.reports.iter().take(MAX_LISTED_REPORTS).enumerate() {
        let when = relative_timestamp(&entry.reported_at)
            .map_or_else(|| entry.reported_at.clone(), |stamp| format!("**{stamp}**"));
        let comment = entry
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
            .map(|comment| truncate_chars(&sanitize_mentions(comment), REPORT_COMMENT_LIMIT));

        let value = match comment {
            Some(comment) => format!("{when}, \"{comment}\""),
            None => when,
        };

        builder = builder.field(embed_field(format!("Report {}", index + 1), value, false));
    }

    Ok(builder.validate()?.build())
}

/// One embed field describing a missing child.
pub fn missing_person_field(person: &MissingPerson) -> EmbedField {
    let name = format!(
        "{} {}",
        or_unknown(person.first_name.as_deref()),
        or_unknown(person.last_name.as_deref())
    );

    let value = format!(
        "Age: {}\nMissing Since: {}\nLocation: {}, {}\nCase Number: {}",
        or_unknown(person.age.as_deref()),
        or_unknown(person.missing_date.as_deref()),
        or_unknown(person.missing_city.as_deref()),
        or_unknown(person.missing_state.as_deref()),
        or_unknown(person.case_number.as_deref()),
    );

    embed_field(name, value, false)
}

#[cfg(test)]
mod tests {
    use warden_apis::abuseipdb::parse_check;

    use super::*;

    fn sample_report(reports: usize) -> IpReport {
        let entries: Vec<String> = (0..reports)
            .map(|index| {
                format!(
                    r#"{{"reportedAt": "2023-05-0{}T10:00:00+00:00", "comment": "ssh brute force @everyone"}}"#,
                    index % 9 + 1
                )
            })
            .collect();

        let body = format!(
            r#"{{"data": {{"ipAddress": "203.0.113.7", "abuseConfidenceScore": 87,
                "countryCode": "NL", "countryName": "Netherlands", "isp": null,
                "domain": "example.net", "totalReports": {reports},
                "lastReportedAt": "2023-05-01T10:00:00+00:00", "reports": [{}]}}}}"#,
            entries.join(",")
        );

        parse_check(&body).unwrap()
    }

    #[test]
    fn summary_fields_and_report_cap() {
        let embed = abuse_report_embed("203.0.113.7", &sample_report(8)).unwrap();

        assert_eq!(embed.title.as_deref(), Some("AbuseIPDB report for 203.0.113.7"));
        assert_eq!(embed.fields.len(), 7 + MAX_LISTED_REPORTS);
        assert_eq!(embed.fields[2].value, "Netherlands (NL)");
        assert_eq!(embed.fields[3].value, "Unknown");
        assert_eq!(embed.fields[6].value, "**<t:1682935200:R>**");
        assert_eq!(embed.fields[7].name, "Report 1");
        assert!(embed.fields[7].value.contains("@\u{200B}everyone"));
        assert!(!embed.fields[7].inline);
    }

    #[test]
    fn never_reported_address() {
        let mut report = sample_report(0);
        report.last_reported_at = None;

        let embed = abuse_report_embed("203.0.113.7", &report).unwrap();
        assert_eq!(embed.fields.len(), 7);
        assert_eq!(embed.fields[6].value, "Never");
    }

    #[test]
    fn missing_person_defaults_to_unknown() {
        let person = MissingPerson {
            first_name: Some("Jane".to_owned()),
            missing_city: Some("Springfield".to_owned()),
            ..MissingPerson::default()
        };

        let field = missing_person_field(&person);
        assert_eq!(field.name, "Jane Unknown");
        assert_eq!(
            field.value,
            "Age: Unknown\nMissing Since: Unknown\nLocation: Springfield, Unknown\nCase Number: Unknown"
        );
    }
}
