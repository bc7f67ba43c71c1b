//! Declarative layout of the WHOIS embed: which response keys are shown, under
//! which label, and how their values are formatted.

use serde_json::Value;
use twilight_model::channel::message::embed::EmbedField;

use warden_apis::cloudflare::WhoisRecord;
use warden_utils::embed::embed_field;
use warden_utils::pagination::LinkButton;

use crate::format::{code, full_timestamp, scalar_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldFormat {
    /// Bold code span; arrays are comma-joined.
    Code,
    /// Discord full timestamp, falling back to a code span if unparsable.
    Timestamp,
    /// One bulleted code span per array element.
    List,
}

#[derive(Clone, Copy)]
enum Entry {
    Field(&'static str, &'static str, FieldFormat),
    /// Expands to every `CONTACT_ATTRIBUTES` key for the given role prefix.
    Contact(&'static str, &'static str),
}

const CONTACT_ATTRIBUTES: &[(&str, &str)] = &[
    ("city", "City"),
    ("country", "Country"),
    ("email", "Email"),
    ("fax", "Fax"),
    ("fax_ext", "Fax Ext"),
    ("id", "ID"),
    ("name", "Name"),
    ("org", "Org"),
    ("phone", "Phone"),
    ("phone_ext", "Phone Ext"),
    ("postal_code", "Postal Code"),
    ("province", "Province"),
    ("street", "Street"),
];

const LAYOUT: &[Entry] = &[
    Entry::Contact("administrative", "Administrative"),
    Entry::Contact("billing", "Billing"),
    Entry::Field("created_date", "Created Date", FieldFormat::Timestamp),
    Entry::Field("dnssec", "DNSSEC", FieldFormat::Code),
    Entry::Field("domain", "Domain", FieldFormat::Code),
    Entry::Field("expiration_date", "Expiration Date", FieldFormat::Timestamp),
    Entry::Field("extension", "Extension", FieldFormat::Code),
    Entry::Field("found", "Found", FieldFormat::Code),
    Entry::Field("id", "ID", FieldFormat::Code),
    Entry::Field("nameservers", "Nameservers", FieldFormat::List),
    Entry::Field("registrant", "Registrant", FieldFormat::Code),
    Entry::Contact("registrant", "Registrant"),
    Entry::Field("registrar", "Registrar", FieldFormat::Code),
    Entry::Contact("registrar", "Registrar"),
    Entry::Field("status", "Status", FieldFormat::Code),
    Entry::Contact("technical", "Technical"),
    Entry::Field("updated_date", "Updated Date", FieldFormat::Timestamp),
    Entry::Field("whois_server", "WHOIS Server", FieldFormat::Code),
];

/// Roles whose `<role>_referral_url` becomes a link button.
const REFERRAL_ROLES: &[(&str, &str)] = &[
    ("administrative", "Administrative contact"),
    ("billing", "Billing contact"),
    ("registrant", "Registrant contact"),
    ("registrar", "Registrar contact"),
    ("technical", "Technical contact"),
];

/// Render every known, non-empty key of `record` as an embed field, in layout order.
pub fn whois_fields(record: &WhoisRecord) -> Vec<EmbedField> {
    let mut fields = Vec::new();

    for entry in LAYOUT {
        match *entry {
            Entry::Field(key, label, format) => {
                push_field(&mut fields, record, key, label.to_owned(), format);
            }
            Entry::Contact(role, role_label) => {
                for (attribute, attribute_label) in CONTACT_ATTRIBUTES {
                    push_field(
                        &mut fields,
                        record,
                        &format!("{role}_{attribute}"),
                        format!("{role_label} {attribute_label}"),
                        FieldFormat::Code,
                    );
                }
            }
        }
    }

    fields
}

/// Link buttons for the contact referral URLs present in `record`.
pub fn whois_links(record: &WhoisRecord) -> Vec<LinkButton> {
    REFERRAL_ROLES
        .iter()
        .filter_map(|(role, label)| {
            let url = record.get(&format!("{role}_referral_url"))?.as_str()?.trim();
            let is_web_url = url.starts_with("https://") || url.starts_with("http://");
            is_web_url.then(|| LinkButton::new(*label, url))
        })
        .collect()
}

fn push_field(
    fields: &mut Vec<EmbedField>,
    record: &WhoisRecord,
    key: &str,
    label: String,
    format: FieldFormat,
) {
    if let Some(value) = record.get(key).and_then(|value| format_value(value, format)) {
        fields.push(embed_field(label, value, false));
    }
}

fn format_value(value: &Value, format: FieldFormat) -> Option<String> {
    match (format, value) {
        (FieldFormat::List, Value::Array(items)) => {
            let lines: Vec<String> = items
                .iter()
                .filter_map(scalar_text)
                .map(|item| format!("- {}", code(&item)))
                .collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        (FieldFormat::Timestamp, Value::String(raw)) => full_timestamp(raw)
            .map(|stamp| format!("**{stamp}**"))
            .or_else(|| scalar_text(value).map(|text| code(&text))),
        (_, Value::Array(items)) => {
            let joined: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!joined.is_empty()).then(|| code(&joined.join(", ")))
        }
        _ => scalar_text(value).map(|text| code(&text)),
    }
}
