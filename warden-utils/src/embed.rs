use twilight_model::channel::message::embed::{Embed, EmbedField};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
/// Embed color for lookups that surface abuse or missing-person data.
pub const ALERT_EMBED_COLOR: u32 = 0xE7_4C_3C;
/// Embed color for Cloudflare results.
pub const CLOUDFLARE_EMBED_COLOR: u32 = 0x34_98_DB;

const FIELD_NAME_LIMIT: usize = 256;
const FIELD_VALUE_LIMIT: usize = 1024;
const DESCRIPTION_LIMIT: usize = 4096;
/// Combined length of title, description, fields and footer.
const EMBED_TOTAL_LIMIT: usize = 6000;

/// Shorten `value` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }

    let mut shortened: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

/// Build an embed field that always passes Discord's length checks.
pub fn embed_field(name: impl AsRef<str>, value: impl AsRef<str>, inline: bool) -> EmbedField {
    let name = name.as_ref().trim();
    let value = value.as_ref().trim();

    EmbedField {
        inline,
        name: non_empty(truncate_chars(name, FIELD_NAME_LIMIT)),
        value: non_empty(truncate_chars(value, FIELD_VALUE_LIMIT)),
    }
}

fn non_empty(value: String) -> String {
    if value.is_empty() {
        "\u{200B}".to_owned()
    } else {
        value
    }
}

/// Shrink `fields` so their names and values fit in `budget` characters.
///
/// Fields already within budget are left untouched; otherwise every field gets
/// an equal share, and names longer than half a share are cut first.
fn fit_fields(fields: &[EmbedField], budget: usize) -> Vec<EmbedField> {
    let length = |field: &EmbedField| field.name.chars().count() + field.value.chars().count();

    if fields.iter().map(length).sum::<usize>() <= budget {
        return fields.to_vec();
    }

    let share = (budget / fields.len().max(1)).max(2);
    fields
        .iter()
        .map(|field| {
            let name = truncate_chars(&field.name, share / 2);
            let value_limit = share - name.chars().count();
            EmbedField {
                inline: field.inline,
                value: truncate_chars(&field.value, value_limit),
                name,
            }
        })
        .collect()
}

/// Footer text for page `page` (1-based) of `total_pages`.
pub fn page_footer(page: usize, total_pages: usize) -> Option<String> {
    (total_pages > 1).then(|| format!("Page {}/{}", page.max(1), total_pages))
}

/// Build a standard paginated embed with consistent styling.
///
/// `description` and `fields` may both be present; the page footer is only
/// added when there is more than one page.
pub fn build_paginated_embed(
    title: &str,
    color: u32,
    description: Option<&str>,
    fields: &[EmbedField],
    page: usize,
    total_pages: usize,
) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new().title(title).color(color);
    let mut used = title.chars().count();

    if let Some(description) = description.filter(|text| !text.is_empty()) {
        let description = truncate_chars(description, DESCRIPTION_LIMIT);
        used += description.chars().count();
        builder = builder.description(description);
    }

    if let Some(footer) = page_footer(page, total_pages) {
        used += footer.chars().count();
        builder = builder.footer(EmbedFooterBuilder::new(footer).build());
    }

    for field in fit_fields(fields, EMBED_TOTAL_LIMIT.saturating_sub(used)) {
        builder = builder.field(field);
    }

    Ok(builder.validate()?.build())
}
