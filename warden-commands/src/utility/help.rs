use std::sync::Arc;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMANDS, CommandMeta};
use warden_core::Context;
use warden_utils::embed::DEFAULT_EMBED_COLOR;
use warden_utils::pagination::{ListPageRenderer, PageChrome, send_paginated};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 6;

/// Render the command catalog, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);
    let categories = known_categories();

    if let Some(wanted) = category.as_deref()
        && !categories.contains(&wanted)
    {
        let valid = categories
            .iter()
            .map(|category| display_category(category))
            .collect::<Vec<_>>()
            .join(", ");
        let out = format!(
            "Unknown category: {}\nValid categories: {}",
            display_category(wanted),
            valid
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let lines = help_lines(&sorted_commands(category.as_deref()));
    if lines.is_empty() {
        http.create_message(msg.channel_id)
            .content("No commands found.")
            .await?;
        return Ok(());
    }

    let chrome = PageChrome::new(
        help_title(category.as_deref()),
        DEFAULT_EMBED_COLOR,
        msg.author.id.get(),
    );

    send_paginated(
        Arc::clone(&ctx.http),
        &ctx.sessions,
        msg.channel_id,
        lines,
        HELP_COMMANDS_PER_PAGE,
        ctx.config.pagination_timeout,
        chrome,
        ListPageRenderer::new,
    )
    .await
}

fn known_categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category == wanted))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

/// One catalog line per command, each carrying its category label.
fn help_lines(commands: &[&CommandMeta]) -> Vec<String> {
    commands
        .iter()
        .map(|cmd| {
            format!(
                "**{}** `{}`\n{}",
                display_category(cmd.category),
                cmd.usage,
                cmd.desc
            )
        })
        .collect()
}

fn help_title(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("{} Commands", display_category(category)),
        None => "Available Commands".to_owned(),
    }
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_sorted_and_unique() {
        assert_eq!(known_categories(), ["cloudflare", "lookup", "utility"]);
    }

    #[test]
    fn filtering_by_category_keeps_order() {
        let names: Vec<_> = sorted_commands(Some("cloudflare"))
            .iter()
            .map(|cmd| cmd.name)
            .collect();
        assert_eq!(names, ["cloudflare whois", "cloudflare zones"]);
        assert_eq!(sorted_commands(None).len(), COMMANDS.len());
    }

    #[test]
    fn lines_and_titles_are_capitalized() {
        let lines = help_lines(&sorted_commands(Some("utility")));
        assert_eq!(
            lines[0],
            "**Utility** `!help [category]`\nLists out all available commands."
        );
        assert_eq!(help_title(Some("lookup")), "Lookup Commands");
        assert_eq!(help_title(None), "Available Commands");
    }
}
