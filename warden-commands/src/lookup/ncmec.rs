use std::sync::Arc;

use tracing::warn;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::embeds::usage_message;
use crate::lookup::embeds::missing_person_field;
use warden_apis::ApiError;
use warden_core::Context;
use warden_utils::embed::ALERT_EMBED_COLOR;
use warden_utils::pagination::{
    DEFAULT_PAGE_SIZE, FieldPageRenderer, PageChrome, send_paginated,
};

pub const META: CommandMeta = CommandMeta {
    name: "ncmec recent",
    desc: "Show recently reported missing children.",
    category: "lookup",
    usage: "!ncmec recent",
};

/// Page through the MissingKids public search feed.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    subcommand: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    if !subcommand.is_some_and(|sub| sub.eq_ignore_ascii_case("recent")) {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    }

    let persons = match ctx.missing_kids().recent().await {
        Ok(persons) => persons,
        Err(source) => {
            warn!(?source, "MissingKids lookup failed");
            let out = match source {
                ApiError::Decode(_) => "Failed to parse the response from the MissingKids API.",
                _ => "Failed to fetch data from the MissingKids API.",
            };
            http.create_message(msg.channel_id).content(out).await?;
            return Ok(());
        }
    };

    if persons.is_empty() {
        http.create_message(msg.channel_id)
            .content("No recently missing children found.")
            .await?;
        return Ok(());
    }

    let fields = persons.iter().map(missing_person_field).collect();
    let chrome = PageChrome::new(
        "Recently Missing Children",
        ALERT_EMBED_COLOR,
        msg.author.id.get(),
    );

    send_paginated(
        Arc::clone(&ctx.http),
        &ctx.sessions,
        msg.channel_id,
        fields,
        DEFAULT_PAGE_SIZE,
        ctx.config.pagination_timeout,
        chrome,
        FieldPageRenderer::new,
    )
    .await
}
