use std::sync::Arc;

use tracing::warn;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::embeds::{
    fetch_failed_message, missing_credentials_message, permission_denied_message,
};
use warden_core::Context;
use warden_utils::embed::CLOUDFLARE_EMBED_COLOR;
use warden_utils::pagination::{
    DEFAULT_PAGE_SIZE, ListPageRenderer, PageChrome, send_paginated,
};
use warden_utils::permissions::is_owner_or_admin;

pub const META: CommandMeta = CommandMeta {
    name: "cloudflare zones",
    desc: "List the zones on the configured Cloudflare account.",
    category: "cloudflare",
    usage: "!cloudflare zones",
};

/// List account zones, ten per page.
///
/// Restricted to the bot owner and guild administrators.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let http = &ctx.http;

    if !is_owner_or_admin(http, &msg, ctx.config.owner_id).await? {
        http.create_message(msg.channel_id)
            .content(permission_denied_message())
            .await?;
        return Ok(());
    }

    let Some(client) = ctx.cloudflare() else {
        let out = missing_credentials_message(
            "Cloudflare",
            "`CLOUDFLARE_EMAIL` and `CLOUDFLARE_API_KEY`",
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let zones = match client.zones().await {
        Ok(zones) => zones,
        Err(source) => {
            warn!(?source, "Cloudflare zone listing failed");
            let out = fetch_failed_message("zones", &source);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    if zones.is_empty() {
        http.create_message(msg.channel_id)
            .content("No zones found.")
            .await?;
        return Ok(());
    }

    let names = zones.into_iter().map(|zone| zone.name).collect();
    let chrome = PageChrome::new(
        "Cloudflare Zones",
        CLOUDFLARE_EMBED_COLOR,
        msg.author.id.get(),
    );

    send_paginated(
        Arc::clone(&ctx.http),
        &ctx.sessions,
        msg.channel_id,
        names,
        DEFAULT_PAGE_SIZE,
        ctx.config.pagination_timeout,
        chrome,
        |chrome| ListPageRenderer::new(chrome).bulleted("- "),
    )
    .await
}
