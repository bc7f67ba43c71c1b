use std::sync::Arc;

use tracing::warn;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::cloudflare::whois_fields::{whois_fields, whois_links};
use crate::embeds::{fetch_failed_message, missing_credentials_message, usage_message};
use warden_apis::ApiError;
use warden_core::Context;
use warden_utils::embed::CLOUDFLARE_EMBED_COLOR;
use warden_utils::pagination::{
    DEFAULT_PAGE_SIZE, FieldPageRenderer, PageChrome, send_paginated,
};
use warden_utils::parse::parse_domain;

pub const META: CommandMeta = CommandMeta {
    name: "cloudflare whois",
    desc: "Query WHOIS information for a domain.",
    category: "cloudflare",
    usage: "!cloudflare whois <domain>",
};

const REQUIRED_VARIABLES: &str = "`CLOUDFLARE_EMAIL`, `CLOUDFLARE_API_KEY`, \
    `CLOUDFLARE_BEARER_TOKEN` and `CLOUDFLARE_ACCOUNT_ID`";

/// Show WHOIS intel for a domain, ten fields per page.
///
/// Contact referral URLs are attached as link buttons on every page.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(domain) = arg_tail
        .and_then(|raw| raw.split_whitespace().next())
        .and_then(parse_domain)
    else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let Some(client) = ctx.cloudflare() else {
        let out = missing_credentials_message("Cloudflare", REQUIRED_VARIABLES);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let record = match client.whois(&domain).await {
        Ok(record) => record,
        Err(ApiError::MissingCredentials(_)) => {
            let out = missing_credentials_message("Cloudflare", REQUIRED_VARIABLES);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
        Err(source) => {
            warn!(?source, domain, "Cloudflare WHOIS lookup failed");
            let out = fetch_failed_message("WHOIS information", &source);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    let fields = whois_fields(&record);
    if fields.is_empty() {
        let out = format!("No WHOIS information found for `{domain}`.");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let chrome = PageChrome::new(
        format!("WHOIS Information for {domain}"),
        CLOUDFLARE_EMBED_COLOR,
        msg.author.id.get(),
    )
    .with_links(whois_links(&record));

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
