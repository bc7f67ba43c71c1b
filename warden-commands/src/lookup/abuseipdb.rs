use tracing::warn;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::embeds::{fetch_failed_message, missing_credentials_message, usage_message};
use crate::lookup::embeds::abuse_report_embed;
use warden_core::Context;
use warden_utils::parse::parse_ip_address;

pub const META: CommandMeta = CommandMeta {
    name: "abuseipdb check",
    desc: "Check an IP address against AbuseIPDB.",
    category: "lookup",
    usage: "!abuseipdb check <ip>",
};

/// Look up the reputation of an IP address.
///
/// Inputs:
/// - subcommand `check` followed by an IPv4 or IPv6 address.
///
/// Error behavior:
/// - invalid input returns usage text.
/// - a missing API key or failed fetch returns a short notice.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    subcommand: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let target = match subcommand {
        Some(sub) if sub.eq_ignore_ascii_case("check") => arg_tail.and_then(parse_ip_address),
        _ => None,
    };

    let Some(ip) = target else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let Some(client) = ctx.abuseipdb() else {
        let out = missing_credentials_message("AbuseIPDB", "`ABUSEIPDB_API_KEY`");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let report = match client.check(ip).await {
        Ok(report) => report,
        Err(source) => {
            warn!(?source, %ip, "AbuseIPDB lookup failed");
            let out = fetch_failed_message("data from AbuseIPDB", &source);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    let embed = abuse_report_embed(&ip.to_string(), &report)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
