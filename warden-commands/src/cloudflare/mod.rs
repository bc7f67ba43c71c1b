//! Cloudflare account helpers: zone listing and WHOIS intel.

pub mod whois;
pub mod whois_fields;
pub mod zones;

use twilight_model::gateway::payload::incoming::MessageCreate;

use warden_core::Context;

/// Dispatch `!cloudflare <subcommand>`.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    subcommand: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let subcommand = subcommand.map(str::to_ascii_lowercase);

    match subcommand.as_deref() {
        Some("zones") => zones::run(ctx, msg).await,
        Some("whois") => whois::run(ctx, msg, arg_tail).await,
        _ => {
            let out = format!(
                "Invalid Cloudflare command passed. Try `{}` or `{}`.",
                zones::META.usage,
                whois::META.usage
            );
            ctx.http.create_message(msg.channel_id).content(&out).await?;
            Ok(())
        }
    }
}
