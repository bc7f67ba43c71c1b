use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::embeds::usage_message;
use crate::{COMMANDS, CommandMeta};
use warden_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "!usage <command>",
};

/// Show usage for a specific command.
///
/// Inputs:
/// - command name, optionally with a subcommand: `!usage cloudflare whois`.
///
/// Error behavior:
/// - missing argument returns this command's usage.
/// - unknown command returns a short not-found message.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(raw_name) = arg1 else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let lookup = match arg_tail {
        Some(tail) => format!("{} {}", raw_name.trim_start_matches('!'), tail.trim()),
        None => raw_name.trim_start_matches('!').to_owned(),
    }
    .to_ascii_lowercase();

    let matches = matching_commands(&lookup);
    if matches.is_empty() {
        let out = format!("Unknown command: `{lookup}`");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let out = matches
        .iter()
        .map(|command| usage_message(command.usage))
        .collect::<Vec<_>>()
        .join("\n");
    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

/// Exact match first; otherwise every subcommand of `lookup`.
fn matching_commands(lookup: &str) -> Vec<&'static CommandMeta> {
    if let Some(command) = COMMANDS.iter().find(|command| command.name == lookup) {
        return vec![command];
    }

    let prefix = format!("{lookup} ");
    COMMANDS
        .iter()
        .filter(|command| command.name.starts_with(&prefix))
        .collect()
}
