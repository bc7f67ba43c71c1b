pub mod cloudflare;
pub mod embeds;
pub mod format;
pub mod lookup;
pub mod utility;

use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};

use warden_core::Context;
use warden_utils::COMMAND_PREFIX;
use warden_utils::pagination::{handle_pagination_interaction, is_pagination_custom_id};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteractionRoute {
    PaginationButtons,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(fn(&str) -> bool, InteractionRoute); 1] =
        [(is_pagination_custom_id, InteractionRoute::PaginationButtons)];

    ROUTES
        .into_iter()
        .find_map(|(matches, route)| matches(custom_id).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    lookup::abuseipdb::META,
    lookup::ncmec::META,
    cloudflare::zones::META,
    cloudflare::whois::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail): (Option<String>, Option<String>) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args
                .next()
                .filter(|arg| !arg.is_empty())
                .map(ToOwned::to_owned);
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty())
                .map(ToOwned::to_owned);

            (first, tail)
        }
        None => (None, None),
    };

    let arg1 = arg1.as_deref();
    let arg_tail = arg_tail.as_deref();

    match cmd.as_str() {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "usage" => utility::usage::run(ctx.clone(), msg, arg1, arg_tail).await?,

        "abuseipdb" => lookup::abuseipdb::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "ncmec" => lookup::ncmec::run(ctx.clone(), msg, arg1).await?,
        "cloudflare" => cloudflare::run(ctx.clone(), msg, arg1, arg_tail).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let custom_id = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => data.custom_id.clone(),
        _ => return Ok(()),
    };

    let Some(route) = route_interaction(&custom_id) else {
        return Ok(());
    };

    match route {
        InteractionRoute::PaginationButtons => {
            let _handled =
                handle_pagination_interaction(&ctx.http, &ctx.sessions, &interaction).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_buttons_are_routed() {
        assert_eq!(
            route_interaction("pg:4:next:99"),
            Some(InteractionRoute::PaginationButtons)
        );
        assert_eq!(route_interaction("pgm:help"), None);
        assert_eq!(route_interaction("terminate:1"), None);
    }

    #[test]
    fn command_names_are_unique() {
        let mut names: Vec<_> = COMMANDS.iter().map(|cmd| cmd.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }
}
