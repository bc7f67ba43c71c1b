use twilight_http::Client;
use twilight_model::{gateway::payload::incoming::MessageCreate, guild::Permissions};

/// Resolve the invoking author's effective guild permissions for a message command.
///
/// Returns `Ok(None)` when the message is not from a guild context.
pub async fn resolve_message_author_permissions(
    http: &Client,
    msg: &MessageCreate,
) -> anyhow::Result<Option<Permissions>> {
    if let Some(perms) = msg.member.as_ref().and_then(|m| m.permissions) {
        return Ok(Some(perms));
    }

    let Some(guild_id) = msg.guild_id else {
        return Ok(None);
    };

    let member = http
        .guild_member(guild_id, msg.author.id)
        .await?
        .model()
        .await?;
    let roles = http.roles(guild_id).await?.model().await?;

    let resolved = roles
        .into_iter()
        .filter(|role| role.id == guild_id.cast() || member.roles.contains(&role.id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions);

    Ok(Some(resolved))
}

/// Whether the author is the configured bot owner or a guild administrator.
///
/// The owner check needs no HTTP round-trip and also works in DMs.
pub async fn is_owner_or_admin(
    http: &Client,
    msg: &MessageCreate,
    owner_id: Option<u64>,
) -> anyhow::Result<bool> {
    if owner_id.is_some_and(|owner| owner == msg.author.id.get()) {
        return Ok(true);
    }

    let Some(perms) = resolve_message_author_permissions(http, msg).await? else {
        return Ok(false);
    };

    Ok(perms.contains(Permissions::ADMINISTRATOR))
}
