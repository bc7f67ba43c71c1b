//! Routing of pagination button presses into their live sessions.

use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    application::interaction::InteractionData, gateway::payload::incoming::InteractionCreate,
};

use super::registry::{DispatchOutcome, SessionRegistry};
use super::respond::{
    defer_component_update, respond_ephemeral_message, respond_expired, respond_invalid,
    respond_wrong_user,
};
use super::token::{PaginationToken, PaginationValidationError, TOKEN_PREFIX, validate_custom_id};

/// Whether a component custom ID belongs to a pagination session.
pub fn is_pagination_custom_id(custom_id: &str) -> bool {
    custom_id
        .strip_prefix(TOKEN_PREFIX)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// What to do with one pagination button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressRoute {
    /// The interaction user could not be determined.
    UnknownUser,
    Invalid,
    WrongUser,
    /// No live session renders into the pressed message.
    Expired,
    Dispatch(PaginationToken),
}

/// Decide how to answer a press of `custom_id` on message `message_id`.
pub async fn route_press(
    sessions: &SessionRegistry,
    custom_id: &str,
    actor_user_id: Option<u64>,
    message_id: Option<u64>,
) -> PressRoute {
    let Some(actor_user_id) = actor_user_id else {
        return PressRoute::UnknownUser;
    };

    let token = match validate_custom_id(custom_id, actor_user_id) {
        Ok(token) => token,
        Err(PaginationValidationError::WrongUser) => return PressRoute::WrongUser,
        Err(PaginationValidationError::Invalid) => return PressRoute::Invalid,
    };

    let Some(message_id) = message_id else {
        return PressRoute::Expired;
    };

    if !sessions.accepts(token.session_id, message_id).await {
        return PressRoute::Expired;
    }

    PressRoute::Dispatch(token)
}

/// Validate a pagination button press and forward it to its session.
///
/// Returns `Ok(false)` when the interaction is not a pagination button, and
/// `Ok(true)` once it has been acknowledged (forwarded or rejected).
pub async fn handle_pagination_interaction(
    http: &Client,
    sessions: &SessionRegistry,
    interaction: &InteractionCreate,
) -> anyhow::Result<bool> {
    let Some(InteractionData::MessageComponent(component_data)) = interaction.data.as_ref() else {
        return Ok(false);
    };

    if !is_pagination_custom_id(&component_data.custom_id) {
        return Ok(false);
    }

    let route = route_press(
        sessions,
        &component_data.custom_id,
        interaction.author_id().map(|id| id.get()),
        interaction.message.as_ref().map(|message| message.id.get()),
    )
    .await;

    let token = match route {
        PressRoute::Dispatch(token) => token,
        PressRoute::UnknownUser => {
            respond_ephemeral_message(http, interaction, "Unable to determine interaction user.")
                .await?;
            return Ok(true);
        }
        PressRoute::Invalid => {
            respond_invalid(http, interaction).await?;
            return Ok(true);
        }
        PressRoute::WrongUser => {
            respond_wrong_user(http, interaction).await?;
            return Ok(true);
        }
        PressRoute::Expired => {
            respond_expired(http, interaction).await?;
            return Ok(true);
        }
    };

    defer_component_update(http, interaction).await?;

    match sessions.dispatch(token.session_id, token.action).await {
        DispatchOutcome::Delivered => {}
        outcome => debug!(
            session_id = token.session_id,
            ?outcome,
            "navigation event not delivered"
        ),
    }

    Ok(true)
}
