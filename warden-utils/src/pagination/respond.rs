//! Discord-side plumbing for pagination: interaction acknowledgements, the
//! message sink, and the entry point that starts a session.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::{debug, error};
use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::navigation::ViewState;
use super::page::build_pages;
use super::registry::{SessionHandle, SessionRegistry};
use super::session::{Renderer, SessionSink, Teardown, run_session};
use super::view::{PageChrome, PageMessage};

/// Generic message shown when a pagination interaction belongs to another user.
pub const PAGINATION_WRONG_USER_MESSAGE: &str = "This pagination session belongs to another user.";
/// Generic message shown when a pagination interaction has expired.
pub const PAGINATION_EXPIRED_MESSAGE: &str =
    "This pagination session expired. Run the command again.";
/// Generic message shown when pagination interaction payload is invalid.
pub const PAGINATION_INVALID_MESSAGE: &str = "Invalid pagination interaction.";

/// Respond to a component interaction with an ephemeral message.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond with the standard wrong-owner pagination message.
pub async fn respond_wrong_user(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_WRONG_USER_MESSAGE).await
}

/// Respond with the standard expired pagination message.
pub async fn respond_expired(http: &Client, interaction: &InteractionCreate) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_EXPIRED_MESSAGE).await
}

/// Respond with the standard invalid pagination message.
pub async fn respond_invalid(http: &Client, interaction: &InteractionCreate) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_INVALID_MESSAGE).await
}

/// Acknowledge a button press; the session task edits the message afterwards.
pub async fn defer_component_update(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// [`SessionSink`] that posts the first page and edits the same message afterwards.
pub struct DiscordSink {
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Option<Id<MessageMarker>>,
    retained: Vec<Component>,
    /// Session whose registry entry learns the posted message ID.
    session: Option<(SessionRegistry, u64)>,
}

impl DiscordSink {
    /// `retained` components (link buttons) survive a timeout teardown.
    pub fn new(http: Arc<Client>, channel_id: Id<ChannelMarker>, retained: Vec<Component>) -> Self {
        Self {
            http,
            channel_id,
            message_id: None,
            retained,
            session: None,
        }
    }

    /// Bind the posted message to `session_id` so presses on other messages are rejected.
    pub fn for_session(mut self, sessions: &SessionRegistry, session_id: Option<u64>) -> Self {
        self.session = session_id.map(|id| (sessions.clone(), id));
        self
    }
}

#[async_trait]
impl SessionSink<PageMessage> for DiscordSink {
    async fn show(&mut self, message: PageMessage) -> anyhow::Result<()> {
        let embeds = [message.embed];

        match self.message_id {
            None => {
                let created = self
                    .http
                    .create_message(self.channel_id)
                    .embeds(&embeds)
                    .components(&message.components)
                    .await?
                    .model()
                    .await?;
                self.message_id = Some(created.id);

                if let Some((sessions, session_id)) = &self.session {
                    sessions.bind_message(*session_id, created.id.get()).await;
                }
            }
            Some(message_id) => {
                self.http
                    .update_message(self.channel_id, message_id)
                    .embeds(Some(embeds.as_slice()))
                    .components(Some(message.components.as_slice()))
                    .await?;
            }
        }

        Ok(())
    }

    async fn teardown(&mut self, reason: Teardown) -> anyhow::Result<()> {
        let Some(message_id) = self.message_id else {
            return Ok(());
        };

        match reason {
            Teardown::Closed => {
                self.http
                    .delete_message(self.channel_id, message_id)
                    .await?;
            }
            Teardown::TimedOut => {
                self.http
                    .update_message(self.channel_id, message_id)
                    .components(Some(self.retained.as_slice()))
                    .await?;
            }
        }

        Ok(())
    }
}

/// Paginate `items` into a new message in `channel_id`.
///
/// Single-page results are sent once without navigation buttons and no session
/// is opened. Otherwise a session task is spawned that owns the view until the
/// owner closes it or it sits idle for `idle_timeout`.
// Clippy note: the arguments are the full description of one paginated reply.
#[allow(clippy::too_many_arguments)]
pub async fn send_paginated<T, R, F>(
    http: Arc<Client>,
    sessions: &SessionRegistry,
    channel_id: Id<ChannelMarker>,
    items: Vec<T>,
    page_size: usize,
    idle_timeout: Duration,
    chrome: PageChrome,
    make_renderer: F,
) -> anyhow::Result<()>
where
    T: Send + 'static,
    R: Renderer<T, Message = PageMessage> + 'static,
    F: FnOnce(PageChrome) -> R,
{
    let view = ViewState::start(build_pages(items, page_size)?)?;
    let retained = chrome.retained_components();

    present(
        sessions,
        view,
        idle_timeout,
        chrome,
        make_renderer,
        |session_id| {
            DiscordSink::new(http, channel_id, retained).for_session(sessions, session_id)
        },
    )
    .await?;

    Ok(())
}

/// Show `view` through the sink built by `make_sink`, opening a session only
/// when there is more than one page.
///
/// Returns the session ID, if one was opened.
async fn present<T, R, F, K, S>(
    sessions: &SessionRegistry,
    view: ViewState<T>,
    idle_timeout: Duration,
    chrome: PageChrome,
    make_renderer: F,
    make_sink: S,
) -> anyhow::Result<Option<u64>>
where
    T: Send + 'static,
    R: Renderer<T, Message = PageMessage> + 'static,
    F: FnOnce(PageChrome) -> R,
    K: SessionSink<PageMessage> + 'static,
    S: FnOnce(Option<u64>) -> K,
{
    if view.page_count() <= 1 {
        let renderer = make_renderer(chrome);
        let message = renderer.render(view.current_page(), &view)?;
        make_sink(None).show(message).await?;
        return Ok(None);
    }

    let SessionHandle {
        id: session_id,
        source: mut events,
    } = sessions.open().await;
    let renderer = make_renderer(chrome.with_session(Some(session_id)));
    let mut sink = make_sink(Some(session_id));
    let registry = sessions.clone();

    tokio::spawn(async move {
        match run_session(view, &mut events, &renderer, &mut sink, idle_timeout).await {
            Ok(view) => debug!(
                session_id,
                page = view.current_index() + 1,
                "pagination session finished"
            ),
            Err(source) => error!(?source, session_id, "pagination session failed"),
        }

        registry.close(session_id).await;
    });

    Ok(Some(session_id))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::embed::DEFAULT_EMBED_COLOR;
    use crate::pagination::{ListPageRenderer, Navigation};

    struct ForwardingSink {
        shown: mpsc::UnboundedSender<PageMessage>,
        teardown: mpsc::UnboundedSender<Teardown>,
    }

    #[async_trait]
    impl SessionSink<PageMessage> for ForwardingSink {
        async fn show(&mut self, message: PageMessage) -> anyhow::Result<()> {
            self.shown.send(message)?;
            Ok(())
        }

        async fn teardown(&mut self, reason: Teardown) -> anyhow::Result<()> {
            self.teardown.send(reason)?;
            Ok(())
        }
    }

    fn zone_view(count: usize) -> ViewState<String> {
        let items = (1..=count).map(|index| format!("zone{index}.example")).collect();
        ViewState::start(build_pages(items, 10).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn single_page_opens_no_session_and_has_no_buttons() {
        let sessions = SessionRegistry::new();
        let (shown, mut shown_rx) = mpsc::unbounded_channel();
        let (teardown, _teardown_rx) = mpsc::unbounded_channel();
        let mut sink_session = None;

        let session_id = present(
            &sessions,
            zone_view(3),
            Duration::from_secs(60),
            PageChrome::new("Cloudflare Zones", DEFAULT_EMBED_COLOR, 42),
            ListPageRenderer::new,
            |session_id| {
                sink_session = Some(session_id);
                ForwardingSink { shown, teardown }
            },
        )
        .await
        .unwrap();

        assert_eq!(session_id, None);
        assert_eq!(sink_session, Some(None));
        assert_eq!(sessions.active_sessions().await, 0);

        let message = shown_rx.try_recv().unwrap();
        assert!(message.components.is_empty());
        assert!(message.embed.footer.is_none());
    }

    #[tokio::test]
    async fn multiple_pages_run_in_a_session_until_closed() {
        let sessions = SessionRegistry::new();
        let (shown, mut shown_rx) = mpsc::unbounded_channel();
        let (teardown, mut teardown_rx) = mpsc::unbounded_channel();

        let session_id = present(
            &sessions,
            zone_view(25),
            Duration::from_secs(60),
            PageChrome::new("Cloudflare Zones", DEFAULT_EMBED_COLOR, 42),
            ListPageRenderer::new,
            |_| ForwardingSink { shown, teardown },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(sessions.active_sessions().await, 1);

        let first = shown_rx.recv().await.unwrap();
        assert_eq!(first.components.len(), 1);
        assert_eq!(
            first.embed.footer.map(|footer| footer.text).as_deref(),
            Some("Page 1/3")
        );

        sessions.dispatch(session_id, Navigation::Forward).await;
        let second = shown_rx.recv().await.unwrap();
        assert_eq!(
            second.embed.footer.map(|footer| footer.text).as_deref(),
            Some("Page 2/3")
        );

        sessions.dispatch(session_id, Navigation::Close).await;
        assert_eq!(teardown_rx.recv().await, Some(Teardown::Closed));
    }
}
