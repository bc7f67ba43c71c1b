mod status;

use std::{future::Future, sync::Arc};

use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use warden_commands::{handle_interaction, handle_message};
use warden_core::{Config, Context};

use crate::status::{DEFAULT_ROTATION, StatusRotator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let config = Arc::new(Config::from_env()?);
    let token = config.discord_token.clone();

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let cache = Arc::new(DefaultInMemoryCache::new());
    let ctx = Context::new(Arc::clone(&http), Arc::clone(&config))?;

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);
    let mut rotator = None;

    info!("Warden is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        cache.update(&event);

        match event {
            Event::Ready(_) => {
                info!("Warden is ready.");

                // Ready fires again after a full reconnect; keep the first task.
                if rotator.is_none() {
                    let task = StatusRotator::new(
                        shard.sender(),
                        Arc::clone(&cache),
                        DEFAULT_ROTATION,
                        config.status_rotation_interval,
                    );
                    rotator = Some(tokio::spawn(task.run()));
                }
            }

            // Handlers await upstream APIs; run them off the gateway loop so
            // button presses are still acknowledged in time.
            Event::MessageCreate(msg) => {
                spawn_handler("message", handle_message(ctx.clone(), msg));
            }
            Event::InteractionCreate(interaction) => {
                spawn_handler("interaction", handle_interaction(ctx.clone(), interaction));
            }
            _ => {} // Ignore unused events
        }
    }

    if let Some(task) = rotator {
        task.abort();
    }
    info!(
        open_sessions = ctx.sessions.active_sessions().await,
        "gateway closed, shutting down"
    );

    Ok(())
}

/// Run a gateway event handler on its own task, logging its failure.
fn spawn_handler<F>(kind: &'static str, handler: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(source) = handler.await {
            error!(?source, kind, "event handler failed");
        }
    })
}
