// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (databases, APIs)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Build the command registry and bind event modules
// 4. Publish slash commands while the client logs in

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::commands::{publish_commands, CommandDispatcher, CommandRegistry};
use crate::core::configuration::ConfigurationService;
use crate::core::events::EventBus;
use crate::core::settings::BotSettings;
use crate::discord::gateway;
use crate::discord::Data;
use crate::infra::configuration::SqliteConfigurationStore;
use crate::infra::discord_api::DiscordCommandPublisher;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let settings = BotSettings::from_env()
        .context("Create a .env file with TOKEN, CLIENT_ID and GUILD_ID")?;
    let started_at = chrono::Utc::now();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    // The store connects on first use, which is the seeding run after `ready`.
    let configuration_store = SqliteConfigurationStore::new(settings.database_url.clone());
    let configuration = Arc::new(ConfigurationService::new(
        configuration_store,
        settings.seed_policy,
    ));

    // Built once, read-only from here on.
    let registry = Arc::new(CommandRegistry::from_modules(
        discord::commands::all_commands(started_at, Arc::clone(&configuration)),
    ));
    if registry.is_empty() {
        tracing::warn!("No commands loaded");
    }
    tracing::info!(count = registry.len(), commands = ?registry.names(), "Loaded commands");
    let dispatcher = Arc::new(CommandDispatcher::new(Arc::clone(&registry)));

    // The ready handler reports unrecoverable seeding failures here.
    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel::<anyhow::Error>();

    let events: Arc<EventBus<gateway::BotEvent>> = Arc::new(EventBus::new());
    events.bind_all(discord::events::all_events(
        Arc::clone(&configuration),
        Arc::clone(&dispatcher),
        fatal_tx,
    ));
    tracing::debug!(
        ready = events.listener_count(gateway::READY),
        interaction_create = events.listener_count(gateway::INTERACTION_CREATE),
        "Bound event modules"
    );

    // ========================================================================
    // COMMAND PUBLISHING
    // ========================================================================
    // Runs alongside login. A failure is logged and nothing else: the registry
    // keeps serving whatever interactions do arrive.

    let publisher = DiscordCommandPublisher::new(
        &settings.token,
        settings.application_id.clone(),
        settings.guild_id.clone(),
    )?;
    let schemas = registry.schemas().to_vec();
    tokio::spawn(async move {
        publish_commands(&publisher, &schemas).await;
    });

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let data = Data { events };

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Every gateway event goes to the event bus
            event_handler: |ctx, event, framework, data| {
                Box::pin(gateway::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(gateway::on_error(error)),
            ..Default::default()
        })
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!(session = %ready.session_id, "🤖 Bot is starting up...");
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&settings.token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;
    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => result.context("Error running bot")?,
        Some(err) = fatal_rx.recv() => {
            shard_manager.shutdown_all().await;
            return Err(err.context("Startup seeding failed"));
        }
    }

    Ok(())
}
