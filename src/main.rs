//! Asphodel - Modular Discord Bot
//!
//! A modular Discord bot keeping one authoritative cache per guild,
//! lazily backed by a MongoDB document store.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - Document store (MongoDB integration)
//! - `cache` - Per-guild cache registry
//! - `bot` - Application state and gateway runtime
//! - `events` - Gateway event routing
//! - `plugins` - Command and button handlers (extensible)

mod bot;
mod cache;
mod config;
mod database;
mod events;
mod plugins;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use twilight_gateway::{Intents, Shard, ShardId};
use twilight_http::Client;

use bot::AppState;
use cache::CacheRegistry;
use config::Config;
use database::MongoStore;
use plugins::HandlerRegistry;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("asphodel=info,twilight_gateway=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Asphodel bot...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.mongodb_database).await?);
    info!("Database connected");

    // Initialize the guild cache registry
    let registry = CacheRegistry::new(store);
    info!("Cache registry initialized");

    // Load command and button handlers
    let handlers = Arc::new(HandlerRegistry::load());

    // Discord clients
    let http = Arc::new(Client::new(config.discord_token.clone()));
    let shard = Shard::new(
        ShardId::ONE,
        config.discord_token.clone(),
        Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT,
    );

    let state = AppState::new(http, registry, handlers);

    // Run the gateway loop
    bot::run(shard, state).await;

    Ok(())
}
