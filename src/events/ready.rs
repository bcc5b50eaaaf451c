//! Startup handling - restore guild caches and deploy commands.

use anyhow::Result;
use tracing::{error, info};
use twilight_model::gateway::payload::incoming::Ready;

use crate::bot::{self, AppState};
use crate::cache::GuildHandle;

/// Restore the cache for every visible guild and deploy its commands.
///
/// One guild's failure never aborts startup for the others.
pub async fn handle(state: &AppState, data: &Ready) -> Result<()> {
    state.set_application_id(data.application.id);
    info!("{} is ready!", data.user.name);

    for guild in &data.guilds {
        if let Err(err) = state.registry.get_or_create(&GuildHandle::new(guild.id)).await {
            error!("couldn't restore cache for guild {}: {err}", guild.id);
            continue;
        }

        if let Err(err) = bot::deploy_guild_commands(state, guild.id).await {
            error!("failed to deploy commands in guild {}: {err}", guild.id);
            continue;
        }

        info!("restored cache for guild {}", guild.id);
    }

    Ok(())
}
