//! Per-guild slash command deployment.

use anyhow::Result;
use tracing::debug;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use super::AppState;

/// Register the loaded command definitions with one guild.
///
/// Deployment is per guild so a failure only affects that guild.
pub async fn deploy_guild_commands(state: &AppState, guild_id: Id<GuildMarker>) -> Result<()> {
    let commands = state.handlers.command_definitions();
    state
        .interaction()?
        .set_guild_commands(guild_id, &commands)
        .await?;
    debug!("deployed {} commands to guild {}", commands.len(), guild_id);
    Ok(())
}
