//! Gateway event routing.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `mod your_event;` below
//! 3. Adding the match arm to `handle_event()`

mod guild;
mod interaction;
mod message;
mod ready;

use tracing::warn;
use twilight_gateway::Event;

use crate::bot::AppState;
use crate::cache::GuildHandle;

/// Route one gateway event to its handler.
///
/// Handler failures are logged here; no single event is allowed to take
/// the router down or affect events for other guilds.
pub async fn handle_event(state: &AppState, event: Event) {
    let kind = event.kind();
    let result = match event {
        Event::Ready(data) => ready::handle(state, &data).await,
        Event::MessageCreate(message) => message::handle(state, &message).await,
        Event::InteractionCreate(interaction) => interaction::handle(state, interaction.0).await,
        Event::GuildCreate(guild) => {
            let handle = GuildHandle::named(guild.0.id, guild.0.name.clone());
            guild::created(state, handle).await
        }
        Event::GuildDelete(guild) => guild::deleted(state, guild.id, guild.unavailable).await,
        _ => Ok(()),
    };

    if let Err(error) = result {
        warn!(%error, "unhandled error from {kind:?} event");
    }
}
