//! Plain message handling.
//!
//! Only a narrow liveness probe is recognized; bot-authored and non-guild
//! messages are ignored entirely.

use anyhow::Result;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::bot::AppState;

/// Prefix that marks a liveness probe message.
const PROBE_PREFIX: &str = "|ping";

pub async fn handle(state: &AppState, message: &MessageCreate) -> Result<()> {
    if message.author.bot {
        return Ok(());
    }
    if message.guild_id.is_none() {
        return Ok(());
    }

    if is_liveness_probe(&message.content) {
        state
            .http
            .create_message(message.channel_id)
            .reply(message.id)
            .content("Pong!")?
            .await?;
    }

    Ok(())
}

fn is_liveness_probe(content: &str) -> bool {
    content.starts_with(PROBE_PREFIX)
}
