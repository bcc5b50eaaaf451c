//! Ping command plugin.

use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use super::CommandHandler;
use crate::bot::CommandContext;
use crate::cache::GuildCache;

/// Replies with a simple liveness check.
pub struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    fn definition(&self) -> Command {
        CommandBuilder::new("ping", "Check that the bot is alive", CommandType::ChatInput).build()
    }

    async fn execute(&self, _cache: Arc<GuildCache>, ctx: &CommandContext) -> anyhow::Result<()> {
        ctx.follow_up("Pong!").await
    }
}
