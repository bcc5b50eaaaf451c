//! Join command plugin - adds the invoker to the guild's player roster.

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use super::CommandHandler;
use crate::bot::CommandContext;
use crate::cache::GuildCache;
use crate::database::Player;

/// Registers the invoking user in the guild's `players` sub-collection.
pub struct Join;

#[async_trait]
impl CommandHandler for Join {
    fn definition(&self) -> Command {
        CommandBuilder::new("join", "Join this guild's player roster", CommandType::ChatInput)
            .build()
    }

    async fn execute(&self, cache: Arc<GuildCache>, ctx: &CommandContext) -> anyhow::Result<()> {
        let invoker = ctx.invoker.context("interaction carries no invoking user")?;
        cache.add_player(&Player::new(invoker.to_string())).await?;
        ctx.follow_up("You are on the roster now!").await
    }
}

#[cfg(test)]
mod tests {
    use twilight_model::id::Id;

    use super::*;
    use crate::cache::{CacheRegistry, GuildHandle};
    use crate::database::memory::MemoryStore;

    #[tokio::test]
    async fn join_appends_a_player_entry() {
        let store = Arc::new(MemoryStore::new());
        let registry = CacheRegistry::new(store.clone());
        let cache = registry
            .get_or_create(&GuildHandle::new(Id::new(1)))
            .await
            .unwrap();

        // One sentinel entry from the bootstrap.
        assert_eq!(store.entry_count(cache.players()), 1);

        cache.add_player(&Player::new("42")).await.unwrap();

        assert_eq!(store.entry_count(cache.players()), 2);
    }
}
