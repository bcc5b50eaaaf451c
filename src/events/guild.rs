//! Guild lifecycle events.

use anyhow::Result;
use tracing::info;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use crate::bot::AppState;
use crate::cache::GuildHandle;

/// Refresh the cached guild handle when the gateway sends full guild data.
pub async fn created(state: &AppState, guild: GuildHandle) -> Result<()> {
    if let Some(entry) = state.registry.get(guild.id) {
        entry.update_guild(guild);
    }
    Ok(())
}

/// Handle a guild disappearing from the gateway.
///
/// `unavailable` means an outage, not a removal: the guild still exists
/// and its remote document must survive, so only the in-memory entry is
/// dropped. The remote document is deleted only when the bot was actually
/// removed from the guild.
pub async fn deleted(state: &AppState, guild_id: Id<GuildMarker>, unavailable: bool) -> Result<()> {
    if unavailable {
        state.registry.evict(guild_id);
        info!("guild {} became unavailable, dropped its cache entry", guild_id);
        return Ok(());
    }

    state.registry.remove(guild_id).await?;
    info!("removed cache for guild {}", guild_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use twilight_http::Client;

    use super::*;
    use crate::bot::AppState;
    use crate::cache::CacheRegistry;
    use crate::database::memory::MemoryStore;
    use crate::plugins::HandlerRegistry;

    fn state() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new());
        let registry = CacheRegistry::new(store.clone());
        let handlers = Arc::new(HandlerRegistry::with_handlers(Vec::new(), Vec::new()));
        let state = AppState::new(Arc::new(Client::new("token".to_string())), registry, handlers);
        (store, state)
    }

    #[tokio::test]
    async fn created_refreshes_the_cached_guild_name() {
        let (_store, state) = state();
        let entry = state
            .registry
            .get_or_create(&GuildHandle::new(Id::new(1)))
            .await
            .unwrap();
        assert!(entry.guild_name().is_none());

        created(&state, GuildHandle::named(Id::new(1), "home"))
            .await
            .unwrap();

        assert_eq!(entry.guild_name().as_deref(), Some("home"));
    }

    #[tokio::test]
    async fn created_without_an_entry_does_not_bootstrap_one() {
        let (store, state) = state();

        created(&state, GuildHandle::named(Id::new(2), "drive-by"))
            .await
            .unwrap();

        assert!(state.registry.get(Id::new(2)).is_none());
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn outage_keeps_the_remote_document() {
        let (store, state) = state();
        state
            .registry
            .get_or_create(&GuildHandle::new(Id::new(7)))
            .await
            .unwrap();

        deleted(&state, Id::new(7), true).await.unwrap();

        assert!(state.registry.get(Id::new(7)).is_none());
        assert!(store.document("7").is_some());
    }

    #[tokio::test]
    async fn removal_deletes_the_remote_document() {
        let (store, state) = state();
        state
            .registry
            .get_or_create(&GuildHandle::new(Id::new(8)))
            .await
            .unwrap();

        deleted(&state, Id::new(8), false).await.unwrap();

        assert!(state.registry.get(Id::new(8)).is_none());
        assert!(store.document("8").is_none());
    }
}
