//! Guild cache registry.
//!
//! Owns every live [`GuildCache`] and is the only component allowed to
//! create or evict one. Creation lazily bootstraps the backing guild
//! document in the remote store.

use std::collections::HashMap;
use std::sync::Arc;

use bson::Document;
use dashmap::DashMap;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::debug;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use super::guild::{GuildCache, GuildHandle};
use crate::database::{DocumentStore, StoreError};

/// Name of the per-guild sub-collection every guild document carries.
pub const PLAYERS: &str = "players";

type PendingBootstrap = Shared<BoxFuture<'static, Result<Arc<GuildCache>, StoreError>>>;

enum Lookup {
    /// The entry already exists; no bootstrap needed.
    Ready(Arc<GuildCache>),
    /// A bootstrap task to await, shared with any concurrent caller.
    Pending(PendingBootstrap),
}

/// Registry mapping guild ids to live cache entries.
///
/// At most one entry exists per guild at any time. Concurrent
/// `get_or_create` calls for the same uncached guild share a single
/// memoized bootstrap task, so the creation protocol runs once and every
/// caller resolves to the same entry.
#[derive(Clone)]
pub struct CacheRegistry {
    store: Arc<dyn DocumentStore>,
    entries: Arc<DashMap<Id<GuildMarker>, Arc<GuildCache>>>,
    pending: Arc<Mutex<HashMap<Id<GuildMarker>, PendingBootstrap>>>,
}

impl CacheRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            entries: Arc::new(DashMap::new()),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the guild's cache entry, bootstrapping it on first access.
    ///
    /// Never yields a partially-initialized entry: an entry is published
    /// only after the bootstrap protocol finished. A failed bootstrap is
    /// not cached; the next caller retries from scratch.
    pub async fn get_or_create(&self, guild: &GuildHandle) -> Result<Arc<GuildCache>, StoreError> {
        if let Some(entry) = self.entries.get(&guild.id) {
            return Ok(entry.clone());
        }

        match self.lookup_or_spawn(guild) {
            Lookup::Ready(entry) => Ok(entry),
            Lookup::Pending(task) => task.await,
        }
    }

    /// Memoize the in-flight bootstrap per guild id so a concurrent
    /// caller awaits the existing task instead of starting a second
    /// creation.
    ///
    /// Entries are re-checked under the `pending` lock: a bootstrap that
    /// finished after the caller's fast-path miss has already published
    /// its entry (publish and memo clear happen under this same lock), so
    /// the re-check settles the caller on it instead of spawning a
    /// duplicate task.
    fn lookup_or_spawn(&self, guild: &GuildHandle) -> Lookup {
        let mut pending = self.pending.lock();

        if let Some(entry) = self.entries.get(&guild.id) {
            return Lookup::Ready(entry.clone());
        }

        match pending.get(&guild.id) {
            Some(task) => Lookup::Pending(task.clone()),
            None => {
                let task = Self::bootstrap_task(self.clone(), guild.clone());
                pending.insert(guild.id, task.clone());
                Lookup::Pending(task)
            }
        }
    }

    /// Drop the guild's in-memory entry, leaving the remote document
    /// untouched. The next access bootstraps a fresh entry from it.
    pub fn evict(&self, guild_id: Id<GuildMarker>) {
        self.entries.remove(&guild_id);
    }

    /// Evict the guild's entry and delete its remote document.
    ///
    /// Removing a guild that was never cached or never persisted is a
    /// no-op, not an error.
    pub async fn remove(&self, guild_id: Id<GuildMarker>) -> Result<(), StoreError> {
        self.evict(guild_id);

        let id = guild_id.to_string();
        if self.store.get_document(&id).await?.is_some() {
            self.store.delete_document(&id).await?;
            debug!("deleted remote document for guild {}", guild_id);
        }
        Ok(())
    }

    /// Look up an entry without creating one.
    pub fn get(&self, guild_id: Id<GuildMarker>) -> Option<Arc<GuildCache>> {
        self.entries.get(&guild_id).map(|entry| entry.clone())
    }

    /// Number of live entries.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn bootstrap_task(registry: CacheRegistry, guild: GuildHandle) -> PendingBootstrap {
        async move {
            let result = registry.bootstrap(&guild).await;

            // Publish and clear the memo under one lock, so a caller
            // inside `lookup_or_spawn` sees either the finished entry or
            // the still-pending task, never neither.
            let mut pending = registry.pending.lock();
            match &result {
                Ok(entry) => {
                    registry.entries.insert(guild.id, entry.clone());
                    debug!("created cache entry for guild {}", guild.id);
                }
                Err(error) => {
                    debug!("bootstrap failed for guild {}: {error}", guild.id);
                }
            }
            pending.remove(&guild.id);
            result
        }
        .boxed()
        .shared()
    }

    /// Guild document bootstrap.
    ///
    /// The document and its sentinel player entry are written as two
    /// independent operations; a crash in between leaves a document with
    /// an empty sub-collection, which the `has_entries` probe repairs on
    /// the next access.
    async fn bootstrap(&self, guild: &GuildHandle) -> Result<Arc<GuildCache>, StoreError> {
        let id = guild.id.to_string();
        let players = self.store.subcollection(&id, PLAYERS);

        let data = match self.store.get_document(&id).await? {
            Some(data) => {
                if !self.store.has_entries(&players).await? {
                    self.store.add_entry(&players, Document::new()).await?;
                }
                data
            }
            None => {
                self.store.create_document(&id, Document::new()).await?;
                self.store.add_entry(&players, Document::new()).await?;
                Document::new()
            }
        };

        Ok(Arc::new(GuildCache::new(
            guild.clone(),
            data,
            players,
            self.store.clone(),
        )))
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
