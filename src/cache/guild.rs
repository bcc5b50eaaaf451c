//! Per-guild cache entry.

use std::fmt;
use std::sync::Arc;

use bson::Document;
use parking_lot::RwLock;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use crate::database::{CollectionHandle, DocumentStore, Player, StoreError};

/// Lightweight reference to a gateway guild.
///
/// The gateway rarely hands over a full guild object (Ready only carries
/// ids), so the handle keeps what is actually available.
#[derive(Debug, Clone)]
pub struct GuildHandle {
    pub id: Id<GuildMarker>,
    pub name: Option<String>,
}

impl GuildHandle {
    pub fn new(id: Id<GuildMarker>) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: Id<GuildMarker>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

/// In-memory mirror of one guild's persistent state.
///
/// Exactly one live entry exists per guild; only the cache registry may
/// construct one. The entry is shared between concurrently running
/// handlers, which get no exclusivity guarantee on its mutable fields.
pub struct GuildCache {
    guild: RwLock<GuildHandle>,
    data: RwLock<Document>,
    players: CollectionHandle,
    store: Arc<dyn DocumentStore>,
}

impl GuildCache {
    /// Construction performs no remote I/O; the registry has already run
    /// the bootstrap protocol by the time this is called.
    pub(crate) fn new(
        guild: GuildHandle,
        data: Document,
        players: CollectionHandle,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            guild: RwLock::new(guild),
            data: RwLock::new(data),
            players,
            store,
        }
    }

    pub fn guild_id(&self) -> Id<GuildMarker> {
        self.guild.read().id
    }

    #[allow(dead_code)]
    pub fn guild_name(&self) -> Option<String> {
        self.guild.read().name.clone()
    }

    /// Refresh the gateway-facing guild info, e.g. after a GuildCreate.
    pub fn update_guild(&self, handle: GuildHandle) {
        *self.guild.write() = handle;
    }

    /// Snapshot of the mirrored guild document.
    #[allow(dead_code)]
    pub fn data(&self) -> Document {
        self.data.read().clone()
    }

    /// Replace the mirrored guild document.
    #[allow(dead_code)]
    pub fn set_data(&self, data: Document) {
        *self.data.write() = data;
    }

    /// Handle to this guild's `players` sub-collection.
    pub fn players(&self) -> &CollectionHandle {
        &self.players
    }

    /// Append a player entry to the guild's roster.
    pub async fn add_player(&self, player: &Player) -> Result<(), StoreError> {
        let record = bson::to_document(player)?;
        self.store.add_entry(&self.players, record).await
    }
}

impl fmt::Debug for GuildCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuildCache")
            .field("guild_id", &self.guild_id())
            .field("players", &self.players)
            .finish()
    }
}
