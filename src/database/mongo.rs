//! MongoDB document store backend.

use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{Client, Collection, options::ClientOptions};
use tracing::{debug, info};

use super::store::{CollectionHandle, DocumentStore, StoreError};

/// Name of the top-level collection holding one document per guild.
const GUILDS: &str = "guilds";

/// MongoDB-backed document store.
///
/// Guild documents live in the `guilds` collection keyed by `_id`.
/// Sub-collections are flattened into per-name collections whose entries
/// carry a `guild_id` field, the closest MongoDB shape to the nested
/// collections the cache layer expects.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: mongodb::Database,
}

impl MongoStore {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to MongoDB");

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Get a reference to the underlying MongoDB client.
    #[allow(dead_code)]
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn guilds(&self) -> Collection<Document> {
        self.db.collection(GUILDS)
    }

    fn entries(&self, collection: &CollectionHandle) -> Collection<Document> {
        self.db.collection(&collection.name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let found = self.guilds().find_one(doc! { "_id": id }).await?;
        debug!("get guild document {}: present={}", id, found.is_some());
        Ok(found)
    }

    async fn create_document(&self, id: &str, mut data: Document) -> Result<(), StoreError> {
        data.insert("_id", id);
        self.guilds().insert_one(data).await?;
        debug!("created guild document {}", id);
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        self.guilds().delete_one(doc! { "_id": id }).await?;
        debug!("deleted guild document {}", id);
        Ok(())
    }

    async fn add_entry(
        &self,
        collection: &CollectionHandle,
        mut data: Document,
    ) -> Result<(), StoreError> {
        data.insert("guild_id", collection.document_id.as_str());
        self.entries(collection).insert_one(data).await?;
        Ok(())
    }

    async fn has_entries(&self, collection: &CollectionHandle) -> Result<bool, StoreError> {
        let filter = doc! { "guild_id": collection.document_id.as_str() };
        let found = self.entries(collection).find_one(filter).await?;
        Ok(found.is_some())
    }
}
