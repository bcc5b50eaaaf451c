//! Database module exports.

#[cfg(test)]
pub mod memory;
mod models;
mod mongo;
mod store;

pub use models::Player;
pub use mongo::MongoStore;
pub use store::{CollectionHandle, DocumentStore, StoreError};
