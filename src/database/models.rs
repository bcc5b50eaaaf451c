//! Persistent record types.

use bson::DateTime;
use serde::{Deserialize, Serialize};

/// A player entry inside a guild's `players` sub-collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Discord user id, stored as a string like the guild keys.
    pub user_id: String,
    /// When the player joined the roster.
    pub joined_at: DateTime,
}

impl Player {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            joined_at: DateTime::now(),
        }
    }
}
