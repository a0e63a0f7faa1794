//! GameType: a named pool with its own schedule and standings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game type.
pub type GameTypeId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameType {
    pub id: GameTypeId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl GameType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
