//! Schedule (per game type match collection), persisted snapshot, and TournamentError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::game_type::{GameType, GameTypeId};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of entity a lookup failed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Player,
    GameType,
    Match,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Player => write!(f, "Player"),
            Entity::GameType => write!(f, "Game type"),
            Entity::Match => write!(f, "Match"),
        }
    }
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Referenced player, game type or match does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: uuid::Uuid },
    /// Empty or malformed creation payload.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Winner is not one of the two participants.
    #[error("Player {winner_id} did not play in match {match_id}")]
    InvalidWinner { match_id: MatchId, winner_id: PlayerId },
    /// The match already has a recorded winner.
    #[error("Match {0} already has a winner")]
    AlreadyDecided(MatchId),
    /// Snapshot file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
    /// A writer panicked while holding a lock.
    #[error("Internal state lock poisoned")]
    Poisoned,
}

impl TournamentError {
    pub fn not_found(entity: Entity, id: uuid::Uuid) -> Self {
        TournamentError::NotFound { entity, id }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            TournamentError::NotFound { .. } => "NOT_FOUND",
            TournamentError::InvalidInput(_) => "INVALID_INPUT",
            TournamentError::InvalidWinner { .. } => "INVALID_WINNER",
            TournamentError::AlreadyDecided(_) => "ALREADY_DECIDED",
            TournamentError::Storage(_) => "STORAGE_ERROR",
            TournamentError::Poisoned => "INTERNAL_ERROR",
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for TournamentError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        TournamentError::Poisoned
    }
}

/// All matches of one game type, ordered by sequence number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub game_type_id: GameTypeId,
    pub matches: Vec<GameMatch>,
    /// Sequence number the next generated match receives.
    pub next_sequence: u32,
}

impl Schedule {
    /// Empty schedule; the first generated match gets sequence 1.
    pub fn new(game_type_id: GameTypeId) -> Self {
        Self {
            game_type_id,
            matches: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn get(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}

/// Full persisted state: roster plus every game type's schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub game_types: Vec<GameType>,
    pub schedules: Vec<Schedule>,
}
