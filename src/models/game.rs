//! Match (game) between two players of one game type, and its response view.

use crate::models::game_type::GameTypeId;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match: the winner field is either unset or set for good.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Unplayed,
    Decided,
}

/// A single scheduled pairing. Created only by schedule generation, mutated once
/// when the winner is recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub game_type_id: GameTypeId,
    /// Position in the generated schedule (1-based, never reused within a game type).
    pub sequence: u32,
    /// Left side for display; the earlier-registered player of the pair.
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    /// None if not yet played.
    pub winner: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(
        game_type_id: GameTypeId,
        sequence: u32,
        player_a: PlayerId,
        player_b: PlayerId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_type_id,
            sequence,
            player_a,
            player_b,
            winner: None,
            created_at,
            decided_at: None,
        }
    }

    pub fn state(&self) -> MatchState {
        match self.winner {
            Some(_) => MatchState::Decided,
            None => MatchState::Unplayed,
        }
    }

    /// True if `player` is one of the two participants.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_a == player || self.player_b == player
    }

    /// The unordered pair, normalised so {a, b} and {b, a} compare equal.
    pub fn pair_key(&self) -> (PlayerId, PlayerId) {
        pair_key(self.player_a, self.player_b)
    }
}

/// Normalise an unordered player pair.
pub fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Match row as served to clients: ids plus denormalized display names.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub game_type_id: GameTypeId,
    pub sequence: u32,
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winner_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winner_name: Option<String>,
    pub state: MatchState,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Name shown for a player id that is no longer (or never was) on the roster.
pub const UNKNOWN_PLAYER_NAME: &str = "unknown";

impl MatchView {
    /// Build the view, resolving names against `roster`.
    pub fn from_match(game: &GameMatch, roster: &[Player]) -> Self {
        let name_of = |id: PlayerId| {
            roster
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string())
        };
        Self {
            id: game.id,
            game_type_id: game.game_type_id,
            sequence: game.sequence,
            player1_id: game.player_a,
            player1_name: name_of(game.player_a),
            player2_id: game.player_b,
            player2_name: name_of(game.player_b),
            winner_id: game.winner,
            winner_name: game.winner.map(name_of),
            state: game.state(),
            decided_at: game.decided_at,
        }
    }
}
