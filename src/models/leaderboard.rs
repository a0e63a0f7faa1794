//! Derived standings rows. Never stored.

use crate::models::game::MatchView;
use crate::models::game_type::GameType;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One leaderboard row: player and win count within a game type.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "id")]
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
}

/// How far a game type's schedule has been played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleProgress {
    pub total: usize,
    pub decided: usize,
    pub remaining: usize,
}

/// Everything the live display needs for one game type.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameTypeOverview {
    pub game_type: GameType,
    pub next_match: Option<MatchView>,
    pub progress: ScheduleProgress,
    pub leaderboard: Vec<LeaderboardEntry>,
}
