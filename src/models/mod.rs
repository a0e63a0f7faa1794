//! Data structures for round-robin tournaments: roster, matches, schedules, standings.

mod game;
mod game_type;
mod leaderboard;
mod player;
mod tournament;

pub use game::{pair_key, GameMatch, MatchId, MatchState, MatchView, UNKNOWN_PLAYER_NAME};
pub use game_type::{GameType, GameTypeId};
pub use leaderboard::{GameTypeOverview, LeaderboardEntry, ScheduleProgress};
pub use player::{Player, PlayerId};
pub use tournament::{Entity, Schedule, Snapshot, TournamentError};
