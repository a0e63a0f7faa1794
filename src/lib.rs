//! Round-robin tournament organizer: library with models, engine logic, store and REST API.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod store;
pub mod web;

pub use config::ServerConfig;
pub use logic::{generate_round_robin, leaderboard, next_match, progress, record_winner};
pub use models::{
    Entity, GameMatch, GameType, GameTypeId, GameTypeOverview, LeaderboardEntry, MatchId,
    MatchState, MatchView, Player, PlayerId, Schedule, ScheduleProgress, Snapshot,
    TournamentError,
};
pub use store::TournamentStore;
