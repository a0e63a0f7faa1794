//! Tournament engine logic: roster validation, pairing, results, standings.
//!
//! Pure functions over the model types; locking and storage live in `store`.

mod results;
mod roster;
mod schedule;
mod standings;

pub use results::record_winner;
pub use roster::validate_name;
pub use schedule::generate_round_robin;
pub use standings::{leaderboard, next_match, progress};
