//! Result recording: the Unplayed -> Decided transition of a single match.

use crate::models::{GameMatch, MatchState, PlayerId, TournamentError};
use chrono::{DateTime, Utc};

/// Record `winner` for `game`.
///
/// Fails with `AlreadyDecided` if a winner is already set and with `InvalidWinner`
/// if `winner` is not one of the two participants; in both cases `game` is left
/// untouched.
pub fn record_winner(
    game: &mut GameMatch,
    winner: PlayerId,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    if game.state() == MatchState::Decided {
        return Err(TournamentError::AlreadyDecided(game.id));
    }
    if !game.involves(winner) {
        return Err(TournamentError::InvalidWinner {
            match_id: game.id,
            winner_id: winner,
        });
    }
    game.winner = Some(winner);
    game.decided_at = Some(now);
    Ok(())
}
