//! CSV export of a game type's schedule and leaderboard.

use crate::models::{LeaderboardEntry, MatchView, TournamentError};

fn csv_error(e: impl std::fmt::Display) -> TournamentError {
    TournamentError::Storage(format!("csv export: {e}"))
}

/// One row per match in sequence order: `sequence,player1,player2,winner`.
/// The winner column is empty for unplayed matches.
pub fn schedule_csv(matches: &[MatchView]) -> Result<String, TournamentError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["sequence", "player1", "player2", "winner"])
        .map_err(csv_error)?;
    for m in matches {
        wtr.write_record([
            m.sequence.to_string().as_str(),
            m.player1_name.as_str(),
            m.player2_name.as_str(),
            m.winner_name.as_deref().unwrap_or(""),
        ])
        .map_err(csv_error)?;
    }
    finish(wtr)
}

/// `rank,player,wins`; rank is the 1-based row position.
pub fn leaderboard_csv(rows: &[LeaderboardEntry]) -> Result<String, TournamentError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "player", "wins"]).map_err(csv_error)?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record([(i + 1).to_string(), row.name.clone(), row.wins.to_string()])
            .map_err(csv_error)?;
    }
    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, TournamentError> {
    let bytes = wtr.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}
