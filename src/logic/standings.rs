//! Read-side derivations over a schedule: next match, progress and leaderboard.

use crate::models::{
    GameMatch, LeaderboardEntry, MatchState, Player, PlayerId, ScheduleProgress,
    UNKNOWN_PLAYER_NAME,
};
use std::collections::HashMap;

/// The unplayed match with the lowest sequence number, if any.
pub fn next_match(matches: &[GameMatch]) -> Option<&GameMatch> {
    matches
        .iter()
        .filter(|m| m.state() == MatchState::Unplayed)
        .min_by_key(|m| m.sequence)
}

pub fn progress(matches: &[GameMatch]) -> ScheduleProgress {
    let decided = matches
        .iter()
        .filter(|m| m.state() == MatchState::Decided)
        .count();
    ScheduleProgress {
        total: matches.len(),
        decided,
        remaining: matches.len() - decided,
    }
}

/// Win-count ranking of every player that appears in at least one match.
///
/// Sorted by wins (descending), ties by registration order. Ids missing from the
/// roster rank after all registered players, in order of first appearance.
pub fn leaderboard(roster: &[Player], matches: &[GameMatch]) -> Vec<LeaderboardEntry> {
    let roster_pos: HashMap<PlayerId, usize> =
        roster.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

    // player -> (tie-break rank, wins)
    let mut tally: HashMap<PlayerId, (usize, u32)> = HashMap::new();
    let mut ordered = matches.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|m| m.sequence);
    let mut unknown_seen = 0;
    for m in ordered {
        for pid in [m.player_a, m.player_b] {
            tally.entry(pid).or_insert_with(|| {
                let rank = match roster_pos.get(&pid) {
                    Some(&i) => i,
                    None => {
                        unknown_seen += 1;
                        roster.len() + unknown_seen
                    }
                };
                (rank, 0)
            });
        }
        if let Some(winner) = m.winner {
            if let Some(entry) = tally.get_mut(&winner) {
                entry.1 += 1;
            }
        }
    }

    let mut rows: Vec<(usize, LeaderboardEntry)> = tally
        .into_iter()
        .map(|(player_id, (rank, wins))| {
            let name = roster_pos
                .get(&player_id)
                .map(|&i| roster[i].name.clone())
                .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string());
            (rank, LeaderboardEntry { player_id, name, wins })
        })
        .collect();
    rows.sort_by(|(ra, a), (rb, b)| b.wins.cmp(&a.wins).then(ra.cmp(rb)));
    rows.into_iter().map(|(_, entry)| entry).collect()
}
