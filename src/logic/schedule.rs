//! Round-robin schedule generation.

use crate::models::{pair_key, GameMatch, Player, Schedule};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Extend `schedule` with every roster pair it does not contain yet.
///
/// 1. Walk index pairs (i, j), i < j, over the roster in registration order.
/// 2. Skip pairs already present in the schedule (in either orientation).
/// 3. Append a match for each missing pair with the next sequence number.
///
/// Because pairs are visited lexicographically and existing matches are never
/// touched, adding players and regenerating only appends. Returns the newly
/// created matches; fewer than two players yields nothing.
pub fn generate_round_robin(
    roster: &[Player],
    schedule: &mut Schedule,
    now: DateTime<Utc>,
) -> Vec<GameMatch> {
    let mut existing: HashSet<_> = schedule.matches.iter().map(GameMatch::pair_key).collect();
    let mut created = Vec::new();

    for (i, a) in roster.iter().enumerate() {
        for b in &roster[i + 1..] {
            // Duplicate roster entries would pair a player with themselves.
            if a.id == b.id || !existing.insert(pair_key(a.id, b.id)) {
                continue;
            }
            let game = GameMatch::new(schedule.game_type_id, schedule.next_sequence, a.id, b.id, now);
            schedule.next_sequence += 1;
            created.push(game);
        }
    }

    schedule.matches.extend(created.iter().cloned());
    created
}
