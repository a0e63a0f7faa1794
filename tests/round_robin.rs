//! Integration tests for the pure engine: pairing, result recording, next match, standings.

use chrono::Utc;
use round_robin_tournament::{
    generate_round_robin, leaderboard, next_match, progress, record_winner, GameMatch,
    MatchState, Player, Schedule, TournamentError,
};
use std::collections::HashSet;
use uuid::Uuid;

fn roster(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n)).collect()
}

fn pairs(schedule: &Schedule) -> Vec<(Uuid, Uuid, u32)> {
    schedule
        .matches
        .iter()
        .map(|m| (m.player_a, m.player_b, m.sequence))
        .collect()
}

#[test]
fn three_players_produce_three_ordered_matches() {
    let players = roster(&["Alice", "Bob", "Carol"]);
    let (alice, bob, carol) = (players[0].id, players[1].id, players[2].id);
    let mut schedule = Schedule::new(Uuid::new_v4());

    let created = generate_round_robin(&players, &mut schedule, Utc::now());

    assert_eq!(created.len(), 3);
    assert_eq!(
        pairs(&schedule),
        vec![(alice, bob, 1), (alice, carol, 2), (bob, carol, 3)]
    );
    assert!(schedule.matches.iter().all(|m| m.state() == MatchState::Unplayed));
    assert!(schedule
        .matches
        .iter()
        .all(|m| m.game_type_id == schedule.game_type_id));
}

#[test]
fn fewer_than_two_players_is_an_empty_schedule() {
    let mut schedule = Schedule::new(Uuid::new_v4());
    assert!(generate_round_robin(&[], &mut schedule, Utc::now()).is_empty());
    assert!(generate_round_robin(&roster(&["Solo"]), &mut schedule, Utc::now()).is_empty());
    assert!(schedule.matches.is_empty());
    assert_eq!(schedule.next_sequence, 1);
}

#[test]
fn regenerating_without_roster_change_is_idempotent() {
    let players = roster(&["A", "B", "C", "D"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    let before = schedule.clone();

    let created = generate_round_robin(&players, &mut schedule, Utc::now());

    assert!(created.is_empty());
    assert_eq!(schedule, before);
}

#[test]
fn adding_a_player_appends_only_their_pairings() {
    let mut players = roster(&["Alice", "Bob", "Carol"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    let before = schedule.matches.clone();

    players.push(Player::new("Dave"));
    let dave = players[3].id;
    let created = generate_round_robin(&players, &mut schedule, Utc::now());

    assert_eq!(&schedule.matches[..3], &before[..]);
    assert_eq!(
        created
            .iter()
            .map(|m| (m.player_a, m.player_b, m.sequence))
            .collect::<Vec<_>>(),
        vec![
            (players[0].id, dave, 4),
            (players[1].id, dave, 5),
            (players[2].id, dave, 6),
        ]
    );
}

#[test]
fn existing_pair_in_either_orientation_is_not_duplicated() {
    let players = roster(&["A", "B", "C"]);
    let game_type = Uuid::new_v4();
    let mut schedule = Schedule::new(game_type);
    // Pre-existing B vs A, stored right-to-left.
    schedule
        .matches
        .push(GameMatch::new(game_type, 1, players[1].id, players[0].id, Utc::now()));
    schedule.next_sequence = 2;

    generate_round_robin(&players, &mut schedule, Utc::now());

    let unique: HashSet<_> = schedule.matches.iter().map(GameMatch::pair_key).collect();
    assert_eq!(schedule.matches.len(), 3);
    assert_eq!(unique.len(), 3);
    assert_eq!(
        schedule.matches.iter().map(|m| m.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn larger_roster_covers_every_pair_once() {
    let players: Vec<Player> = (0..12).map(|i| Player::new(format!("P{i}"))).collect();
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());

    assert_eq!(schedule.matches.len(), 12 * 11 / 2);
    let unique: HashSet<_> = schedule.matches.iter().map(GameMatch::pair_key).collect();
    assert_eq!(unique.len(), schedule.matches.len());
    for p in &players {
        let played = schedule.matches.iter().filter(|m| m.involves(p.id)).count();
        assert_eq!(played, 11);
    }
}

#[test]
fn winner_is_recorded_exactly_once() {
    let players = roster(&["Alice", "Bob"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    let game = &mut schedule.matches[0];

    record_winner(game, players[0].id, Utc::now()).unwrap();
    assert_eq!(game.state(), MatchState::Decided);
    assert!(game.decided_at.is_some());

    let err = record_winner(game, players[1].id, Utc::now()).unwrap_err();
    assert_eq!(err, TournamentError::AlreadyDecided(game.id));
    assert_eq!(game.winner, Some(players[0].id));
}

#[test]
fn outsider_cannot_win() {
    let players = roster(&["Alice", "Bob", "Carol"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    let game = &mut schedule.matches[0]; // Alice vs Bob
    let untouched = game.clone();

    let err = record_winner(game, players[2].id, Utc::now()).unwrap_err();

    assert!(matches!(err, TournamentError::InvalidWinner { winner_id, .. } if winner_id == players[2].id));
    assert_eq!(*game, untouched);
}

#[test]
fn next_match_follows_sequence_order() {
    let players = roster(&["Alice", "Bob", "Carol"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());

    assert_eq!(next_match(&schedule.matches).map(|m| m.sequence), Some(1));

    // Deciding a later match does not let it jump the queue.
    record_winner(&mut schedule.matches[2], players[1].id, Utc::now()).unwrap();
    assert_eq!(next_match(&schedule.matches).map(|m| m.sequence), Some(1));

    record_winner(&mut schedule.matches[0], players[0].id, Utc::now()).unwrap();
    assert_eq!(next_match(&schedule.matches).map(|m| m.sequence), Some(2));

    record_winner(&mut schedule.matches[1], players[2].id, Utc::now()).unwrap();
    assert!(next_match(&schedule.matches).is_none());
    assert!(next_match(&[]).is_none());
}

#[test]
fn leaderboard_after_first_result() {
    let players = roster(&["Alice", "Bob", "Carol"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    record_winner(&mut schedule.matches[0], players[0].id, Utc::now()).unwrap();

    let rows: Vec<(String, u32)> = leaderboard(&players, &schedule.matches)
        .into_iter()
        .map(|e| (e.name, e.wins))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 0),
            ("Carol".to_string(), 0)
        ]
    );
}

#[test]
fn leaderboard_ties_break_by_registration_order() {
    let players = roster(&["Alice", "Bob", "Carol"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    // Carol beats Alice, Bob beats Carol: Bob and Carol on 1, Alice on 0.
    record_winner(&mut schedule.matches[1], players[2].id, Utc::now()).unwrap();
    record_winner(&mut schedule.matches[2], players[1].id, Utc::now()).unwrap();

    let board = leaderboard(&players, &schedule.matches);
    let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Carol", "Alice"]);

    let total: u32 = board.iter().map(|e| e.wins).sum();
    assert_eq!(total as usize, progress(&schedule.matches).decided);
}

#[test]
fn leaderboard_lists_only_scheduled_players() {
    let mut players = roster(&["Alice", "Bob"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    players.push(Player::new("Late"));

    let board = leaderboard(&players, &schedule.matches);
    assert_eq!(board.len(), 2);
    assert!(board.iter().all(|e| e.name != "Late"));
    assert!(leaderboard(&players, &[]).is_empty());
}

#[test]
fn progress_counts_decided_and_remaining() {
    let players = roster(&["A", "B", "C", "D"]);
    let mut schedule = Schedule::new(Uuid::new_v4());
    generate_round_robin(&players, &mut schedule, Utc::now());
    record_winner(&mut schedule.matches[0], players[0].id, Utc::now()).unwrap();

    let p = progress(&schedule.matches);
    assert_eq!((p.total, p.decided, p.remaining), (6, 1, 5));
}

#[test]
fn players_missing_from_the_roster_rank_last_as_unknown() {
    let players = roster(&["A", "B"]);
    let game_type = Uuid::new_v4();
    let mut schedule = Schedule::new(game_type);
    generate_round_robin(&players, &mut schedule, Utc::now());
    let ghost = Uuid::new_v4();
    schedule
        .matches
        .push(GameMatch::new(game_type, 2, players[0].id, ghost, Utc::now()));

    let rows = |matches: &[GameMatch]| -> Vec<(String, u32)> {
        leaderboard(&players, matches)
            .into_iter()
            .map(|e| (e.name, e.wins))
            .collect()
    };
    assert_eq!(
        rows(&schedule.matches),
        vec![
            ("A".to_string(), 0),
            ("B".to_string(), 0),
            ("unknown".to_string(), 0)
        ]
    );

    // Wins still come first: a winning unknown id outranks winless roster players.
    record_winner(&mut schedule.matches[1], ghost, Utc::now()).unwrap();
    let board = leaderboard(&players, &schedule.matches);
    assert_eq!(board[0].player_id, ghost);
    assert_eq!(
        rows(&schedule.matches),
        vec![
            ("unknown".to_string(), 1),
            ("A".to_string(), 0),
            ("B".to_string(), 0)
        ]
    );
}
