//! TournamentStore: the roster, every game type's schedule, and the locking
//! that keeps them consistent under concurrent requests.
//!
//! Lock order is always roster -> schedule map -> one schedule -> match index.
//! Recording a winner reads the match index and releases it before locking the
//! schedule, so it never holds both.
//! Generation holds the game type's schedule write lock across the whole
//! "pair absent? insert" step, and recording a winner holds the owning
//! schedule's write lock across the Unplayed check and the transition, so
//! neither can race with itself. Reads clone under read locks.

use crate::logic;
use crate::models::{
    Entity, GameMatch, GameType, GameTypeId, GameTypeOverview, LeaderboardEntry, MatchId,
    MatchView, Player, PlayerId, Schedule, Snapshot, TournamentError,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

#[derive(Debug, Default)]
struct Roster {
    /// Registration order.
    players: Vec<Player>,
    /// Creation order.
    game_types: Vec<GameType>,
}

type SharedSchedule = Arc<RwLock<Schedule>>;

/// In-memory tournament state, optionally mirrored to a JSON snapshot file.
#[derive(Debug, Default)]
pub struct TournamentStore {
    roster: RwLock<Roster>,
    schedules: RwLock<HashMap<GameTypeId, SharedSchedule>>,
    match_index: RwLock<HashMap<MatchId, GameTypeId>>,
    data_file: Option<PathBuf>,
    persist_lock: Mutex<()>,
}

impl TournamentStore {
    /// Empty store that never touches the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by `path`: loads it if present, starts empty otherwise, and
    /// rewrites it after every successful write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TournamentError> {
        let path = path.into();
        let snapshot: Snapshot = if path.exists() {
            let file = File::open(&path)
                .map_err(|e| TournamentError::Storage(format!("open {}: {e}", path.display())))?;
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| TournamentError::Storage(format!("parse {}: {e}", path.display())))?
        } else {
            log::info!("No snapshot at {}, starting empty", path.display());
            Snapshot::default()
        };
        let mut store = Self::from_snapshot(snapshot)?;
        store.data_file = Some(path);
        Ok(store)
    }

    /// Rebuild a store from a snapshot. Game types without a schedule get an empty one.
    ///
    /// Rejects snapshots that break the schedule invariants: a match id used
    /// twice, a pair scheduled twice within a game type, a sequence number used
    /// twice, or a winner who did not play the match.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, TournamentError> {
        let Snapshot {
            players,
            game_types,
            schedules,
        } = snapshot;

        let mut by_type: HashMap<GameTypeId, Schedule> = schedules
            .into_iter()
            .map(|s| (s.game_type_id, s))
            .collect();
        let mut index = HashMap::new();
        let mut shared = HashMap::new();
        for gt in &game_types {
            let mut schedule = by_type.remove(&gt.id).unwrap_or_else(|| Schedule::new(gt.id));
            schedule.matches.sort_by_key(|m| m.sequence);
            check_schedule(&schedule)?;
            let floor = match schedule.matches.last() {
                Some(m) => m.sequence.checked_add(1).ok_or_else(|| {
                    TournamentError::Storage(format!(
                        "game type {}: sequence numbers exhausted",
                        gt.id
                    ))
                })?,
                None => 1,
            };
            schedule.next_sequence = schedule.next_sequence.max(floor);
            for m in &schedule.matches {
                if index.insert(m.id, gt.id).is_some() {
                    return Err(TournamentError::Storage(format!(
                        "match {} appears more than once",
                        m.id
                    )));
                }
            }
            shared.insert(gt.id, Arc::new(RwLock::new(schedule)));
        }
        if !by_type.is_empty() {
            log::warn!("Dropping {} schedule(s) with no matching game type", by_type.len());
        }

        Ok(Self {
            roster: RwLock::new(Roster {
                players,
                game_types,
            }),
            schedules: RwLock::new(shared),
            match_index: RwLock::new(index),
            data_file: None,
            persist_lock: Mutex::new(()),
        })
    }

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> Result<Snapshot, TournamentError> {
        let roster = self.roster.read()?;
        let map = self.schedules.read()?;
        let mut schedules = Vec::with_capacity(roster.game_types.len());
        for gt in &roster.game_types {
            if let Some(schedule) = map.get(&gt.id) {
                schedules.push(schedule.read()?.clone());
            }
        }
        Ok(Snapshot {
            players: roster.players.clone(),
            game_types: roster.game_types.clone(),
            schedules,
        })
    }

    // --- roster ---

    pub fn list_players(&self) -> Result<Vec<Player>, TournamentError> {
        Ok(self.roster.read()?.players.clone())
    }

    pub fn player(&self, id: PlayerId) -> Result<Player, TournamentError> {
        self.roster
            .read()?
            .players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Player, id))
    }

    /// Register a player at the end of the roster.
    pub fn create_player(&self, name: &str) -> Result<Player, TournamentError> {
        let name = logic::validate_name("Player", name).map_err(|e| {
            log::warn!("Rejected player registration: {e}");
            e
        })?;
        let player = Player::new(name);
        self.roster.write()?.players.push(player.clone());
        log::info!("Registered player {} ({})", player.name, player.id);
        self.persist();
        Ok(player)
    }

    pub fn list_game_types(&self) -> Result<Vec<GameType>, TournamentError> {
        Ok(self.roster.read()?.game_types.clone())
    }

    pub fn game_type(&self, id: GameTypeId) -> Result<GameType, TournamentError> {
        self.roster
            .read()?
            .game_types
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::GameType, id))
    }

    /// Create a game type with an empty schedule.
    pub fn create_game_type(&self, name: &str) -> Result<GameType, TournamentError> {
        let name = logic::validate_name("Game type", name).map_err(|e| {
            log::warn!("Rejected game type: {e}");
            e
        })?;
        let game_type = GameType::new(name);
        {
            let mut roster = self.roster.write()?;
            let mut map = self.schedules.write()?;
            map.insert(game_type.id, Arc::new(RwLock::new(Schedule::new(game_type.id))));
            roster.game_types.push(game_type.clone());
        }
        log::info!("Created game type {} ({})", game_type.name, game_type.id);
        self.persist();
        Ok(game_type)
    }

    // --- schedule ---

    fn schedule_for(&self, id: GameTypeId) -> Result<SharedSchedule, TournamentError> {
        self.schedules
            .read()?
            .get(&id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::GameType, id))
    }

    /// Pair every registered player with every other one for `game_type_id`,
    /// skipping pairs that already have a match. Returns the full schedule.
    pub fn generate(&self, game_type_id: GameTypeId) -> Result<Vec<MatchView>, TournamentError> {
        let roster = self.roster.read()?;
        let shared = self.schedule_for(game_type_id)?;
        let mut schedule = shared.write()?;

        let created = logic::generate_round_robin(&roster.players, &mut schedule, Utc::now());
        if !created.is_empty() {
            let mut index = self.match_index.write()?;
            for m in &created {
                index.insert(m.id, game_type_id);
            }
        }
        log::info!(
            "Generated {} new match(es) for game type {} ({} total)",
            created.len(),
            game_type_id,
            schedule.matches.len()
        );
        let views = views(&schedule.matches, &roster.players);
        drop(schedule);
        drop(roster);

        if !created.is_empty() {
            self.persist();
        }
        Ok(views)
    }

    /// The schedule of `game_type_id` in sequence order.
    pub fn list_matches(&self, game_type_id: GameTypeId) -> Result<Vec<MatchView>, TournamentError> {
        let roster = self.roster.read()?;
        let shared = self.schedule_for(game_type_id)?;
        let schedule = shared.read()?;
        log::debug!("Listing {} match(es) for {}", schedule.matches.len(), game_type_id);
        Ok(views(&schedule.matches, &roster.players))
    }

    fn owner_of(&self, match_id: MatchId) -> Result<SharedSchedule, TournamentError> {
        let game_type_id = self
            .match_index
            .read()?
            .get(&match_id)
            .copied()
            .ok_or(TournamentError::not_found(Entity::Match, match_id))?;
        self.schedule_for(game_type_id)
    }

    pub fn get_match(&self, match_id: MatchId) -> Result<MatchView, TournamentError> {
        let game = self.raw_match(match_id)?;
        let roster = self.roster.read()?;
        Ok(MatchView::from_match(&game, &roster.players))
    }

    fn raw_match(&self, match_id: MatchId) -> Result<GameMatch, TournamentError> {
        let shared = self.owner_of(match_id)?;
        let schedule = shared.read()?;
        schedule
            .get(match_id)
            .cloned()
            .ok_or(TournamentError::not_found(Entity::Match, match_id))
    }

    /// Decide `match_id` in favour of `winner_id`. Only the first call succeeds.
    pub fn record_winner(
        &self,
        match_id: MatchId,
        winner_id: PlayerId,
    ) -> Result<MatchView, TournamentError> {
        let shared = self.owner_of(match_id)?;
        let decided = {
            let mut schedule = shared.write()?;
            let game = schedule
                .get_mut(match_id)
                .ok_or(TournamentError::not_found(Entity::Match, match_id))?;
            if let Err(e) = logic::record_winner(game, winner_id, Utc::now()) {
                log::warn!("Rejected result for match {match_id}: {e}");
                return Err(e);
            }
            game.clone()
        };
        log::info!(
            "Match {} (seq {}) decided, winner {}",
            decided.id,
            decided.sequence,
            winner_id
        );
        self.persist();

        let roster = self.roster.read()?;
        Ok(MatchView::from_match(&decided, &roster.players))
    }

    // --- derived reads ---

    /// Earliest unplayed match of `game_type_id`, or None when all are decided.
    pub fn next_match(&self, game_type_id: GameTypeId) -> Result<Option<MatchView>, TournamentError> {
        let roster = self.roster.read()?;
        let shared = self.schedule_for(game_type_id)?;
        let schedule = shared.read()?;
        Ok(logic::next_match(&schedule.matches).map(|m| MatchView::from_match(m, &roster.players)))
    }

    pub fn leaderboard(
        &self,
        game_type_id: GameTypeId,
    ) -> Result<Vec<LeaderboardEntry>, TournamentError> {
        let roster = self.roster.read()?;
        let shared = self.schedule_for(game_type_id)?;
        let schedule = shared.read()?;
        Ok(logic::leaderboard(&roster.players, &schedule.matches))
    }

    /// Next match, progress and leaderboard for every game type, in creation order.
    pub fn overview(&self) -> Result<Vec<GameTypeOverview>, TournamentError> {
        let roster = self.roster.read()?;
        let mut out = Vec::with_capacity(roster.game_types.len());
        for gt in &roster.game_types {
            let shared = self.schedule_for(gt.id)?;
            let schedule = shared.read()?;
            out.push(GameTypeOverview {
                game_type: gt.clone(),
                next_match: logic::next_match(&schedule.matches)
                    .map(|m| MatchView::from_match(m, &roster.players)),
                progress: logic::progress(&schedule.matches),
                leaderboard: logic::leaderboard(&roster.players, &schedule.matches),
            });
        }
        Ok(out)
    }

    // --- persistence ---

    /// Write the snapshot file if one is configured. A failed write is logged and
    /// retried implicitly by the next successful write; the in-memory change stands.
    fn persist(&self) {
        let Some(path) = &self.data_file else {
            return;
        };
        if let Err(e) = self.write_snapshot(path) {
            log::error!("Failed to persist snapshot to {}: {e}", path.display());
        }
    }

    fn write_snapshot(&self, path: &Path) -> Result<(), TournamentError> {
        let _guard = self.persist_lock.lock()?;
        let snapshot = self.snapshot()?;
        let tmp = path.with_extension("json.tmp");

        let file = File::create(&tmp).map_err(storage_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(storage_error)?;
        writer.flush().map_err(storage_error)?;
        std::fs::rename(&tmp, path).map_err(storage_error)?;
        log::debug!("Snapshot written to {}", path.display());
        Ok(())
    }
}

/// Invariant check for one loaded schedule, already sorted by sequence.
fn check_schedule(schedule: &Schedule) -> Result<(), TournamentError> {
    let corrupt = |what: String| {
        TournamentError::Storage(format!("game type {}: {what}", schedule.game_type_id))
    };
    let mut pairs = HashSet::new();
    for (i, m) in schedule.matches.iter().enumerate() {
        if m.game_type_id != schedule.game_type_id {
            return Err(corrupt(format!("match {} belongs to {}", m.id, m.game_type_id)));
        }
        if m.player_a == m.player_b {
            return Err(corrupt(format!("match {} pairs a player with themselves", m.id)));
        }
        if !pairs.insert(m.pair_key()) {
            return Err(corrupt(format!("pair in match {} is scheduled twice", m.id)));
        }
        if i > 0 && schedule.matches[i - 1].sequence == m.sequence {
            return Err(corrupt(format!("sequence {} is used twice", m.sequence)));
        }
        if let Some(winner) = m.winner {
            if !m.involves(winner) {
                return Err(corrupt(format!("winner {winner} did not play match {}", m.id)));
            }
        }
    }
    Ok(())
}

fn storage_error(e: impl std::fmt::Display) -> TournamentError {
    TournamentError::Storage(e.to_string())
}

fn views(matches: &[GameMatch], roster: &[Player]) -> Vec<MatchView> {
    matches
        .iter()
        .map(|m| MatchView::from_match(m, roster))
        .collect()
}
