use crate::aggregate::{self, StatusPoint, TotalLine};
use crate::config::EngineConfig;
use crate::course::{Course, HoleScoreEntry, Player, PlayerId, ScoreLog};
use crate::error::{GcResult, GolfcardError};
use crate::formats::copenhagen::{self, PressRequest};
use crate::formats::{GameContext, GameFormat, GameOutcome};
use crate::handicap::StrokeAllocator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// Everything fixed at game setup. For scramble the roster holds teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub game_id: String,
    pub course: Course,
    pub players: Vec<Player>,
    #[serde(default)]
    pub use_handicaps: bool,
    pub game: GameFormat,
}

/// A setup together with the holes recorded so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(flatten)]
    pub setup: GameSetup,
    #[serde(default)]
    pub holes: Vec<HoleScoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub game_id: String,
    pub format: String,
    pub outcome: GameOutcome,
    pub totals: Vec<TotalLine>,
    /// Match formats only.
    pub match_history: Option<Vec<StatusPoint>>,
    pub holes_resolved: usize,
    pub round_complete: bool,
}

/// One full recomputation of a game from its recorded holes. Pure and
/// idempotent: the same inputs always give the same report.
pub fn score_game(
    setup: &GameSetup,
    entries: &[HoleScoreEntry],
    config: &EngineConfig,
) -> GcResult<GameReport> {
    config.validate()?;
    let course = Course::new(setup.course.holes.clone())?;
    if setup.players.is_empty() {
        return Err(GolfcardError::invalid("players", "a game needs at least one player"));
    }
    let ids: Vec<PlayerId> = setup.players.iter().map(|p| p.id.clone()).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    if unique.len() != ids.len() {
        return Err(GolfcardError::invalid("players", "player ids must be unique"));
    }

    let log = ScoreLog::new(&course, &ids, entries)?;
    let allocator = if setup.use_handicaps {
        StrokeAllocator::from_roster(&setup.players, config.handicap_basis, course.hole_count())?
    } else {
        StrokeAllocator::gross(course.hole_count())
    };

    let ctx = GameContext {
        course: &course,
        players: &setup.players,
        log: &log,
        allocator: &allocator,
        config,
    };
    let outcome = setup.game.score(&ctx)?;

    let match_history = match &outcome {
        GameOutcome::Match(m) => Some(aggregate::match_status_history(m)),
        _ => None,
    };
    let report = GameReport {
        game_id: setup.game_id.clone(),
        format: setup.game.kind().to_string(),
        totals: aggregate::final_totals(&outcome),
        match_history,
        holes_resolved: outcome.resolved_holes(),
        round_complete: aggregate::is_round_complete(&outcome, &course),
        outcome,
    };
    debug!(
        "Game {} recomputed: {}/{} holes resolved",
        report.game_id,
        report.holes_resolved,
        course.hole_count()
    );
    Ok(report)
}

/// Takes a Copenhagen press against the scores recorded so far and returns
/// the setup with the press appended. Once stored, the press stands even if
/// earlier holes are edited later.
pub fn request_press(
    setup: &GameSetup,
    entries: &[HoleScoreEntry],
    config: &EngineConfig,
    request: PressRequest,
) -> GcResult<GameSetup> {
    let GameFormat::Copenhagen { presses } = &setup.game else {
        return Err(GolfcardError::invalid(
            "presses",
            format!("{} has no presses", setup.game.kind()),
        ));
    };
    let report = score_game(setup, entries, config)?;
    if let GameOutcome::Copenhagen(outcome) = &report.outcome {
        copenhagen::check_press(outcome, &request)?;
    }

    let mut presses = presses.clone();
    presses.push(request);
    let updated = GameSetup {
        game: GameFormat::Copenhagen { presses },
        ..setup.clone()
    };
    // Structural checks (hole range) on the new press.
    score_game(&updated, entries, config)?;
    info!("Press taken in game {}", setup.game_id);
    Ok(updated)
}

/// Record store collaborator: read all holes of a game, upsert one hole.
pub trait HoleStore {
    fn read_holes(&self, game_id: &str) -> GcResult<Vec<HoleScoreEntry>>;
    fn upsert_hole(&self, game_id: &str, entry: HoleScoreEntry) -> GcResult<()>;
}

/// In-process store keyed by `(game_id, hole_number)`; the last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<BTreeMap<String, BTreeMap<u8, HoleScoreEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoleStore for MemoryStore {
    fn read_holes(&self, game_id: &str) -> GcResult<Vec<HoleScoreEntry>> {
        let guard = self
            .games
            .lock()
            .map_err(|e| GolfcardError::Store(e.to_string()))?;
        Ok(guard
            .get(game_id)
            .map(|holes| holes.values().cloned().collect())
            .unwrap_or_default())
    }

    fn upsert_hole(&self, game_id: &str, entry: HoleScoreEntry) -> GcResult<()> {
        let mut guard = self
            .games
            .lock()
            .map_err(|e| GolfcardError::Store(e.to_string()))?;
        guard
            .entry(game_id.to_string())
            .or_default()
            .insert(entry.hole_number, entry);
        Ok(())
    }
}

/// Stateless scoring over a store: every call recomputes the whole game
/// from whatever the store currently holds.
pub struct ScoringService<S: HoleStore> {
    store: S,
    config: EngineConfig,
}

impl<S: HoleStore> ScoringService<S> {
    pub fn new(store: S, config: EngineConfig) -> GcResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recompute(&self, setup: &GameSetup) -> GcResult<GameReport> {
        let holes = self.store.read_holes(&setup.game_id)?;
        score_game(setup, &holes, &self.config)
    }

    /// Saves one hole (replacing any earlier entry) and returns the fresh report.
    pub fn record_hole(&self, setup: &GameSetup, entry: HoleScoreEntry) -> GcResult<GameReport> {
        info!(
            "Recording hole {} for game {}",
            entry.hole_number, setup.game_id
        );
        self.store.upsert_hole(&setup.game_id, entry)?;
        self.recompute(setup)
    }

    pub fn request_press(&self, setup: &GameSetup, request: PressRequest) -> GcResult<GameSetup> {
        let holes = self.store.read_holes(&setup.game_id)?;
        request_press(setup, &holes, &self.config, request)
    }
}
