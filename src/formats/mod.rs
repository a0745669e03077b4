pub mod copenhagen;
pub mod match_play;
pub mod scramble;
pub mod skins;
pub mod stroke_play;
pub mod wolf;

use crate::config::EngineConfig;
use crate::course::{Course, HoleDefinition, HoleScoreEntry, Player, PlayerId, ScoreLog, Side};
use crate::error::{GcResult, GolfcardError};
use crate::handicap::StrokeAllocator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use self::copenhagen::{CopenhagenOutcome, PressRequest};
use self::match_play::MatchOutcome;
use self::scramble::UmbriagoOutcome;
use self::skins::SkinsOutcome;
use self::stroke_play::StrokePlayOutcome;
use self::wolf::{WolfChoice, WolfOutcome};

/// Everything an engine reads; built once per recomputation.
pub struct GameContext<'a> {
    pub course: &'a Course,
    pub players: &'a [Player],
    pub log: &'a ScoreLog,
    pub allocator: &'a StrokeAllocator,
    pub config: &'a EngineConfig,
}

impl GameContext<'_> {
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Holes in play order with whatever has been entered for each.
    pub fn holes(&self) -> impl Iterator<Item = (&HoleDefinition, Option<&HoleScoreEntry>)> {
        self.course
            .holes
            .iter()
            .map(move |h| (h, self.log.entry(h.hole_number)))
    }
}

/// Effective scores for `players`, in order. Outer `None`: someone has not
/// entered a score, so the hole is unresolved. Inner `None`: conceded.
pub fn effective_scores(
    entry: Option<&HoleScoreEntry>,
    hole: &HoleDefinition,
    players: &[PlayerId],
    allocator: &StrokeAllocator,
) -> GcResult<Option<Vec<Option<i32>>>> {
    let Some(entry) = entry else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(players.len());
    for p in players {
        match entry.score_of(p) {
            Some(score) => out.push(allocator.effective(p, hole, score)?),
            None => return Ok(None),
        }
    }
    Ok(Some(out))
}

/// Lowest counted score of a group; `None` if every member conceded.
pub fn best_ball(scores: &[Option<i32>]) -> Option<i32> {
    scores.iter().flatten().copied().min()
}

/// Lower is better; a conceded score loses to any counted one.
pub fn compare_counted(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn require_players(
    field: &'static str,
    ids: &[PlayerId],
    roster: &[Player],
) -> GcResult<()> {
    for id in ids {
        if !roster.iter().any(|p| &p.id == id) {
            return Err(GolfcardError::invalid(
                field,
                format!("'{}' is not part of this game", id),
            ));
        }
    }
    let mut seen = ids.to_vec();
    seen.sort();
    seen.dedup();
    if seen.len() != ids.len() {
        return Err(GolfcardError::invalid(field, "a player is listed twice"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FormatKind {
    StrokePlay,
    MatchPlay,
    BestBall,
    Skins,
    Wolf,
    Copenhagen,
    Scramble,
    Umbriago,
}

/// Game format with its format-specific setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GameFormat {
    StrokePlay,
    MatchPlay {
        side_a: Side,
        side_b: Side,
    },
    BestBall {
        side_a: Side,
        side_b: Side,
    },
    Skins,
    Wolf {
        #[serde(default)]
        choices: BTreeMap<u8, WolfChoice>,
        #[serde(default)]
        wolf_overrides: BTreeMap<u8, PlayerId>,
    },
    Copenhagen {
        #[serde(default)]
        presses: Vec<PressRequest>,
    },
    Scramble,
    Umbriago {
        side_a: Side,
        side_b: Side,
        #[serde(default)]
        closest_to_pin: BTreeMap<u8, PlayerId>,
    },
}

impl GameFormat {
    pub fn kind(&self) -> FormatKind {
        match self {
            Self::StrokePlay => FormatKind::StrokePlay,
            Self::MatchPlay { .. } => FormatKind::MatchPlay,
            Self::BestBall { .. } => FormatKind::BestBall,
            Self::Skins => FormatKind::Skins,
            Self::Wolf { .. } => FormatKind::Wolf,
            Self::Copenhagen { .. } => FormatKind::Copenhagen,
            Self::Scramble => FormatKind::Scramble,
            Self::Umbriago { .. } => FormatKind::Umbriago,
        }
    }

    /// Single dispatch point from format tag to engine.
    pub fn score(&self, ctx: &GameContext) -> GcResult<GameOutcome> {
        debug!(
            "Scoring {} over {} recorded holes",
            self.kind(),
            ctx.log.len()
        );
        let outcome = match self {
            Self::StrokePlay => GameOutcome::StrokePlay(stroke_play::score(ctx)?),
            Self::MatchPlay { side_a, side_b } => {
                if side_a.players.len() != 1 || side_b.players.len() != 1 {
                    return Err(GolfcardError::invalid(
                        "sides",
                        "match play is one player against one; use best_ball for teams",
                    ));
                }
                GameOutcome::Match(match_play::score(ctx, side_a, side_b)?)
            }
            Self::BestBall { side_a, side_b } => {
                GameOutcome::Match(match_play::score(ctx, side_a, side_b)?)
            }
            Self::Skins => GameOutcome::Skins(skins::score(ctx)?),
            Self::Wolf {
                choices,
                wolf_overrides,
            } => GameOutcome::Wolf(wolf::score(ctx, choices, wolf_overrides)?),
            Self::Copenhagen { presses } => {
                GameOutcome::Copenhagen(copenhagen::score(ctx, presses)?)
            }
            Self::Scramble => GameOutcome::Scramble(scramble::score_scramble(ctx)?),
            Self::Umbriago {
                side_a,
                side_b,
                closest_to_pin,
            } => GameOutcome::Umbriago(scramble::score_umbriago(
                ctx,
                side_a,
                side_b,
                closest_to_pin,
            )?),
        };
        Ok(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum GameOutcome {
    StrokePlay(StrokePlayOutcome),
    Match(MatchOutcome),
    Skins(SkinsOutcome),
    Wolf(WolfOutcome),
    Copenhagen(CopenhagenOutcome),
    Scramble(StrokePlayOutcome),
    Umbriago(UmbriagoOutcome),
}

impl GameOutcome {
    /// Holes whose result is fully determined.
    pub fn resolved_holes(&self) -> usize {
        match self {
            Self::StrokePlay(o) | Self::Scramble(o) => o.holes.iter().filter(|h| h.complete).count(),
            Self::Match(o) => o.holes.iter().filter(|h| h.resolved).count(),
            Self::Skins(o) => o.holes.iter().filter(|h| h.resolved).count(),
            Self::Wolf(o) => o.holes.iter().filter(|h| h.resolved).count(),
            Self::Copenhagen(o) => o.holes.iter().filter(|h| h.resolved).count(),
            Self::Umbriago(o) => o.holes.iter().filter(|h| h.resolved).count(),
        }
    }
}
