use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const MAX_HOLES: usize = 18;

/// Wire value for a conceded / picked-up hole.
pub const CONCEDED_SENTINEL: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleDefinition {
    pub hole_number: u8,
    pub par: u8,
    pub stroke_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A player, or a whole team in formats where the team plays one ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    // Negative values are "plus" handicaps.
    #[serde(default)]
    pub handicap: Option<f32>,
    #[serde(default)]
    pub tee: Option<String>,
}

impl Player {
    pub fn new(id: &str, name: &str, handicap: Option<f32>) -> Self {
        Self {
            id: PlayerId::from(id),
            name: name.to_string(),
            handicap,
            tee: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub name: String,
    pub players: Vec<PlayerId>,
}

impl Side {
    pub fn new(name: &str, players: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            players: players.iter().map(|p| PlayerId::from(*p)).collect(),
        }
    }
}

/// A recorded hole score. Absence (not yet entered) is modelled by `Option`,
/// never by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Score {
    Strokes(u8),
    Conceded,
}

impl Score {
    pub fn strokes(&self) -> Option<u8> {
        match self {
            Self::Strokes(s) => Some(*s),
            Self::Conceded => None,
        }
    }

    pub fn is_conceded(&self) -> bool {
        matches!(self, Self::Conceded)
    }
}

impl TryFrom<i32> for Score {
    type Error = GolfcardError;

    fn try_from(v: i32) -> GcResult<Self> {
        match v {
            CONCEDED_SENTINEL => Ok(Self::Conceded),
            0..=255 => Ok(Self::Strokes(v as u8)),
            _ => Err(GolfcardError::invalid(
                "score",
                format!("{} is not a stroke count or the conceded marker", v),
            )),
        }
    }
}

impl From<Score> for i32 {
    fn from(s: Score) -> i32 {
        match s {
            Score::Strokes(n) => n as i32,
            Score::Conceded => CONCEDED_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleScoreEntry {
    pub hole_number: u8,
    #[serde(default)]
    pub scores: BTreeMap<PlayerId, Option<Score>>,
}

impl HoleScoreEntry {
    pub fn new(hole_number: u8) -> Self {
        Self {
            hole_number,
            scores: BTreeMap::new(),
        }
    }

    pub fn with_strokes(mut self, player: &str, strokes: u8) -> Self {
        self.scores
            .insert(PlayerId::from(player), Some(Score::Strokes(strokes)));
        self
    }

    pub fn with_conceded(mut self, player: &str) -> Self {
        self.scores
            .insert(PlayerId::from(player), Some(Score::Conceded));
        self
    }

    /// `None` when the player has nothing entered for this hole.
    pub fn score_of(&self, player: &PlayerId) -> Option<Score> {
        self.scores.get(player).copied().flatten()
    }

    pub fn has_all(&self, players: &[PlayerId]) -> bool {
        players.iter().all(|p| self.score_of(p).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub holes: Vec<HoleDefinition>,
}

impl Course {
    pub fn new(mut holes: Vec<HoleDefinition>) -> GcResult<Self> {
        if holes.is_empty() || holes.len() > MAX_HOLES {
            return Err(GolfcardError::invalid(
                "holes",
                format!("a course has 1..={} holes, got {}", MAX_HOLES, holes.len()),
            ));
        }
        holes.sort_by_key(|h| h.hole_number);

        let n = holes.len() as u8;
        let mut indices = BTreeSet::new();
        for (i, h) in holes.iter().enumerate() {
            if h.hole_number != i as u8 + 1 {
                return Err(GolfcardError::invalid(
                    "holeNumber",
                    format!("holes must be numbered 1..={} without gaps", n),
                ));
            }
            if !(3..=5).contains(&h.par) {
                return Err(GolfcardError::invalid(
                    "par",
                    format!("hole {} has par {}", h.hole_number, h.par),
                ));
            }
            if h.stroke_index == 0 || h.stroke_index > n || !indices.insert(h.stroke_index) {
                return Err(GolfcardError::invalid(
                    "strokeIndex",
                    format!(
                        "hole {} has stroke index {}; indices must be a permutation of 1..={}",
                        h.hole_number, h.stroke_index, n
                    ),
                ));
            }
        }

        Ok(Self { holes })
    }

    /// Builds holes 1..N from parallel par / stroke index lists.
    pub fn from_pars(pars: &[u8], stroke_indices: &[u8]) -> GcResult<Self> {
        if pars.len() != stroke_indices.len() {
            return Err(GolfcardError::invalid(
                "holes",
                "par and stroke index lists differ in length",
            ));
        }
        let holes = pars
            .iter()
            .zip(stroke_indices)
            .enumerate()
            .map(|(i, (&par, &stroke_index))| HoleDefinition {
                hole_number: i as u8 + 1,
                par,
                stroke_index,
            })
            .collect();
        Self::new(holes)
    }

    pub fn hole(&self, number: u8) -> Option<&HoleDefinition> {
        self.holes.get((number as usize).checked_sub(1)?)
    }

    pub fn hole_count(&self) -> u8 {
        self.holes.len() as u8
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| h.par as u32).sum()
    }
}

/// The editable per-hole log of a game: one entry per hole, later writes win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLog {
    entries: BTreeMap<u8, HoleScoreEntry>,
}

impl ScoreLog {
    pub fn new(course: &Course, roster: &[PlayerId], entries: &[HoleScoreEntry]) -> GcResult<Self> {
        let known: BTreeSet<&PlayerId> = roster.iter().collect();
        let mut log = BTreeMap::new();

        for entry in entries {
            if course.hole(entry.hole_number).is_none() {
                return Err(GolfcardError::invalid(
                    "holeNumber",
                    format!(
                        "hole {} is not on a {}-hole course",
                        entry.hole_number,
                        course.hole_count()
                    ),
                ));
            }
            if let Some(stranger) = entry.scores.keys().find(|id| !known.contains(id)) {
                return Err(GolfcardError::invalid(
                    "playerId",
                    format!("'{}' is not part of this game", stranger),
                ));
            }
            log.insert(entry.hole_number, entry.clone());
        }

        Ok(Self { entries: log })
    }

    pub fn entry(&self, hole_number: u8) -> Option<&HoleScoreEntry> {
        self.entries.get(&hole_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HoleScoreEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
