//! Round/game aggregation: folds per-hole results into the series and totals
//! the reports display, and rolls strokes gained up by shot type and band.

use crate::config::EngineConfig;
use crate::course::Course;
use crate::error::GcResult;
use crate::formats::match_play::{MatchOutcome, MatchSide};
use crate::formats::GameOutcome;
use crate::strokes_gained::{Lie, ShotRecord, ShotType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Match status after each counted hole, side A's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPoint {
    pub hole_number: u8,
    pub status: i32,
}

pub fn match_status_history(outcome: &MatchOutcome) -> Vec<StatusPoint> {
    outcome
        .holes
        .iter()
        .filter(|h| h.resolved)
        .map(|h| StatusPoint {
            hole_number: h.hole_number,
            status: h.status_after,
        })
        .collect()
}

/// Every hole of the course has a fully determined result.
pub fn is_round_complete(outcome: &GameOutcome, course: &Course) -> bool {
    outcome.resolved_holes() == course.hole_count() as usize
}

/// One line of the final standings, whatever the format counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalLine {
    pub name: String,
    pub value: i64,
    pub display: String,
}

pub fn final_totals(outcome: &GameOutcome) -> Vec<TotalLine> {
    let line = |name: &str, value: i64, display: String| TotalLine {
        name: name.to_string(),
        value,
        display,
    };
    match outcome {
        GameOutcome::StrokePlay(o) | GameOutcome::Scramble(o) => o
            .standings
            .iter()
            .map(|s| line(s.player.as_str(), s.to_par as i64, s.to_par_label()))
            .collect(),
        GameOutcome::Match(o) => [(MatchSide::A, &o.side_a), (MatchSide::B, &o.side_b)]
            .into_iter()
            .map(|(side, s)| {
                let status = match side {
                    MatchSide::A => o.state.status,
                    MatchSide::B => -o.state.status,
                };
                line(&s.name, status as i64, o.state.margin_text(side))
            })
            .collect(),
        GameOutcome::Skins(o) => o
            .skins_won
            .iter()
            .map(|(id, n)| line(id.as_str(), *n as i64, n.to_string()))
            .collect(),
        GameOutcome::Wolf(o) => o
            .total_points
            .iter()
            .map(|(id, n)| line(id.as_str(), *n as i64, n.to_string()))
            .collect(),
        GameOutcome::Copenhagen(o) => o
            .players
            .iter()
            .zip(o.totals)
            .map(|(id, n)| line(id.as_str(), n as i64, n.to_string()))
            .collect(),
        GameOutcome::Umbriago(o) => vec![
            line(&o.side_a.name, o.total_a as i64, o.total_a.to_string()),
            line(&o.side_b.name, o.total_b as i64, o.total_b.to_string()),
        ],
    }
}

/// Index of the band `distance` falls in: `edges.len() + 1` bands, the
/// last one open-ended.
pub fn band_index(edges: &[f64], distance: f64) -> usize {
    edges.iter().take_while(|e| distance >= **e).count()
}

pub fn band_label(edges: &[f64], index: usize) -> String {
    match (index.checked_sub(1).and_then(|i| edges.get(i)), edges.get(index)) {
        (None, Some(hi)) => format!("<{}m", hi),
        (Some(lo), Some(hi)) => format!("{}-{}m", lo, hi),
        (Some(lo), None) => format!("{}m+", lo),
        (None, None) => "all".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SgBucket {
    pub shot_type: ShotType,
    pub band: String,
    /// Start lie, for approach shots only.
    pub lie: Option<Lie>,
    pub shots: u32,
    pub total: f64,
}

impl SgBucket {
    pub fn average(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.total / self.shots as f64
        }
    }
}

/// Strokes gained bucketed by shot type and start-distance band. Putts use
/// the putting bands, tee and approach shots the long-game bands; approach
/// shots are further split by start lie.
pub fn rollup_strokes_gained(shots: &[ShotRecord], config: &EngineConfig) -> GcResult<Vec<SgBucket>> {
    let putting = config.get_putting_bands()?;
    let long_game = config.get_long_game_bands()?;

    let mut buckets: BTreeMap<(ShotType, usize, Option<Lie>), (u32, f64)> = BTreeMap::new();
    for shot in shots {
        let edges = match shot.shot_type {
            ShotType::Putt => &putting,
            ShotType::Tee | ShotType::Approach => &long_game,
        };
        let lie = (shot.shot_type == ShotType::Approach).then_some(shot.start_lie);
        let key = (shot.shot_type, band_index(edges, shot.start_distance), lie);
        let slot = buckets.entry(key).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += shot.strokes_gained;
    }

    Ok(buckets
        .into_iter()
        .map(|((shot_type, band, lie), (count, total))| {
            let edges = match shot_type {
                ShotType::Putt => &putting,
                _ => &long_game,
            };
            SgBucket {
                shot_type,
                band: band_label(edges, band),
                lie,
                shots: count,
                total,
            }
        })
        .collect())
}

/// Total strokes gained per shot type.
pub fn totals_by_type(shots: &[ShotRecord]) -> BTreeMap<ShotType, f64> {
    let mut out: BTreeMap<ShotType, f64> = ShotType::iter().map(|t| (t, 0.0)).collect();
    for s in shots {
        *out.entry(s.shot_type).or_default() += s.strokes_gained;
    }
    out
}

/// Shots tracked over one round, and how far the round got.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundShots {
    pub round_id: String,
    pub hole_count: u8,
    pub holes_completed: u8,
    pub shots: Vec<ShotRecord>,
}

impl RoundShots {
    pub fn is_complete(&self) -> bool {
        self.hole_count > 0 && self.holes_completed >= self.hole_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAverages {
    pub rounds: u32,
    pub total: f64,
    pub by_type: BTreeMap<ShotType, f64>,
}

/// Per-round strokes-gained averages over complete rounds only. Partial
/// rounds are left out of both the sums and the count, and a complete
/// 9-hole round counts as one round. `None` when no round is complete.
pub fn per_round_average(rounds: &[RoundShots]) -> Option<RoundAverages> {
    let complete: Vec<_> = rounds.iter().filter(|r| r.is_complete()).collect();
    if complete.is_empty() {
        return None;
    }
    let n = complete.len() as f64;
    let mut by_type: BTreeMap<ShotType, f64> = ShotType::iter().map(|t| (t, 0.0)).collect();
    for r in &complete {
        for (t, v) in totals_by_type(&r.shots) {
            *by_type.entry(t).or_default() += v;
        }
    }
    for v in by_type.values_mut() {
        *v /= n;
    }
    Some(RoundAverages {
        rounds: complete.len() as u32,
        total: by_type.values().sum(),
        by_type,
    })
}
