//! Copenhagen (sixes): three players split six points per hole.
//!
//! Presses are kept as a flat list; each one re-sums the main per-hole
//! points from its start hole onward.

use super::{compare_counted, effective_scores, require_players, GameContext};
use crate::course::PlayerId;
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumIter};
use tracing::debug;

pub const PLAYERS: usize = 3;
pub const POINTS_PER_HOLE: u8 = 6;

/// How the three net scores order once ties are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankPattern {
    Distinct,
    TieFirst,
    TieSecond,
    AllTied,
    Sweep,
}

/// Points by finishing position for every pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopenhagenPayouts {
    pub distinct: [u8; 3],
    pub tie_first: [u8; 3],
    pub tie_second: [u8; 3],
    pub all_tied: [u8; 3],
    pub sweep: [u8; 3],
}

impl Default for CopenhagenPayouts {
    fn default() -> Self {
        Self {
            distinct: [4, 2, 0],
            tie_first: [3, 3, 0],
            tie_second: [4, 1, 1],
            all_tied: [2, 2, 2],
            sweep: [6, 0, 0],
        }
    }
}

impl CopenhagenPayouts {
    pub fn for_pattern(&self, pattern: RankPattern) -> [u8; 3] {
        match pattern {
            RankPattern::Distinct => self.distinct,
            RankPattern::TieFirst => self.tie_first,
            RankPattern::TieSecond => self.tie_second,
            RankPattern::AllTied => self.all_tied,
            RankPattern::Sweep => self.sweep,
        }
    }

    /// Each row pays out exactly six points and tied places pay the same.
    pub fn validate(&self) -> GcResult<()> {
        let rows = [
            (RankPattern::Distinct, self.distinct),
            (RankPattern::TieFirst, self.tie_first),
            (RankPattern::TieSecond, self.tie_second),
            (RankPattern::AllTied, self.all_tied),
            (RankPattern::Sweep, self.sweep),
        ];
        for (pattern, row) in rows {
            let sum: u32 = row.iter().map(|p| *p as u32).sum();
            if sum != POINTS_PER_HOLE as u32 {
                return Err(GolfcardError::Config(format!(
                    "Copenhagen payout '{}' sums to {}, expected {}",
                    pattern, sum, POINTS_PER_HOLE
                )));
            }
        }
        let symmetric = self.tie_first[0] == self.tie_first[1]
            && self.tie_second[1] == self.tie_second[2]
            && self.all_tied.iter().all(|p| *p == self.all_tied[0]);
        if !symmetric {
            return Err(GolfcardError::Config(
                "Copenhagen payouts must give tied places equal points".into(),
            ));
        }
        Ok(())
    }
}

/// A trailing player asks for a new bet starting on the next hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressRequest {
    pub after_hole: u8,
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Press {
    pub id: u32,
    pub start_hole: u8,
    pub initiating_player_index: usize,
    pub is_active: bool,
    pub totals: [u32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopenhagenHole {
    pub hole_number: u8,
    /// Effective scores in roster order; `None` for a conceded hole.
    pub net: [Option<i32>; 3],
    pub pattern: Option<RankPattern>,
    pub points: [u8; 3],
    pub is_sweep: bool,
    pub sweep_winner: Option<PlayerId>,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopenhagenOutcome {
    pub players: Vec<PlayerId>,
    pub holes: Vec<CopenhagenHole>,
    pub totals: [u32; 3],
    pub presses: Vec<Press>,
}

/// Ranks three scores. Returns the pattern (sweep not yet applied) and the
/// finishing order as roster indices, best first.
pub fn rank_pattern(net: &[Option<i32>; 3]) -> (RankPattern, [usize; 3]) {
    let mut order = [0usize, 1, 2];
    order.sort_by(|a, b| compare_counted(net[*a], net[*b]));
    let [first, second, third] = order.map(|i| net[i]);

    let top_tied = compare_counted(first, second) == Ordering::Equal;
    let bottom_tied = compare_counted(second, third) == Ordering::Equal;
    let pattern = match (top_tied, bottom_tied) {
        (true, true) => RankPattern::AllTied,
        (true, false) => RankPattern::TieFirst,
        (false, true) => RankPattern::TieSecond,
        (false, false) => RankPattern::Distinct,
    };
    (pattern, order)
}

/// Point split for one resolved hole. A sweep needs an outright winner whose
/// counted score is under par.
pub fn hole_points(
    net: &[Option<i32>; 3],
    par: u8,
    payouts: &CopenhagenPayouts,
    sweeps: bool,
) -> (RankPattern, [u8; 3]) {
    let (mut pattern, order) = rank_pattern(net);
    let outright = matches!(pattern, RankPattern::Distinct | RankPattern::TieSecond);
    if sweeps && outright {
        if let Some(best) = net[order[0]] {
            if best < par as i32 {
                pattern = RankPattern::Sweep;
            }
        }
    }

    let row = payouts.for_pattern(pattern);
    let mut points = [0u8; 3];
    for (place, idx) in order.iter().enumerate() {
        points[*idx] = row[place];
    }
    (pattern, points)
}

fn sum_from(holes: &[CopenhagenHole], first: u8, last: u8) -> [u32; 3] {
    let mut totals = [0u32; 3];
    for h in holes
        .iter()
        .filter(|h| h.resolved && h.hole_number >= first && h.hole_number <= last)
    {
        for (t, p) in totals.iter_mut().zip(h.points) {
            *t += p as u32;
        }
    }
    totals
}

pub fn score(ctx: &GameContext, presses: &[PressRequest]) -> GcResult<CopenhagenOutcome> {
    let ids = ctx.player_ids();
    if ids.len() != PLAYERS {
        return Err(GolfcardError::invalid(
            "players",
            format!("Copenhagen is played by exactly 3 players, got {}", ids.len()),
        ));
    }
    let payouts = &ctx.config.copenhagen_payouts;
    payouts.validate()?;
    let sweeps = ctx.config.copenhagen_sweep_under_par;

    let mut holes = Vec::new();
    for (hole, entry) in ctx.holes() {
        let Some(entry) = entry else { continue };
        let Some(scores) = effective_scores(Some(entry), hole, &ids, ctx.allocator)? else {
            holes.push(CopenhagenHole {
                hole_number: hole.hole_number,
                net: [None; 3],
                pattern: None,
                points: [0; 3],
                is_sweep: false,
                sweep_winner: None,
                resolved: false,
            });
            continue;
        };
        let net = [scores[0], scores[1], scores[2]];
        let (pattern, points) = hole_points(&net, hole.par, payouts, sweeps);
        let is_sweep = pattern == RankPattern::Sweep;
        let sweep_winner = if is_sweep {
            points
                .iter()
                .position(|p| *p == POINTS_PER_HOLE)
                .map(|i| ids[i].clone())
        } else {
            None
        };
        if let Some(w) = &sweep_winner {
            debug!("Copenhagen sweep on hole {} by {}", hole.hole_number, w);
        }

        holes.push(CopenhagenHole {
            hole_number: hole.hole_number,
            net,
            pattern: Some(pattern),
            points,
            is_sweep,
            sweep_winner,
            resolved: true,
        });
    }

    let last_hole = ctx.course.hole_count();
    let totals = sum_from(&holes, 1, last_hole);
    let round_complete = holes.iter().filter(|h| h.resolved).count() == last_hole as usize;

    let mut out_presses = Vec::with_capacity(presses.len());
    for (i, req) in presses.iter().enumerate() {
        require_players("presses", std::slice::from_ref(&req.player), ctx.players)?;
        if req.after_hole == 0 || req.after_hole >= last_hole {
            return Err(GolfcardError::invalid(
                "presses",
                format!(
                    "a press must start after hole 1..{}, got {}",
                    last_hole - 1,
                    req.after_hole
                ),
            ));
        }
        // Trailing was checked when the press was taken; later edits to
        // earlier holes do not void it.
        let idx = ids.iter().position(|id| *id == req.player).unwrap_or_default();
        let start_hole = req.after_hole + 1;
        out_presses.push(Press {
            id: i as u32 + 1,
            start_hole,
            initiating_player_index: idx,
            is_active: !round_complete,
            totals: sum_from(&holes, start_hole, last_hole),
        });
    }

    Ok(CopenhagenOutcome {
        players: ids,
        holes,
        totals,
        presses: out_presses,
    })
}

/// Admits a new press against the current scores: the player must be in the
/// game and trail the leader of the main match after `after_hole`.
pub fn check_press(outcome: &CopenhagenOutcome, request: &PressRequest) -> GcResult<()> {
    let Some(idx) = outcome.players.iter().position(|id| *id == request.player) else {
        return Err(GolfcardError::invalid(
            "presses",
            format!("'{}' is not playing", request.player),
        ));
    };
    let standing = sum_from(&outcome.holes, 1, request.after_hole);
    let lead = standing.iter().copied().max().unwrap_or(0);
    if standing[idx] >= lead {
        return Err(GolfcardError::invalid(
            "presses",
            format!(
                "{} is not trailing after hole {} and cannot press",
                request.player, request.after_hole
            ),
        ));
    }
    Ok(())
}
