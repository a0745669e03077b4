//! Head-to-head match play. Singles and four-ball (best ball) share one
//! engine: a side's hole score is the best counted score among its players.

use super::{best_ball, compare_counted, effective_scores, require_players, GameContext};
use crate::course::Side;
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MatchSide {
    A,
    B,
}

impl MatchSide {
    pub fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchResult {
    Win,
    Loss,
    Tie,
}

/// Running state; `status` is from side A's view (positive = A up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub status: i32,
    pub holes_played: u8,
    pub holes_remaining: u8,
    pub total_holes: u8,
    /// Hole on which the match was closed out.
    pub decided_at: Option<u8>,
}

impl MatchState {
    pub fn new(total_holes: u8) -> Self {
        Self {
            status: 0,
            holes_played: 0,
            holes_remaining: total_holes,
            total_holes,
            decided_at: None,
        }
    }

    pub fn is_closed_out(&self) -> bool {
        self.status.unsigned_abs() > self.holes_remaining as u32
    }

    /// Closed out, or every hole played.
    pub fn is_decided(&self) -> bool {
        self.is_closed_out() || self.holes_remaining == 0
    }

    pub fn is_dormie(&self) -> bool {
        self.status != 0 && self.status.unsigned_abs() == self.holes_remaining as u32
    }

    pub fn leader(&self) -> Option<MatchSide> {
        match self.status.cmp(&0) {
            Ordering::Greater => Some(MatchSide::A),
            Ordering::Less => Some(MatchSide::B),
            Ordering::Equal => None,
        }
    }

    /// Applies one resolved hole. No-op once the match is closed out.
    pub fn apply(&mut self, hole_number: u8, winner: Option<MatchSide>) -> bool {
        if self.is_closed_out() || self.holes_remaining == 0 {
            return false;
        }
        match winner {
            Some(MatchSide::A) => self.status += 1,
            Some(MatchSide::B) => self.status -= 1,
            None => {}
        }
        self.holes_played += 1;
        self.holes_remaining = self.total_holes - self.holes_played;
        if self.is_closed_out() {
            self.decided_at = Some(hole_number);
            debug!(
                "Match closed out on hole {}: {}",
                hole_number,
                self.margin_text(MatchSide::A)
            );
        }
        true
    }

    /// Final result from `side`'s view; `None` while the match is open.
    pub fn result(&self, side: MatchSide) -> Option<MatchResult> {
        if !self.is_decided() {
            return None;
        }
        Some(match self.leader() {
            None => MatchResult::Tie,
            Some(l) if l == side => MatchResult::Win,
            Some(_) => MatchResult::Loss,
        })
    }

    /// `"2 UP"`, `"1 DOWN"`, `"AS"`, or `"4 UP with 3 to play"` once closed out.
    pub fn margin_text(&self, side: MatchSide) -> String {
        let status = match side {
            MatchSide::A => self.status,
            MatchSide::B => -self.status,
        };
        if status == 0 {
            return "AS".to_string();
        }
        let word = if status > 0 { "UP" } else { "DOWN" };
        let base = format!("{} {}", status.abs(), word);
        if self.is_closed_out() && self.holes_remaining > 0 {
            format!("{} with {} to play", base, self.holes_remaining)
        } else {
            base
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHoleResult {
    pub hole_number: u8,
    pub side_a_score: Option<i32>,
    pub side_b_score: Option<i32>,
    /// `None` for a halved or unresolved hole.
    pub winner: Option<MatchSide>,
    pub resolved: bool,
    /// False for holes played after the close-out.
    pub counted: bool,
    pub status_after: i32,
    pub holes_remaining: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub side_a: Side,
    pub side_b: Side,
    pub holes: Vec<MatchHoleResult>,
    pub state: MatchState,
    pub margin: String,
    pub result_a: Option<MatchResult>,
    pub result_b: Option<MatchResult>,
}

/// Winner of a hole given each side's best counted score.
pub fn hole_winner(a: Option<i32>, b: Option<i32>) -> Option<MatchSide> {
    match compare_counted(a, b) {
        Ordering::Less => Some(MatchSide::A),
        Ordering::Greater => Some(MatchSide::B),
        Ordering::Equal => None,
    }
}

pub fn score(ctx: &GameContext, side_a: &Side, side_b: &Side) -> GcResult<MatchOutcome> {
    if side_a.players.is_empty() || side_b.players.is_empty() {
        return Err(GolfcardError::invalid("sides", "each side needs a player"));
    }
    let all: Vec<_> = side_a
        .players
        .iter()
        .chain(&side_b.players)
        .cloned()
        .collect();
    require_players("sides", &all, ctx.players)?;

    let mut state = MatchState::new(ctx.course.hole_count());
    let mut holes = Vec::new();

    for (hole, entry) in ctx.holes() {
        let Some(entry) = entry else { continue };
        let a = effective_scores(Some(entry), hole, &side_a.players, ctx.allocator)?;
        let b = effective_scores(Some(entry), hole, &side_b.players, ctx.allocator)?;

        let (side_a_score, side_b_score, winner, resolved) = match (a, b) {
            (Some(a), Some(b)) => {
                let (sa, sb) = (best_ball(&a), best_ball(&b));
                (sa, sb, hole_winner(sa, sb), true)
            }
            _ => (None, None, None, false),
        };

        let counted = resolved && state.apply(hole.hole_number, winner);
        holes.push(MatchHoleResult {
            hole_number: hole.hole_number,
            side_a_score,
            side_b_score,
            winner,
            resolved,
            counted,
            status_after: state.status,
            holes_remaining: state.holes_remaining,
        });
    }

    Ok(MatchOutcome {
        side_a: side_a.clone(),
        side_b: side_b.clone(),
        holes,
        margin: state.margin_text(MatchSide::A),
        result_a: state.result(MatchSide::A),
        result_b: state.result(MatchSide::B),
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dormie_then_closed() {
        let mut s = MatchState::new(18);
        for h in 1..=8 {
            s.apply(h, Some(MatchSide::A));
        }
        assert!(!s.is_dormie());
        s.apply(9, Some(MatchSide::A));
        assert!(s.is_dormie());
        assert_eq!(s.margin_text(MatchSide::A), "9 UP");
        s.apply(10, None);
        assert_eq!(s.decided_at, Some(10));
        assert_eq!(s.margin_text(MatchSide::A), "9 UP with 8 to play");
        assert_eq!(s.margin_text(MatchSide::B), "9 DOWN with 8 to play");
    }

    #[test]
    fn all_square_after_full_round_is_a_tie() {
        let mut s = MatchState::new(2);
        s.apply(1, Some(MatchSide::A));
        s.apply(2, Some(MatchSide::B));
        assert_eq!(s.margin_text(MatchSide::A), "AS");
        assert_eq!(s.result(MatchSide::A), Some(MatchResult::Tie));
    }

    #[test]
    fn win_on_last_hole_has_no_to_play_suffix() {
        let mut s = MatchState::new(1);
        s.apply(1, Some(MatchSide::B));
        assert_eq!(s.margin_text(MatchSide::B), "1 UP");
        assert_eq!(s.result(MatchSide::B), Some(MatchResult::Win));
    }
}
