use crate::course::{HoleDefinition, Player, PlayerId, Score};
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

/// Extra strokes come per full 18 of differential, whatever the course length.
pub const STROKE_CYCLE: u8 = 18;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HandicapBasis {
    /// Each player plays off their full handicap.
    Full,
    /// Each player plays off the difference to the lowest handicap in the game.
    #[default]
    OffTheLow,
}

/// Strokes a hole receives for `differential` on an 18-hole stroke index.
pub fn strokes_for_hole(stroke_index: u8, differential: f32) -> GcResult<u8> {
    strokes_for_hole_in(stroke_index, differential, STROKE_CYCLE)
}

/// Magnitude of the stroke adjustment on a hole. Whether it is received or
/// given back is decided by the sign of the differential (see [`net_score`]).
/// `hole_count` only bounds the stroke index; a 9-hole card still needs a
/// differential above 18 before any hole gets a second stroke.
pub fn strokes_for_hole_in(stroke_index: u8, differential: f32, hole_count: u8) -> GcResult<u8> {
    if hole_count == 0 {
        return Err(GolfcardError::invalid("holeCount", "must be at least 1"));
    }
    if stroke_index == 0 || stroke_index > hole_count {
        return Err(GolfcardError::invalid(
            "strokeIndex",
            format!("{} is outside 1..={}", stroke_index, hole_count),
        ));
    }
    if !differential.is_finite() {
        return Err(GolfcardError::invalid(
            "handicap",
            format!("{} is not a finite number", differential),
        ));
    }

    let base = differential.abs().round() as u32;
    let cycle = STROKE_CYCLE as u32;
    let full_rounds = base / cycle;
    let extra = u32::from(stroke_index as u32 <= base % cycle);

    Ok((full_rounds + extra).min(u8::MAX as u32) as u8)
}

/// Gross minus strokes received; a plus differential adds strokes instead.
pub fn net_score(gross: u8, stroke_index: u8, differential: f32, hole_count: u8) -> GcResult<i32> {
    let strokes = strokes_for_hole_in(stroke_index, differential, hole_count)? as i32;
    let net = if differential < 0.0 {
        gross as i32 + strokes
    } else {
        gross as i32 - strokes
    };
    Ok(net.max(0))
}

/// Per-game differentials, resolved once from the roster.
#[derive(Debug, Clone, Default)]
pub struct StrokeAllocator {
    differentials: BTreeMap<PlayerId, f32>,
    hole_count: u8,
}

impl StrokeAllocator {
    /// Scores pass through untouched.
    pub fn gross(hole_count: u8) -> Self {
        Self {
            differentials: BTreeMap::new(),
            hole_count,
        }
    }

    pub fn from_roster(players: &[Player], basis: HandicapBasis, hole_count: u8) -> GcResult<Self> {
        for p in players {
            if let Some(h) = p.handicap {
                if !h.is_finite() {
                    return Err(GolfcardError::invalid(
                        "handicap",
                        format!("player '{}' has handicap {}", p.id, h),
                    ));
                }
            }
        }

        let low = players
            .iter()
            .map(|p| p.handicap.unwrap_or(0.0))
            .fold(f32::INFINITY, f32::min);
        let offset = match basis {
            HandicapBasis::Full => 0.0,
            HandicapBasis::OffTheLow if low.is_finite() => low,
            HandicapBasis::OffTheLow => 0.0,
        };

        let differentials = players
            .iter()
            .map(|p| (p.id.clone(), p.handicap.unwrap_or(0.0) - offset))
            .collect();

        Ok(Self {
            differentials,
            hole_count,
        })
    }

    pub fn differential(&self, player: &PlayerId) -> f32 {
        self.differentials.get(player).copied().unwrap_or(0.0)
    }

    /// Net score counted for comparison; `None` for a conceded hole.
    pub fn effective(
        &self,
        player: &PlayerId,
        hole: &HoleDefinition,
        score: Score,
    ) -> GcResult<Option<i32>> {
        let Some(gross) = score.strokes() else {
            return Ok(None);
        };
        let diff = self.differential(player);
        if diff == 0.0 {
            return Ok(Some(gross as i32));
        }
        net_score(gross, hole.stroke_index, diff, self.hole_count).map(Some)
    }
}
