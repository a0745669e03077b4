use super::{effective_scores, GameContext};
use crate::course::PlayerId;
use crate::error::GcResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinsHoleResult {
    pub hole_number: u8,
    pub winner_id: Option<PlayerId>,
    pub is_carryover: bool,
    /// Skins at stake on this hole (1 + carried over).
    pub skins_available: u32,
    pub low_score: Option<i32>,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinsOutcome {
    pub holes: Vec<SkinsHoleResult>,
    pub skins_won: BTreeMap<PlayerId, u32>,
    /// Skins still unclaimed at the end of the recorded holes.
    pub carryover: u32,
    pub holes_played: u32,
}

impl SkinsOutcome {
    pub fn total_awarded(&self) -> u32 {
        self.skins_won.values().sum()
    }
}

/// Sole owner of the strict minimum, if any.
pub fn outright_low(scores: &[Option<i32>]) -> Option<(usize, i32)> {
    let low = scores.iter().flatten().copied().min()?;
    let mut holders = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == Some(low))
        .map(|(i, _)| i);
    let first = holders.next()?;
    match holders.next() {
        Some(_) => None,
        None => Some((first, low)),
    }
}

pub fn score(ctx: &GameContext) -> GcResult<SkinsOutcome> {
    let ids = ctx.player_ids();
    let mut skins_won: BTreeMap<PlayerId, u32> = ids.iter().map(|id| (id.clone(), 0)).collect();
    let mut carryover = 0u32;
    let mut holes_played = 0u32;
    let mut holes = Vec::new();

    for (hole, entry) in ctx.holes() {
        let Some(entry) = entry else { continue };
        let available = 1 + carryover;

        let Some(scores) = effective_scores(Some(entry), hole, &ids, ctx.allocator)? else {
            holes.push(SkinsHoleResult {
                hole_number: hole.hole_number,
                winner_id: None,
                is_carryover: false,
                skins_available: available,
                low_score: None,
                resolved: false,
            });
            continue;
        };
        holes_played += 1;

        let low_score = scores.iter().flatten().copied().min();
        let (winner_id, is_carryover) = match outright_low(&scores) {
            Some((idx, _)) => {
                let winner = ids[idx].clone();
                *skins_won.entry(winner.clone()).or_default() += available;
                carryover = 0;
                (Some(winner), false)
            }
            None => {
                carryover += 1;
                (None, true)
            }
        };

        holes.push(SkinsHoleResult {
            hole_number: hole.hole_number,
            winner_id,
            is_carryover,
            skins_available: available,
            low_score,
            resolved: true,
        });
    }

    Ok(SkinsOutcome {
        holes,
        skins_won,
        carryover,
        holes_played,
    })
}
