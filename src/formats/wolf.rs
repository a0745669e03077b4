use super::{best_ball, compare_counted, effective_scores, require_players, GameContext};
use crate::course::PlayerId;
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strum_macros::Display;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 5;

/// What the wolf decided on a hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WolfChoice {
    Lone,
    Partner(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum WolfMode {
    Lone,
    Partnered,
}

/// Result from the wolf side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum WolfResult {
    Win,
    Lose,
    Tie,
}

/// One payout row: points to each wolf-side player and to each opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfPayout {
    pub mode: WolfMode,
    pub result: WolfResult,
    pub opponents: u8,
    pub wolf_side_each: i32,
    pub opponent_each: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfPointTable {
    pub rows: Vec<WolfPayout>,
}

impl Default for WolfPointTable {
    /// Zero-sum table for 3, 4 and 5 players; ties pay nothing.
    fn default() -> Self {
        use WolfMode::*;
        use WolfResult::*;
        let row = |mode, result, opponents, wolf_side_each, opponent_each| WolfPayout {
            mode,
            result,
            opponents,
            wolf_side_each,
            opponent_each,
        };
        Self {
            rows: vec![
                // 3 players
                row(Lone, Win, 2, 4, -2),
                row(Lone, Lose, 2, -4, 2),
                row(Lone, Tie, 2, 0, 0),
                row(Partnered, Win, 1, 1, -2),
                row(Partnered, Lose, 1, -1, 2),
                row(Partnered, Tie, 1, 0, 0),
                // 4 players
                row(Lone, Win, 3, 6, -2),
                row(Lone, Lose, 3, -6, 2),
                row(Lone, Tie, 3, 0, 0),
                row(Partnered, Win, 2, 2, -2),
                row(Partnered, Lose, 2, -2, 2),
                row(Partnered, Tie, 2, 0, 0),
                // 5 players
                row(Lone, Win, 4, 8, -2),
                row(Lone, Lose, 4, -8, 2),
                row(Lone, Tie, 4, 0, 0),
                row(Partnered, Win, 3, 3, -2),
                row(Partnered, Lose, 3, -3, 2),
                row(Partnered, Tie, 3, 0, 0),
            ],
        }
    }
}

impl WolfPointTable {
    pub fn lookup(&self, mode: WolfMode, result: WolfResult, opponents: u8) -> GcResult<&WolfPayout> {
        self.rows
            .iter()
            .find(|r| r.mode == mode && r.result == result && r.opponents == opponents)
            .ok_or_else(|| {
                GolfcardError::Config(format!(
                    "Wolf point table has no row for {} {} against {} opponents",
                    mode, result, opponents
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfHoleResult {
    pub hole_number: u8,
    pub wolf: PlayerId,
    pub choice: Option<WolfChoice>,
    pub result: Option<WolfResult>,
    pub hole_points: BTreeMap<PlayerId, i32>,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfOutcome {
    pub holes: Vec<WolfHoleResult>,
    pub total_points: BTreeMap<PlayerId, i32>,
    /// Everyone sharing the top total.
    pub leaders: Vec<PlayerId>,
}

/// `players[(hole - 1) mod n]` unless the hole has a manual override.
pub fn wolf_for_hole(
    players: &[PlayerId],
    hole_number: u8,
    overrides: &BTreeMap<u8, PlayerId>,
) -> GcResult<PlayerId> {
    if let Some(p) = overrides.get(&hole_number) {
        return Ok(p.clone());
    }
    if players.is_empty() || hole_number == 0 {
        return Err(GolfcardError::invalid(
            "wolf",
            "wolf rotation needs players and a hole number from 1",
        ));
    }
    Ok(players[(hole_number as usize - 1) % players.len()].clone())
}

pub fn score(
    ctx: &GameContext,
    choices: &BTreeMap<u8, WolfChoice>,
    overrides: &BTreeMap<u8, PlayerId>,
) -> GcResult<WolfOutcome> {
    let ids = ctx.player_ids();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&ids.len()) {
        return Err(GolfcardError::invalid(
            "players",
            format!(
                "wolf needs {}..={} players, got {}",
                MIN_PLAYERS,
                MAX_PLAYERS,
                ids.len()
            ),
        ));
    }
    for p in overrides.values() {
        require_players("wolfOverrides", std::slice::from_ref(p), ctx.players)?;
    }

    let table = &ctx.config.wolf_points;
    let mut total_points: BTreeMap<PlayerId, i32> = ids.iter().map(|id| (id.clone(), 0)).collect();
    let mut holes = Vec::new();

    for (hole, entry) in ctx.holes() {
        let wolf = wolf_for_hole(&ids, hole.hole_number, overrides)?;
        let choice = choices.get(&hole.hole_number).cloned();

        let wolf_side: Vec<PlayerId> = match &choice {
            Some(WolfChoice::Partner(partner)) => {
                if *partner == wolf {
                    return Err(GolfcardError::invalid(
                        "partner",
                        format!("hole {}: the wolf cannot partner themselves", hole.hole_number),
                    ));
                }
                require_players("partner", std::slice::from_ref(partner), ctx.players)?;
                vec![wolf.clone(), partner.clone()]
            }
            _ => vec![wolf.clone()],
        };
        let opponents: Vec<PlayerId> = ids
            .iter()
            .filter(|id| !wolf_side.contains(id))
            .cloned()
            .collect();

        let scores = match &choice {
            Some(_) => effective_scores(entry, hole, &ids, ctx.allocator)?,
            None => None,
        };
        let Some(scores) = scores else {
            if entry.is_some() {
                holes.push(WolfHoleResult {
                    hole_number: hole.hole_number,
                    wolf,
                    choice,
                    result: None,
                    hole_points: BTreeMap::new(),
                    resolved: false,
                });
            }
            continue;
        };

        let pick = |group: &[PlayerId]| -> Vec<Option<i32>> {
            ids.iter()
                .zip(&scores)
                .filter(|(id, _)| group.contains(id))
                .map(|(_, s)| *s)
                .collect()
        };
        let result = match compare_counted(best_ball(&pick(&wolf_side)), best_ball(&pick(&opponents))) {
            Ordering::Less => WolfResult::Win,
            Ordering::Greater => WolfResult::Lose,
            Ordering::Equal => WolfResult::Tie,
        };
        let mode = if wolf_side.len() == 1 {
            WolfMode::Lone
        } else {
            WolfMode::Partnered
        };
        let payout = table.lookup(mode, result, opponents.len() as u8)?;

        let hole_points: BTreeMap<PlayerId, i32> = ids
            .iter()
            .map(|id| {
                let pts = if wolf_side.contains(id) {
                    payout.wolf_side_each
                } else {
                    payout.opponent_each
                };
                (id.clone(), pts)
            })
            .collect();
        for (id, pts) in &hole_points {
            *total_points.entry(id.clone()).or_default() += pts;
        }

        holes.push(WolfHoleResult {
            hole_number: hole.hole_number,
            wolf,
            choice,
            result: Some(result),
            hole_points,
            resolved: true,
        });
    }

    let top = total_points.values().copied().max().unwrap_or(0);
    let leaders = total_points
        .iter()
        .filter(|(_, p)| **p == top)
        .map(|(id, _)| id.clone())
        .collect();

    Ok(WolfOutcome {
        holes,
        total_points,
        leaders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_zero_sum() {
        for row in WolfPointTable::default().rows {
            let side = match row.mode {
                WolfMode::Lone => 1,
                WolfMode::Partnered => 2,
            };
            assert_eq!(
                row.wolf_side_each * side + row.opponent_each * row.opponents as i32,
                0,
                "{:?}",
                row
            );
        }
    }

    #[test]
    fn rotation_wraps() {
        let ids: Vec<PlayerId> = ["a", "b", "c", "d"].iter().map(|s| PlayerId::from(*s)).collect();
        let none = BTreeMap::new();
        assert_eq!(wolf_for_hole(&ids, 1, &none).unwrap(), ids[0]);
        assert_eq!(wolf_for_hole(&ids, 5, &none).unwrap(), ids[0]);
        assert_eq!(wolf_for_hole(&ids, 7, &none).unwrap(), ids[2]);
    }
}
