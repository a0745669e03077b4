use super::match_play::{hole_winner, MatchSide};
use super::stroke_play::{self, StrokePlayOutcome};
use super::{best_ball, effective_scores, require_players, GameContext};
use crate::course::{PlayerId, Side};
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scramble: each roster entry is a team posting one score per hole, so the
/// result is plain stroke play over teams.
pub fn score_scramble(ctx: &GameContext) -> GcResult<StrokePlayOutcome> {
    stroke_play::score(ctx)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmbriagoHole {
    pub hole_number: u8,
    pub low_ball: Option<MatchSide>,
    pub low_total: Option<MatchSide>,
    pub birdies_a: u8,
    pub birdies_b: u8,
    pub closest_to_pin: Option<MatchSide>,
    pub points_a: u32,
    pub points_b: u32,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmbriagoOutcome {
    pub side_a: Side,
    pub side_b: Side,
    pub holes: Vec<UmbriagoHole>,
    pub total_a: u32,
    pub total_b: u32,
    pub leader: Option<MatchSide>,
}

/// Team total; a conceded member leaves the team without one.
fn team_total(scores: &[Option<i32>]) -> Option<i32> {
    scores.iter().copied().sum()
}

fn birdies(scores: &[Option<i32>], par: u8) -> u8 {
    scores
        .iter()
        .flatten()
        .filter(|s| **s < par as i32)
        .count() as u8
}

/// Umbriago: two pairs, four points on offer per hole (low ball, low total,
/// net birdies, closest to the pin). Halved categories pay nothing.
pub fn score_umbriago(
    ctx: &GameContext,
    side_a: &Side,
    side_b: &Side,
    closest_to_pin: &BTreeMap<u8, PlayerId>,
) -> GcResult<UmbriagoOutcome> {
    if side_a.players.len() != 2 || side_b.players.len() != 2 {
        return Err(GolfcardError::invalid(
            "sides",
            "umbriago is played by two sides of two",
        ));
    }
    let all: Vec<_> = side_a
        .players
        .iter()
        .chain(&side_b.players)
        .cloned()
        .collect();
    require_players("sides", &all, ctx.players)?;

    let mut holes = Vec::new();
    let (mut total_a, mut total_b) = (0u32, 0u32);

    for (hole, entry) in ctx.holes() {
        let Some(entry) = entry else { continue };
        let ctp = match closest_to_pin.get(&hole.hole_number) {
            Some(p) if side_a.players.contains(p) => Some(MatchSide::A),
            Some(p) if side_b.players.contains(p) => Some(MatchSide::B),
            Some(p) => {
                return Err(GolfcardError::invalid(
                    "closestToPin",
                    format!("hole {}: '{}' is not playing", hole.hole_number, p),
                ))
            }
            None => None,
        };

        let a = effective_scores(Some(entry), hole, &side_a.players, ctx.allocator)?;
        let b = effective_scores(Some(entry), hole, &side_b.players, ctx.allocator)?;
        let (Some(a), Some(b)) = (a, b) else {
            holes.push(UmbriagoHole {
                hole_number: hole.hole_number,
                low_ball: None,
                low_total: None,
                birdies_a: 0,
                birdies_b: 0,
                closest_to_pin: ctp,
                points_a: 0,
                points_b: 0,
                resolved: false,
            });
            continue;
        };

        let low_ball = hole_winner(best_ball(&a), best_ball(&b));
        let low_total = hole_winner(team_total(&a), team_total(&b));
        let (birdies_a, birdies_b) = (birdies(&a, hole.par), birdies(&b, hole.par));

        let mut points_a = birdies_a as u32;
        let mut points_b = birdies_b as u32;
        for side in [low_ball, low_total, ctp].into_iter().flatten() {
            match side {
                MatchSide::A => points_a += 1,
                MatchSide::B => points_b += 1,
            }
        }
        total_a += points_a;
        total_b += points_b;

        holes.push(UmbriagoHole {
            hole_number: hole.hole_number,
            low_ball,
            low_total,
            birdies_a,
            birdies_b,
            closest_to_pin: ctp,
            points_a,
            points_b,
            resolved: true,
        });
    }

    let leader = match total_a.cmp(&total_b) {
        std::cmp::Ordering::Greater => Some(MatchSide::A),
        std::cmp::Ordering::Less => Some(MatchSide::B),
        std::cmp::Ordering::Equal => None,
    };

    Ok(UmbriagoOutcome {
        side_a: side_a.clone(),
        side_b: side_b.clone(),
        holes,
        total_a,
        total_b,
        leader,
    })
}
