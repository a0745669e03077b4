use super::GameContext;
use crate::course::{PlayerId, Score};
use crate::error::GcResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePlayHole {
    pub hole_number: u8,
    pub par: u8,
    pub gross: BTreeMap<PlayerId, Score>,
    /// Counted scores only; conceded holes are absent.
    pub net: BTreeMap<PlayerId, i32>,
    /// Every player has an entry for the hole.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player: PlayerId,
    pub position: u8,
    pub tied: bool,
    pub gross_total: u32,
    pub net_total: i32,
    pub to_par: i32,
    pub holes_played: u8,
}

impl Standing {
    pub fn position_label(&self) -> String {
        if self.tied {
            format!("T{}", self.position)
        } else {
            self.position.to_string()
        }
    }

    pub fn to_par_label(&self) -> String {
        match self.to_par {
            0 => "E".to_string(),
            n if n > 0 => format!("+{}", n),
            n => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePlayOutcome {
    pub holes: Vec<StrokePlayHole>,
    pub standings: Vec<Standing>,
}

pub fn score(ctx: &GameContext) -> GcResult<StrokePlayOutcome> {
    let ids = ctx.player_ids();
    let mut holes = Vec::new();
    let mut totals: BTreeMap<PlayerId, Standing> = ids
        .iter()
        .map(|id| {
            (
                id.clone(),
                Standing {
                    player: id.clone(),
                    position: 0,
                    tied: false,
                    gross_total: 0,
                    net_total: 0,
                    to_par: 0,
                    holes_played: 0,
                },
            )
        })
        .collect();

    for (hole, entry) in ctx.holes() {
        let Some(entry) = entry else { continue };
        let mut gross = BTreeMap::new();
        let mut net = BTreeMap::new();

        for id in &ids {
            let Some(score) = entry.score_of(id) else { continue };
            gross.insert(id.clone(), score);
            if let (Some(strokes), Some(n)) = (
                score.strokes(),
                ctx.allocator.effective(id, hole, score)?,
            ) {
                net.insert(id.clone(), n);
                if let Some(t) = totals.get_mut(id) {
                    t.gross_total += strokes as u32;
                    t.net_total += n;
                    t.to_par += n - hole.par as i32;
                    t.holes_played += 1;
                }
            }
        }

        holes.push(StrokePlayHole {
            hole_number: hole.hole_number,
            par: hole.par,
            complete: entry.has_all(&ids),
            gross,
            net,
        });
    }

    Ok(StrokePlayOutcome {
        holes,
        standings: rank(totals.into_values().collect()),
    })
}

/// Standard competition ranking on score to par; players with nothing
/// counted sink to the bottom.
pub fn rank(mut standings: Vec<Standing>) -> Vec<Standing> {
    let key = |s: &Standing| (s.holes_played == 0, s.to_par);
    standings.sort_by(|a, b| key(a).cmp(&key(b)).then_with(|| a.player.cmp(&b.player)));

    let keys: Vec<_> = standings.iter().map(key).collect();
    for i in 0..standings.len() {
        let first = keys.iter().position(|k| *k == keys[i]).unwrap_or(i);
        let shared = keys.iter().filter(|k| **k == keys[i]).count() > 1;
        standings[i].position = first as u8 + 1;
        standings[i].tied = shared;
    }
    standings
}
