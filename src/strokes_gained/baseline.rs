use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// Lie at the start or end of a shot, as recorded by the shot tracker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Lie {
    Tee,
    Fairway,
    Rough,
    #[serde(alias = "bunker")]
    #[strum(to_string = "sand", serialize = "bunker")]
    Sand,
    #[serde(alias = "trees")]
    #[strum(to_string = "recovery", serialize = "trees")]
    Recovery,
    Green,
}

impl Lie {
    /// Unknown lies fall back to the fairway; callers that need strict
    /// validation use `Lie::from_str` directly.
    pub fn parse_lenient(s: &str) -> Lie {
        Lie::from_str(s.trim()).unwrap_or_else(|_| {
            warn!("Unrecognised lie '{}', using fairway baseline", s);
            Lie::Fairway
        })
    }

    /// Long-game curve for this lie; `None` means the putting curve applies.
    pub fn curve(&self) -> Option<LieCurve> {
        match self {
            Lie::Tee | Lie::Fairway => Some(LieCurve::Fairway),
            Lie::Rough => Some(LieCurve::Rough),
            Lie::Sand => Some(LieCurve::Sand),
            Lie::Recovery => Some(LieCurve::Recovery),
            Lie::Green => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LieCurve {
    #[strum(to_string = "fairway", serialize = "tee")]
    Fairway,
    Rough,
    #[strum(to_string = "sand", serialize = "bunker")]
    Sand,
    #[strum(to_string = "recovery", serialize = "trees")]
    Recovery,
}

pub const LIE_CURVE_COUNT: usize = 4;

/// Expected strokes to finish as a function of distance (metres).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(mut points: Vec<(f64, f64)>, name: &str) -> GcResult<Self> {
        if points.is_empty() {
            return Err(GolfcardError::Config(format!(
                "Baseline curve '{}' has no rows",
                name
            )));
        }
        if let Some(bad) = points
            .iter()
            .find(|(d, e)| !d.is_finite() || !e.is_finite() || *d < 0.0 || *e < 0.0)
        {
            return Err(GolfcardError::Config(format!(
                "Baseline curve '{}' has invalid row ({}, {})",
                name, bad.0, bad.1
            )));
        }

        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        // Later duplicates of a distance win, as in the source table.
        let mut deduped: Vec<(f64, f64)> = Vec::with_capacity(points.len());
        for p in points {
            match deduped.last_mut() {
                Some(last) if last.0 == p.0 => *last = p,
                _ => deduped.push(p),
            }
        }

        Ok(Self { points: deduped })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Linear interpolation between the neighbouring rows, clamped at both ends.
    pub fn expected(&self, distance: f64) -> f64 {
        let pts = &self.points;
        let Some(&(first_d, first_e)) = pts.first() else {
            return 0.0;
        };
        if distance <= first_d {
            return first_e;
        }
        let (last_d, last_e) = pts[pts.len() - 1];
        if distance >= last_d {
            return last_e;
        }

        let upper = pts.partition_point(|&(d, _)| d < distance);
        let (d1, e1) = pts[upper - 1];
        let (d2, e2) = pts[upper];
        if d2 == distance {
            return e2;
        }
        e1 + (e2 - e1) * (distance - d1) / (d2 - d1)
    }
}

/// Immutable baseline, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct BaselineTable {
    putting: Curve,
    long_game: [Curve; LIE_CURVE_COUNT],
}

const STANDARD_PUTTING: &str = include_str!("../../data/baseline/putting.csv");
const STANDARD_LONG_GAME: &str = include_str!("../../data/baseline/long_game.csv");

impl BaselineTable {
    /// Missing long-game lies reuse the fairway curve.
    pub fn new(putting: Curve, mut long_game: Vec<(LieCurve, Curve)>) -> GcResult<Self> {
        let fairway = long_game
            .iter()
            .find(|(lie, _)| *lie == LieCurve::Fairway)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| {
                GolfcardError::Config("Baseline has no fairway curve".to_string())
            })?;

        let curves = LieCurve::iter()
            .map(|lie| {
                match long_game.iter().position(|(l, _)| *l == lie) {
                    Some(idx) => long_game.swap_remove(idx).1,
                    None => {
                        warn!("Baseline has no '{}' curve, reusing fairway", lie);
                        fairway.clone()
                    }
                }
            })
            .collect::<Vec<_>>();

        let long_game: [Curve; LIE_CURVE_COUNT] = curves
            .try_into()
            .map_err(|_| GolfcardError::Config("Baseline curve count mismatch".to_string()))?;

        Ok(Self { putting, long_game })
    }

    /// Reference tables shipped with the crate.
    pub fn standard() -> GcResult<Self> {
        let putting = super::loader::load_putting_table(STANDARD_PUTTING.as_bytes())?;
        let long_game = super::loader::load_long_game_table(STANDARD_LONG_GAME.as_bytes())?;
        Self::new(putting, long_game)
    }

    pub fn putting(&self) -> &Curve {
        &self.putting
    }

    pub fn long_game(&self, lie: LieCurve) -> &Curve {
        &self.long_game[lie as usize]
    }

    /// Expected strokes to hole out from `distance` on `lie`.
    pub fn expected_for_lie(&self, distance: f64, lie: Lie) -> f64 {
        if distance == 0.0 {
            return 0.0;
        }
        match lie.curve() {
            Some(curve) => self.long_game(curve).expected(distance),
            None => self.putting.expected(distance),
        }
    }

    pub fn expected_putting(&self, distance: f64) -> f64 {
        if distance == 0.0 {
            return 0.0;
        }
        self.putting.expected(distance)
    }
}
