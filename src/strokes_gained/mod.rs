pub mod baseline;
pub mod calculator;
pub mod loader;

pub use self::baseline::{BaselineTable, Curve, Lie, LieCurve};
pub use self::calculator::{
    calculate_strokes_gained, calculate_strokes_gained_raw, SgCategory, ShotEnd,
};

use crate::error::GcResult;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ShotType {
    Tee,
    Approach,
    Putt,
}

impl ShotType {
    pub fn category(&self) -> SgCategory {
        match self {
            ShotType::Putt => SgCategory::Putting,
            ShotType::Tee | ShotType::Approach => SgCategory::LongGame,
        }
    }
}

/// One tracked shot with its strokes-gained value computed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotRecord {
    pub hole_number: u8,
    #[serde(rename = "type")]
    pub shot_type: ShotType,
    pub start_distance: f64,
    pub start_lie: Lie,
    pub end: ShotEnd,
    pub strokes_gained: f64,
}

impl ShotRecord {
    pub fn new(
        table: &BaselineTable,
        hole_number: u8,
        shot_type: ShotType,
        start_distance: f64,
        start_lie: Lie,
        end: ShotEnd,
    ) -> GcResult<Self> {
        let strokes_gained =
            calculate_strokes_gained(table, shot_type.category(), start_distance, start_lie, end)?;
        Ok(Self {
            hole_number,
            shot_type,
            start_distance,
            start_lie,
            end,
            strokes_gained,
        })
    }

    pub fn holed(&self) -> bool {
        matches!(self.end, ShotEnd::Holed)
    }
}

/// Shot as entered, before strokes gained is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotInput {
    pub hole_number: u8,
    #[serde(rename = "type")]
    pub shot_type: ShotType,
    pub start_distance: f64,
    pub start_lie: String,
    #[serde(default)]
    pub holed: bool,
    #[serde(default)]
    pub end_distance: Option<f64>,
    #[serde(default)]
    pub end_lie: Option<String>,
}

impl ShotInput {
    pub fn record(&self, table: &BaselineTable) -> GcResult<ShotRecord> {
        let strokes_gained = calculate_strokes_gained_raw(
            table,
            self.shot_type.category(),
            self.start_distance,
            &self.start_lie,
            self.holed,
            self.end_lie.as_deref(),
            self.end_distance,
        )?;
        let end = match self.end_distance {
            Some(distance) if !self.holed => ShotEnd::Rest {
                distance,
                lie: self
                    .end_lie
                    .as_deref()
                    .map(Lie::parse_lenient)
                    .unwrap_or(Lie::Fairway),
            },
            _ => ShotEnd::Holed,
        };
        Ok(ShotRecord {
            hole_number: self.hole_number,
            shot_type: self.shot_type,
            start_distance: self.start_distance,
            start_lie: Lie::parse_lenient(&self.start_lie),
            end,
            strokes_gained,
        })
    }
}
