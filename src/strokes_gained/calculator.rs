use super::baseline::{BaselineTable, Lie};
use crate::error::{GcResult, GolfcardError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SgCategory {
    Putting,
    LongGame,
}

/// Where a shot finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ShotEnd {
    Holed,
    Rest { distance: f64, lie: Lie },
}

fn check_distance(field: &'static str, d: f64) -> GcResult<f64> {
    if !d.is_finite() || d < 0.0 {
        return Err(GolfcardError::invalid(
            field,
            format!("{} is not a distance in metres", d),
        ));
    }
    Ok(d)
}

impl BaselineTable {
    pub fn expected(&self, category: SgCategory, distance: f64, lie: Lie) -> f64 {
        match category {
            SgCategory::Putting => self.expected_putting(distance),
            SgCategory::LongGame => self.expected_for_lie(distance, lie),
        }
    }
}

/// `expected(start) - (1 + expected(end))`. A zero-distance start is defined
/// as 0 rather than computed.
///
/// A holed shot counts its own stroke like any other, so holing out from `D`
/// gains `expected(D) - 1`, not `expected(D)`. The plain `expected(D)` reading
/// would disagree with the same formula for a shot left at rest (6m to 1m
/// gives `expected(6) - 1 - expected(1)`), and a shot that ends where it
/// started would no longer come out at exactly -1.
pub fn calculate_strokes_gained(
    table: &BaselineTable,
    category: SgCategory,
    start_distance: f64,
    start_lie: Lie,
    end: ShotEnd,
) -> GcResult<f64> {
    let start_distance = check_distance("startDistance", start_distance)?;
    if start_distance == 0.0 {
        return Ok(0.0);
    }

    let start = table.expected(category, start_distance, start_lie);
    let finish = match end {
        ShotEnd::Holed => 0.0,
        ShotEnd::Rest { distance, lie } => {
            let distance = check_distance("endDistance", distance)?;
            table.expected(category, distance, lie)
        }
    };

    Ok(start - (1.0 + finish))
}

/// Loose form used by the shot tracker: lies are free text (unknown lies use
/// the fairway curve) and the end state is optional.
pub fn calculate_strokes_gained_raw(
    table: &BaselineTable,
    category: SgCategory,
    start_distance: f64,
    start_lie: &str,
    holed: bool,
    end_lie: Option<&str>,
    end_distance: Option<f64>,
) -> GcResult<f64> {
    let end = match (holed, end_distance) {
        (true, None) if end_lie.is_none() => ShotEnd::Holed,
        (true, _) => {
            return Err(GolfcardError::invalid(
                "holed",
                "a holed shot has no end distance or lie",
            ))
        }
        (false, None) => {
            return Err(GolfcardError::invalid(
                "endDistance",
                "required when the shot was not holed",
            ))
        }
        (false, Some(distance)) => ShotEnd::Rest {
            distance,
            lie: end_lie.map(Lie::parse_lenient).unwrap_or(Lie::Fairway),
        },
    };

    calculate_strokes_gained(
        table,
        category,
        start_distance,
        Lie::parse_lenient(start_lie),
        end,
    )
}
