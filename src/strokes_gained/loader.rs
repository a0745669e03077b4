use super::baseline::{BaselineTable, Curve, LieCurve};
use crate::error::GcResult;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

fn parse_distance_row(fields: &[&str]) -> Option<(f64, f64)> {
    let d: f64 = fields.first()?.trim().parse().ok()?;
    let e: f64 = fields.get(1)?.trim().parse().ok()?;
    Some((d, e))
}

/// `distance_m,expected_strokes` rows.
pub fn load_putting_table<R: Read>(reader: R) -> GcResult<Curve> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        match result {
            Ok(rec) => {
                let fields: Vec<&str> = rec.iter().collect();
                match parse_distance_row(&fields) {
                    Some(p) => points.push(p),
                    None => skipped_count += 1,
                }
            }
            Err(e) => {
                debug!("[Row {}] CSV Parse Error: {}", row_idx + 1, e);
                skipped_count += 1;
            }
        }
    }

    if skipped_count > 0 {
        warn!("Skipped {} invalid rows in putting baseline.", skipped_count);
    }
    debug!("Putting baseline: {} rows", points.len());

    Curve::new(points, "putting")
}

/// `lie,distance_m,expected_strokes` rows, one curve per lie category.
pub fn load_long_game_table<R: Read>(reader: R) -> GcResult<Vec<(LieCurve, Curve)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut by_lie: BTreeMap<LieCurve, Vec<(f64, f64)>> = BTreeMap::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] CSV Parse Error: {}", row_idx + 1, e);
                skipped_count += 1;
                continue;
            }
        };
        if rec.len() < 3 {
            skipped_count += 1;
            continue;
        }

        let lie = match LieCurve::from_str(&rec[0]) {
            Ok(lie) => lie,
            Err(_) => {
                skipped_count += 1;
                continue;
            }
        };
        match parse_distance_row(&[&rec[1], &rec[2]]) {
            Some(p) => by_lie.entry(lie).or_default().push(p),
            None => skipped_count += 1,
        }
    }

    if skipped_count > 0 {
        warn!("Skipped {} invalid rows in long-game baseline.", skipped_count);
    }

    let mut curves = Vec::new();
    for lie in LieCurve::iter() {
        if let Some(points) = by_lie.remove(&lie) {
            debug!("Long-game baseline '{}': {} rows", lie, points.len());
            curves.push((lie, Curve::new(points, &lie.to_string())?));
        }
    }
    Ok(curves)
}

pub fn load_baseline<P1: AsRef<Path>, P2: AsRef<Path>>(
    putting_path: P1,
    long_game_path: P2,
) -> GcResult<BaselineTable> {
    info!(
        "Loading baseline from {:?} and {:?}",
        putting_path.as_ref(),
        long_game_path.as_ref()
    );
    let putting = load_putting_table(File::open(putting_path)?)?;
    let long_game = load_long_game_table(File::open(long_game_path)?)?;
    BaselineTable::new(putting, long_game)
}
