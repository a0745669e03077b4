use crate::reports;
use clap::Args;
use golfcard::aggregate::{per_round_average, rollup_strokes_gained, RoundShots};
use golfcard::config::EngineConfig;
use golfcard::error::GcResult;
use golfcard::strokes_gained::loader::load_baseline;
use golfcard::strokes_gained::{BaselineTable, ShotInput};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SgArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// JSON list of rounds with their tracked shots.
    #[arg(short, long)]
    pub shots: PathBuf,

    /// Putting baseline CSV (`distance_m,expected_strokes`); defaults to the built-in table.
    #[arg(long, requires = "long_game_table")]
    pub putting_table: Option<PathBuf>,

    /// Long-game baseline CSV (`lie,distance_m,expected_strokes`).
    #[arg(long, requires = "putting_table")]
    pub long_game_table: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundInput {
    pub round_id: String,
    #[serde(default = "default_hole_count")]
    pub hole_count: u8,
    pub holes_completed: u8,
    pub shots: Vec<ShotInput>,
}

fn default_hole_count() -> u8 {
    18
}

pub fn load_rounds(path: &Path) -> GcResult<Vec<RoundInput>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run(args: &SgArgs, config: &EngineConfig) -> GcResult<()> {
    let table = match (&args.putting_table, &args.long_game_table) {
        (Some(p), Some(l)) => load_baseline(p, l)?,
        _ => BaselineTable::standard()?,
    };

    let inputs = load_rounds(&args.shots)?;
    let mut rounds = Vec::with_capacity(inputs.len());
    for input in inputs {
        let shots = input
            .shots
            .iter()
            .map(|s| s.record(&table))
            .collect::<GcResult<Vec<_>>>()?;
        reports::print_shots(&input.round_id, &shots);
        rounds.push(RoundShots {
            round_id: input.round_id,
            hole_count: input.hole_count,
            holes_completed: input.holes_completed,
            shots,
        });
    }
    info!("Computed strokes gained for {} round(s)", rounds.len());

    let all: Vec<_> = rounds.iter().flat_map(|r| r.shots.iter().cloned()).collect();
    reports::print_rollup(&rollup_strokes_gained(&all, config)?);
    reports::print_round_averages(per_round_average(&rounds).as_ref());
    Ok(())
}
