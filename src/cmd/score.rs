use crate::reports;
use clap::Args;
use golfcard::api::{score_game, GameRecord, GameReport};
use golfcard::config::EngineConfig;
use golfcard::error::GcResult;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Game file (setup plus recorded holes); repeat for several games.
    #[arg(short, long = "game", required = true)]
    pub games: Vec<PathBuf>,

    /// Print the reports as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn load_game(path: &Path) -> GcResult<GameRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn score_file(path: &Path, config: &EngineConfig) -> GcResult<GameReport> {
    let record = load_game(path)?;
    score_game(&record.setup, &record.holes, config)
}

pub fn run(args: &ScoreArgs, config: &EngineConfig) -> GcResult<()> {
    info!("Scoring {} game file(s)", args.games.len());

    // Games are independent, so they are recomputed side by side.
    let reports = args
        .games
        .par_iter()
        .map(|path| score_file(path, config))
        .collect::<GcResult<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for report in &reports {
        reports::print_game_report(report);
    }
    Ok(())
}
