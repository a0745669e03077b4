use crate::error::{GcResult, GolfcardError};
use crate::formats::copenhagen::CopenhagenPayouts;
use crate::formats::wolf::{WolfMode, WolfPointTable, WolfResult};
use crate::handicap::HandicapBasis;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How each player's differential is derived from the handicaps in play.
    #[arg(long, value_enum, default_value_t = HandicapBasis::OffTheLow)]
    pub handicap_basis: HandicapBasis,

    // Strokes-gained band edges in metres
    #[arg(long, default_value = "1,2,4,6,8,10,14,18")]
    pub putting_bands: String,
    #[arg(long, default_value = "40,80,120,160,200")]
    pub long_game_bands: String,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub copenhagen_sweep_under_par: bool,

    // Tables only come from JSON
    #[arg(skip)]
    pub wolf_points: WolfPointTable,
    #[arg(skip)]
    pub copenhagen_payouts: CopenhagenPayouts,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handicap_basis: HandicapBasis::OffTheLow,
            putting_bands: "1,2,4,6,8,10,14,18".to_string(),
            long_game_bands: "40,80,120,160,200".to_string(),
            copenhagen_sweep_under_par: true,
            wolf_points: WolfPointTable::default(),
            copenhagen_payouts: CopenhagenPayouts::default(),
        }
    }
}

impl EngineConfig {
    pub fn get_putting_bands(&self) -> GcResult<Vec<f64>> {
        parse_bands(&self.putting_bands, "putting_bands")
    }

    pub fn get_long_game_bands(&self) -> GcResult<Vec<f64>> {
        parse_bands(&self.long_game_bands, "long_game_bands")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GcResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Overlays only the flags the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(handicap_basis, "handicap_basis");
        update_if_present!(putting_bands, "putting_bands");
        update_if_present!(long_game_bands, "long_game_bands");
        update_if_present!(copenhagen_sweep_under_par, "copenhagen_sweep_under_par");
    }

    pub fn validate(&self) -> GcResult<()> {
        self.get_putting_bands()?;
        self.get_long_game_bands()?;
        self.copenhagen_payouts.validate()?;

        // Every wolf group size needs all six rows.
        for players in 3u8..=5 {
            for (mode, opponents) in [(WolfMode::Lone, players - 1), (WolfMode::Partnered, players - 2)] {
                for result in [WolfResult::Win, WolfResult::Lose, WolfResult::Tie] {
                    self.wolf_points.lookup(mode, result, opponents)?;
                }
            }
        }
        Ok(())
    }
}

fn parse_bands(s: &str, name: &str) -> GcResult<Vec<f64>> {
    let mut bands = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let v: f64 = part
            .parse()
            .map_err(|_| GolfcardError::Config(format!("Invalid number '{}' in {}", part, name)))?;
        if !v.is_finite() || v <= 0.0 {
            return Err(GolfcardError::Config(format!(
                "{} edges must be positive, got {}",
                name, part
            )));
        }
        if bands.last().is_some_and(|last: &f64| *last >= v) {
            return Err(GolfcardError::Config(format!(
                "{} must be strictly ascending",
                name
            )));
        }
        bands.push(v);
    }
    if bands.is_empty() {
        return Err(GolfcardError::Config(format!("{} needs at least one edge", name)));
    }
    Ok(bands)
}
