use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use golfcard::config::EngineConfig;
use golfcard::error::GcResult;
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Golf game scoring and strokes gained", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine config JSON; flags given on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recompute one or more games from their recorded holes.
    Score(cmd::score::ScoreArgs),
    /// Strokes gained per shot with band rollups.
    Sg(cmd::sg::SgArgs),
}

/// File config (if any) as the base, explicit CLI flags on top.
fn resolve_config(
    path: Option<&str>,
    cli_config: &EngineConfig,
    sub_matches: Option<&ArgMatches>,
) -> GcResult<EngineConfig> {
    let config = match (path, sub_matches) {
        (Some(path), Some(matches)) => {
            let mut file_config = EngineConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, matches);
            file_config
        }
        (Some(path), None) => EngineConfig::load_from_file(path)?,
        (None, _) => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, matches: &ArgMatches) -> GcResult<()> {
    match &cli.command {
        Commands::Score(args) => {
            let config = resolve_config(
                cli.config.as_deref(),
                &args.config,
                matches.subcommand_matches("score"),
            )?;
            cmd::score::run(args, &config)
        }
        Commands::Sg(args) => {
            let config = resolve_config(
                cli.config.as_deref(),
                &args.config,
                matches.subcommand_matches("sg"),
            )?;
            cmd::sg::run(args, &config)
        }
    }
}

fn main() {
    // Raw matches tell explicit flags apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
