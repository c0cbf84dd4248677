use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use connect_four::config::{AppConfig, LogConfig, ReplayConfig};
use connect_four::game::{DropResult, GameEngine, GameState, Outcome};

/// Replay a sequence of drops through the Connect Four rule engine.
#[derive(Parser)]
#[command(name = "connect-four", about = "Replay Connect Four moves and print the board")]
struct Cli {
    /// Columns to drop into (0-based), separated by commas or spaces
    moves: Vec<String>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Print the final game state as JSON instead of a text board
    #[arg(long)]
    json: bool,

    /// Log every drop
    #[arg(short, long)]
    verbose: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_tracing(&config.log, cli.verbose);
    if !cli.config.exists() {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let moves = parse_moves(&cli.moves)?;
    let mut engine = GameEngine::new();
    replay(&mut engine, &moves, &config.replay)?;

    let state = engine.snapshot();
    if cli.json {
        let json = serde_json::to_string_pretty(state).context("serializing game state")?;
        println!("{json}");
    } else {
        let display = &config.display;
        print!(
            "{}",
            state
                .board()
                .render(|cell| display.glyph(cell), display.column_numbers)
        );
        println!("{}", status_line(state));
        if let Some(line) = state.winning_line() {
            let cells: Vec<String> = line
                .iter()
                .map(|pos| format!("({}, {})", pos.row, pos.col))
                .collect();
            println!("Winning line: {}", cells.join(" "));
        }
    }

    Ok(())
}

fn init_tracing(log: &LogConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Split move arguments on commas and whitespace into column indices.
fn parse_moves(args: &[String]) -> Result<Vec<usize>> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .with_context(|| format!("'{token}' is not a column number"))
        })
        .collect()
}

/// Feed `moves` to the engine in order. Returns how many drops were accepted.
fn replay(engine: &mut GameEngine, moves: &[usize], config: &ReplayConfig) -> Result<usize> {
    let mut accepted = 0;
    for (index, &column) in moves.iter().enumerate() {
        let result = engine
            .drop_piece(column)
            .with_context(|| format!("move {} (column {column})", index + 1))?;
        match result {
            DropResult::Accepted { .. } => accepted += 1,
            DropResult::Rejected { reason } => {
                warn!(move_number = index + 1, column, ?reason, "drop rejected");
                if config.halt_on_rejection {
                    break;
                }
            }
        }
    }
    Ok(accepted)
}

fn status_line(state: &GameState) -> String {
    match state.outcome() {
        Outcome::InProgress => format!("{} to move", state.current_player().name()),
        Outcome::Win(winner) => format!("{} wins!", winner.name()),
        Outcome::Draw => "It's a draw!".to_string(),
    }
}
