//! Backrace CLI - Command-line interface
//!
//! Commands:
//! - experiment: Play many games between two strategies and tally wins
//! - play: Play against a strategy in the terminal
//! - board: Print the starting board

mod experiment;
mod human;
mod play;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use backrace_core::{assess_board, evaluate, Board, Colour};

#[derive(Parser)]
#[command(name = "backrace")]
#[command(about = "Race game rules engine and strategy experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play many games between two strategies
    Experiment(experiment::ExperimentArgs),
    /// Play against the computer
    Play(play::PlayArgs),
    /// Print the starting board and its statistics
    Board {
        /// Print the JSON snapshot instead
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Experiment(args) => experiment::run(args),
        Commands::Play(args) => play::run(args),
        Commands::Board { json } => {
            let board = Board::starting();
            if json {
                println!("{}", board.to_json().context("Failed to serialise board")?);
            } else {
                println!("{}", render::render_board(&board.snapshot()));
                for colour in [Colour::White, Colour::Black] {
                    let stats = assess_board(&board, colour);
                    println!(
                        "{}: score {:.2}, pips {}, outside home {}, singles {}, safe points {}",
                        colour,
                        evaluate(&board, colour),
                        stats.sum_distances,
                        stats.sum_distances_to_endzone,
                        stats.number_of_singles,
                        stats.number_occupied_spaces
                    );
                }
            }
            Ok(())
        }
    }
}
