//! ttt-oracle CLI
//!
//! - Play episodes of an actor against the oracle opponent
//! - Query the optimal moves for any position

use anyhow::Result;
use clap::{Parser, Subcommand};
use ttt_oracle::cli::commands::{optimal, play};

#[derive(Parser)]
#[command(name = "ttt-oracle")]
#[command(version, about = "Minimax oracle and steered Tic-Tac-Toe environment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run episodes against the oracle opponent
    Play(play::PlayArgs),

    /// Show the optimal moves for a board
    Optimal(optimal::OptimalArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Optimal(args) => optimal::execute(args),
    }
}
