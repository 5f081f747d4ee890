//! Optimal command - show the oracle's verdict for one position

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    cli::output,
    oracle::OptimalMoveOracle,
    tictactoe::{Board, Player},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Print the optimal moves for a board")]
pub struct OptimalArgs {
    /// Nine cells, row by row: X, O and '.' (or '-') for empty
    pub board: String,

    /// Player to move; inferred from the mark counts when omitted
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerArg>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub board: String,
    pub player: Player,
    pub optimal_moves: Vec<usize>,
    /// Minimax value of every legal move: 1 win, 0 draw, -1 loss
    pub scores: Vec<(usize, i32)>,
}

pub fn execute(args: OptimalArgs) -> Result<()> {
    let report = analyze(&args.board, args.player.map(Player::from))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let board = Board::from_string(&report.board)?;
    output::print_section(&format!("Optimal moves for {}", report.player));
    println!("{}", board.render_numbered());
    output::print_subsection("Move values");
    for (mv, score) in &report.scores {
        let verdict = match score {
            1 => "win",
            0 => "draw",
            _ => "loss",
        };
        let marker = if report.optimal_moves.contains(mv) { "*" } else { " " };
        println!(" {marker} square {} (index {mv}): {verdict}", mv + 1);
    }

    Ok(())
}

/// Solve one position with a fresh oracle.
pub fn analyze(board: &str, player: Option<Player>) -> Result<PositionReport> {
    let board = Board::from_string(board)?;
    let player = match player {
        Some(player) => player,
        None => board
            .next_player()
            .ok_or_else(|| anyhow!("cannot infer the player to move on '{}'", board.encode()))?,
    };

    let oracle = OptimalMoveOracle::new();
    let optimal_moves = oracle.get_optimal_moves(&board, player)?;
    let scores = OptimalMoveOracle::evaluate_moves(&board, player)?;

    Ok(PositionReport {
        board: board.encode(),
        player,
        optimal_moves,
        scores,
    })
}
