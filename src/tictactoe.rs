//! Tic-Tac-Toe board, rules and move history

pub mod board;
pub mod game;
pub mod rules;

pub use board::{Board, Cell, Player};
pub use game::{Game, Move, Outcome};
pub use rules::{GameRules, WINNING_LINES};
