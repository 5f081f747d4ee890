//! Outcomes and move history

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Result of evaluating a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    Ongoing,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Sequence of placements starting from an empty board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub moves: Vec<Move>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placement that has already been validated against the board
    pub fn record(&mut self, position: usize, player: Player) {
        self.moves.push(Move { position, player });
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }

    /// Replay the history onto an empty board.
    ///
    /// # Errors
    ///
    /// Returns error if any recorded move is illegal, which indicates
    /// corrupted history.
    pub fn replay(&self) -> Result<Board, crate::Error> {
        self.moves
            .iter()
            .try_fold(Board::new(), |board, m| board.place(m.position, m.player))
    }
}
