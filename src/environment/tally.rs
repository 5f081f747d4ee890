//! Cumulative results across episodes

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Outcome, Player};

/// Wins, draws and losses from the external actor's perspective.
///
/// Survives `reset`; only a new environment starts from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished game. Ongoing outcomes are ignored.
    pub fn record(&mut self, outcome: Outcome, actor: Player) {
        match outcome {
            Outcome::Win(winner) if winner == actor => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }

    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.total())
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total())
    }

    pub fn loss_rate(&self) -> f64 {
        rate(self.losses, self.total())
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}
