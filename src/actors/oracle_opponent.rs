//! Oracle-driven move source

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::build_rng;
use crate::{
    Error, Result,
    oracle::OptimalMoveOracle,
    ports::ActionProvider,
    tictactoe::{Board, Player},
};

/// Plays a uniformly random move from the oracle's optimal set.
///
/// The random tie-break keeps the player from being predictable while it
/// never gives up value. The environment uses one as its fixed opponent;
/// it can equally serve as a perfect external actor.
pub struct OracleOpponent {
    oracle: OptimalMoveOracle,
    player: Player,
    rng: StdRng,
    name: String,
}

impl OracleOpponent {
    pub fn new(oracle: OptimalMoveOracle, player: Player) -> Self {
        Self {
            oracle,
            player,
            rng: build_rng(None),
            name: format!("Oracle-{player}"),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn oracle(&self) -> &OptimalMoveOracle {
        &self.oracle
    }
}

impl ActionProvider for OracleOpponent {
    fn act(&mut self, board: &Board) -> Result<usize> {
        let moves = self.oracle.get_optimal_moves(board, self.player)?;
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
