//! Random baseline actor

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::build_rng;
use crate::{Error, Result, ports::ActionProvider, tictactoe::Board};

/// Uniformly random actor.
///
/// With a non-zero error rate it sometimes names any index in `0..=9`
/// instead, which may be occupied or out of range. That makes it a cheap
/// stand-in for an unreliable external decision procedure.
pub struct RandomActor {
    name: String,
    rng: StdRng,
    error_rate: f64,
}

impl RandomActor {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: build_rng(None),
            error_rate: 0.0,
        }
    }

    /// Create a random actor with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
            error_rate: 0.0,
        }
    }

    /// Probability of naming an arbitrary index instead of a legal move
    pub fn with_error_rate(mut self, rate: f64) -> Self {
        self.error_rate = if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

impl ActionProvider for RandomActor {
    fn act(&mut self, board: &Board) -> Result<usize> {
        if self.error_rate > 0.0 && self.rng.random_bool(self.error_rate) {
            return Ok(self.rng.random_range(0..=9));
        }

        board
            .empty_positions()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_actor_plays_legal_moves() {
        let mut actor = RandomActor::with_seed("Random".to_string(), 1);
        let board = Board::from_string("XOXOX....").unwrap();
        for _ in 0..50 {
            let mv = actor.act(&board).unwrap();
            assert!(board.is_empty(mv));
        }
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut actor = RandomActor::with_seed("Random".to_string(), 1);
        let full = Board::from_string("XOXXOOOXX").unwrap();
        assert!(matches!(actor.act(&full), Err(Error::NoValidMoves)));
    }

    #[test]
    fn test_error_rate_one_produces_arbitrary_indices() {
        let mut actor = RandomActor::with_seed("Erratic".to_string(), 9).with_error_rate(1.0);
        let board = Board::from_string("XOXOXOXO.").unwrap();
        let illegal = (0..100)
            .map(|_| actor.act(&board).unwrap())
            .filter(|&mv| mv > 8 || !board.is_empty(mv))
            .count();
        assert!(illegal > 50);
    }
}
