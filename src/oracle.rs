//! Memoized minimax oracle
//!
//! Answers "which moves are optimal for player P on board B" by exhaustive
//! alpha-beta search. Every distinct `(board, player)` query is solved once
//! per cache and kept for the lifetime of the cache; the 3x3 state space is
//! small enough that the cache never needs eviction.
//!
//! Cloning an [`OptimalMoveOracle`] shares its cache, so several
//! environments (possibly on different threads) can consult one oracle.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    Error, Result,
    tictactoe::{Board, GameRules, Outcome, Player},
};

const WIN: i32 = 1;
const LOSS: i32 = -1;
const DRAW: i32 = 0;

type CacheKey = (Board, Player);

/// Minimax/alpha-beta solver with a shared, write-once move cache
#[derive(Debug, Clone, Default)]
pub struct OptimalMoveOracle {
    cache: Arc<RwLock<HashMap<CacheKey, Vec<usize>>>>,
}

impl OptimalMoveOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// All moves achieving the best score reachable by `player`, ascending.
    ///
    /// # Errors
    ///
    /// [`Error::OraclePreconditionViolated`] if the board is already won or
    /// full. This is a caller bug, not a recoverable condition.
    pub fn get_optimal_moves(&self, board: &Board, player: Player) -> Result<Vec<usize>> {
        let key = (*board, player);
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(moves) = cache.get(&key) {
                return Ok(moves.clone());
            }
        }

        // Searched without holding the lock. Concurrent misses on the same
        // key compute identical answers, so the first insert wins.
        let moves = Self::solve_uncached(board, player)?;
        log::trace!("oracle miss {} {player}: {moves:?}", board.encode());

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(key).or_insert(moves).clone())
    }

    /// Whether `action` is one of the optimal moves for `player`
    pub fn is_optimal_move(&self, board: &Board, action: usize, player: Player) -> Result<bool> {
        Ok(self.get_optimal_moves(board, player)?.contains(&action))
    }

    /// Number of cached `(board, player)` entries
    pub fn cache_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Solve a position without touching any cache.
    ///
    /// Wins are scored without regard to depth, so a move that only forces
    /// a win later ties with one that wins now. Immediate wins are therefore
    /// returned on their own whenever the player has one.
    pub fn solve_uncached(board: &Board, player: Player) -> Result<Vec<usize>> {
        let scored = Self::evaluate_moves(board, player)?;

        let immediate = GameRules::winning_moves(board, player);
        if !immediate.is_empty() {
            return Ok(immediate);
        }

        let best = scored
            .iter()
            .map(|&(_, score)| score)
            .max()
            .ok_or_else(|| precondition_violated(board, player))?;

        Ok(scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(mv, _)| mv)
            .collect())
    }

    /// Minimax value of every legal move for `player`: +1 forced win,
    /// 0 draw, -1 forced loss.
    ///
    /// Each root child is searched with a full window so that its score is
    /// exact and ties at the root are all reported.
    pub fn evaluate_moves(board: &Board, player: Player) -> Result<Vec<(usize, i32)>> {
        if board.is_terminal() {
            return Err(precondition_violated(board, player));
        }

        board
            .empty_positions()
            .into_iter()
            .map(|mv| {
                let child = board.place(mv, player)?;
                let score = alpha_beta(&child, player.opponent(), player, i32::MIN, i32::MAX);
                Ok((mv, score))
            })
            .collect()
    }
}

fn precondition_violated(board: &Board, player: Player) -> Error {
    Error::OraclePreconditionViolated {
        board: board.encode(),
        player,
    }
}

/// Score of `board` for `perspective` with `to_move` about to play.
fn alpha_beta(
    board: &Board,
    to_move: Player,
    perspective: Player,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match board.outcome() {
        Outcome::Win(winner) if winner == perspective => return WIN,
        Outcome::Win(_) => return LOSS,
        Outcome::Draw => return DRAW,
        Outcome::Ongoing => {}
    }

    let maximizing = to_move == perspective;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in board.empty_positions() {
        let Ok(child) = board.place(pos, to_move) else {
            continue;
        };
        let value = alpha_beta(&child, to_move.opponent(), perspective, alpha, beta);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}
