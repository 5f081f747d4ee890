//! Actor port - the single contract between the environment and anything
//! that chooses moves

use crate::{Result, tictactoe::Board};

/// Source of moves for one side of the board.
///
/// Implemented by the fixed oracle opponent as well as by every external
/// actor (random baselines, text-driven actors, learned policies). The
/// environment never shares any other state with an actor: each call sees
/// only the current board.
///
/// # Errors and illegal moves
///
/// An external actor may return an index that is out of range or names an
/// occupied cell, or fail outright (for instance when its output cannot be
/// parsed). The base environment rejects such moves; the steered
/// environment retries and, if needed, falls back to a random legal move.
///
/// # Examples
///
/// ```
/// use ttt_oracle::{Result, ports::ActionProvider, tictactoe::Board};
///
/// /// Always plays the lowest free cell
/// struct FirstFree;
///
/// impl ActionProvider for FirstFree {
///     fn act(&mut self, board: &Board) -> Result<usize> {
///         board
///             .empty_positions()
///             .first()
///             .copied()
///             .ok_or(ttt_oracle::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait ActionProvider: Send {
    /// Choose a move (0-8) for the given board.
    fn act(&mut self, board: &Board) -> Result<usize>;

    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Seed the provider's internal random number generator.
    ///
    /// Stateless providers can rely on the default no-op.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

impl<A: ActionProvider + ?Sized> ActionProvider for Box<A> {
    fn act(&mut self, board: &Board) -> Result<usize> {
        (**self).act(board)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }
}
