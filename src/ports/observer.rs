//! Observer port - abstraction for episode observation and data collection
//!
//! This port defines the interface for observing environment runs,
//! allowing composable data collection without coupling the runner to
//! specific output formats or metrics.

use crate::{
    Result,
    environment::{ResetInfo, Step},
    tictactoe::{Board, Outcome},
};

/// Observer trait for monitoring episode runs
///
/// # Event Sequence
///
/// 1. `on_run_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(...)` after the opponent's opening ply
///    - `on_step(...)` for each step
///    - `on_episode_end(...)`
/// 3. `on_run_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_oracle::{ports::Observer, tictactoe::Outcome};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         outcome: Outcome,
///         _total_reward: f64,
///     ) -> ttt_oracle::Result<()> {
///         if outcome == Outcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after `reset`, with the board the actor will first see.
    fn on_episode_start(
        &mut self,
        _episode: usize,
        _observation: &Board,
        _info: &ResetInfo,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after every step, including the terminal one.
    ///
    /// * `step_num` - Step number within the episode (0-based)
    fn on_step(&mut self, _episode: usize, _step_num: usize, _step: &Step) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal board.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: Outcome,
        _total_reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode. Use this to flush outputs.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
