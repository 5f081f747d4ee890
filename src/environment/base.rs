//! Turn-based environment: external actor against the oracle

use rand::{rngs::StdRng, seq::IndexedRandom};

use super::{EnvironmentConfig, Phase, ResetInfo, SteeringEvent, Step, StepInfo, Tally};
use crate::{
    Error, Result,
    actors::{OracleOpponent, build_rng},
    oracle::OptimalMoveOracle,
    ports::ActionProvider,
    tictactoe::{Board, Game, Outcome, Player},
};

/// Mark of the fixed, oracle-driven opponent. It always opens.
pub const OPPONENT: Player = Player::X;
/// Mark of the external actor
pub const ACTOR: Player = Player::O;

/// Game environment in which every `step` applies the external actor's
/// move and then, if the game is still open, one reply from the oracle
/// opponent.
///
/// The environment resets itself on construction, so it is always either
/// awaiting an external move or holding a finished game.
///
/// ```
/// use ttt_oracle::environment::{EnvironmentConfig, GameEnvironment};
///
/// let mut env = GameEnvironment::new(EnvironmentConfig::new().with_seed(7))?;
/// let legal = env.legal_actions()[0];
/// let step = env.step(legal)?;
/// assert!(!step.truncated);
/// # Ok::<(), ttt_oracle::Error>(())
/// ```
pub struct GameEnvironment {
    config: EnvironmentConfig,
    oracle: OptimalMoveOracle,
    opponent: OracleOpponent,
    rng: StdRng,
    board: Board,
    phase: Phase,
    history: Game,
    tally: Tally,
    episodes: usize,
}

impl GameEnvironment {
    /// Create an environment with a fresh oracle.
    pub fn new(config: EnvironmentConfig) -> Result<Self> {
        Self::with_oracle(config, OptimalMoveOracle::new())
    }

    /// Create an environment that consults (and fills) an existing oracle
    /// cache.
    pub fn with_oracle(config: EnvironmentConfig, oracle: OptimalMoveOracle) -> Result<Self> {
        config.validate()?;

        let rng = build_rng(config.seed);
        let mut opponent = OracleOpponent::new(oracle.clone(), OPPONENT);
        if let Some(seed) = config.seed {
            opponent = opponent.with_seed(seed.wrapping_add(1));
        }

        let mut env = Self {
            config,
            oracle,
            opponent,
            rng,
            board: Board::new(),
            phase: Phase::AwaitingExternalMove,
            history: Game::new(),
            tally: Tally::new(),
            episodes: 0,
        };
        env.reset()?;
        Ok(env)
    }

    /// Start a new episode: empty the board and let the opponent open.
    ///
    /// The win/draw/loss tally carries over.
    pub fn reset(&mut self) -> Result<(Board, ResetInfo)> {
        self.board = Board::new();
        self.history = Game::new();
        self.phase = Phase::AwaitingExternalMove;
        self.episodes += 1;

        let opening = self.opponent.act(&self.board)?;
        self.apply(opening, OPPONENT)?;

        let info = ResetInfo {
            opponent_move: opening,
            episode: self.episodes,
        };
        log::debug!("episode {} opened with {opening}", self.episodes);
        Ok((self.board, info))
    }

    /// Apply the actor's move, then the opponent's reply.
    ///
    /// # Errors
    ///
    /// * [`Error::EpisodeOver`] if the game has already finished
    /// * [`Error::InvalidActionRange`] if `action > 8`
    /// * [`Error::CellOccupied`] if the cell is taken
    ///
    /// The board is left untouched on error.
    pub fn step(&mut self, action: usize) -> Result<Step> {
        self.advance(action, None)
    }

    /// Shared step logic. `steering` replaces the shaping term with the
    /// matching failure-tier penalty when present.
    pub(crate) fn advance(
        &mut self,
        action: usize,
        steering: Option<SteeringEvent>,
    ) -> Result<Step> {
        self.ensure_awaiting()?;
        let before = self.board;
        let after = before.place(action, ACTOR)?;

        let optimal = self.oracle.is_optimal_move(&before, action, ACTOR)?;
        self.board = after;
        self.history.record(action, ACTOR);

        let mut opponent_move = None;
        let mut outcome = self.board.outcome();
        if !outcome.is_terminal() {
            let reply = self.opponent.act(&self.board)?;
            self.apply(reply, OPPONENT)?;
            opponent_move = Some(reply);
            outcome = self.board.outcome();
        }

        let reward = match self.config.rewards.terminal_reward(outcome, ACTOR) {
            Some(terminal) => terminal,
            None => self.intermediate_reward(optimal, steering.as_ref()),
        };

        let terminal = outcome.is_terminal();
        if terminal {
            self.phase = Phase::Terminal(outcome);
            self.tally.record(outcome, ACTOR);
            log::debug!(
                "episode {} finished: {outcome:?} after {} plies",
                self.episodes,
                self.history.len()
            );
        }

        log::debug!(
            "actor {action} (optimal: {optimal}), opponent {opponent_move:?}, reward {reward}"
        );

        Ok(Step {
            observation: self.board,
            reward,
            terminal,
            truncated: false,
            info: StepInfo {
                actor_move: action,
                opponent_move,
                outcome,
                optimal,
                steering,
            },
        })
    }

    fn intermediate_reward(&self, optimal: bool, steering: Option<&SteeringEvent>) -> f64 {
        let rewards = &self.config.rewards;
        match steering {
            Some(SteeringEvent::Recovered { .. }) => rewards.retry_penalty,
            Some(SteeringEvent::Exhausted { .. }) => rewards.exhausted_penalty,
            Some(SteeringEvent::Clean) | None => rewards.shaping_reward(optimal),
        }
    }

    fn apply(&mut self, position: usize, player: Player) -> Result<()> {
        self.board = self.board.place(position, player)?;
        self.history.record(position, player);
        Ok(())
    }

    fn ensure_awaiting(&self) -> Result<()> {
        match self.phase {
            Phase::AwaitingExternalMove => Ok(()),
            Phase::Terminal(_) => Err(Error::EpisodeOver),
        }
    }

    /// Uniformly random empty cell, drawn from the environment's RNG.
    pub fn random_legal_move(&mut self) -> Result<usize> {
        self.ensure_awaiting()?;
        self.board
            .empty_positions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    /// Outcome of the current episode if it has finished
    pub fn last_outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminal(outcome) => Some(outcome),
            Phase::AwaitingExternalMove => None,
        }
    }

    /// Player whose turn it is, `None` once the game is over
    pub fn to_move(&self) -> Option<Player> {
        match self.phase {
            Phase::AwaitingExternalMove => Some(ACTOR),
            Phase::Terminal(_) => None,
        }
    }

    /// Legal actions for the actor; empty once the game is over
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            Vec::new()
        } else {
            self.board.empty_positions()
        }
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Moves of the current episode, opponent's opening first
    pub fn history(&self) -> &Game {
        &self.history
    }

    /// Number of episodes started, including the current one
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn oracle(&self) -> &OptimalMoveOracle {
        &self.oracle
    }
}
