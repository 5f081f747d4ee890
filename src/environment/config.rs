//! Reward and environment configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{Outcome, Player},
};

/// Every reward the environment can emit, with explicit signs.
///
/// Rewards are always from the external actor's perspective.
///
/// # Examples
///
/// ```
/// use ttt_oracle::environment::RewardConfig;
///
/// let rewards = RewardConfig::default()
///     .with_win(1.0)
///     .with_loss(-1.0)
///     .with_exhausted_penalty(-5.0);
/// assert!(rewards.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Actor completes a line
    pub win: f64,
    /// Fixed opponent completes a line
    pub loss: f64,
    /// Board fills without a line
    pub draw: f64,
    /// Non-terminal step whose move was in the oracle's optimal set
    pub optimal_move_bonus: f64,
    /// Non-terminal step whose move was not in the optimal set
    pub suboptimal_move_penalty: f64,
    /// Steered step where a retry recovered from a failed first attempt
    pub retry_penalty: f64,
    /// Steered step where every attempt failed and a random move was played
    pub exhausted_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win: 2.0,
            loss: -2.0,
            draw: 1.0,
            optimal_move_bonus: 0.1,
            suboptimal_move_penalty: -0.1,
            retry_penalty: -1.0,
            exhausted_penalty: -10.0,
        }
    }
}

impl RewardConfig {
    pub fn with_win(mut self, value: f64) -> Self {
        self.win = value;
        self
    }

    pub fn with_loss(mut self, value: f64) -> Self {
        self.loss = value;
        self
    }

    pub fn with_draw(mut self, value: f64) -> Self {
        self.draw = value;
        self
    }

    pub fn with_optimal_move_bonus(mut self, value: f64) -> Self {
        self.optimal_move_bonus = value;
        self
    }

    pub fn with_suboptimal_move_penalty(mut self, value: f64) -> Self {
        self.suboptimal_move_penalty = value;
        self
    }

    pub fn with_retry_penalty(mut self, value: f64) -> Self {
        self.retry_penalty = value;
        self
    }

    pub fn with_exhausted_penalty(mut self, value: f64) -> Self {
        self.exhausted_penalty = value;
        self
    }

    /// Reward for a finished episode, seen by `actor`.
    ///
    /// Returns `None` while the game is still in progress.
    pub fn terminal_reward(&self, outcome: Outcome, actor: Player) -> Option<f64> {
        match outcome {
            Outcome::Win(winner) if winner == actor => Some(self.win),
            Outcome::Win(_) => Some(self.loss),
            Outcome::Draw => Some(self.draw),
            Outcome::Ongoing => None,
        }
    }

    /// Shaping term for a non-terminal step
    pub fn shaping_reward(&self, optimal: bool) -> f64 {
        if optimal {
            self.optimal_move_bonus
        } else {
            self.suboptimal_move_penalty
        }
    }

    /// Check the ordering between failure tiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a value is not finite,
    /// when the exhaustion penalty is not strictly larger in magnitude than
    /// the suboptimal-move penalty, or when the retry penalty is not
    /// strictly milder than the exhaustion penalty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("win", self.win),
            ("loss", self.loss),
            ("draw", self.draw),
            ("optimal_move_bonus", self.optimal_move_bonus),
            ("suboptimal_move_penalty", self.suboptimal_move_penalty),
            ("retry_penalty", self.retry_penalty),
            ("exhausted_penalty", self.exhausted_penalty),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("reward '{name}' must be finite, got {value}")));
        }

        if self.exhausted_penalty.abs() <= self.suboptimal_move_penalty.abs() {
            return Err(invalid(format!(
                "exhausted_penalty ({}) must exceed suboptimal_move_penalty ({}) in magnitude",
                self.exhausted_penalty, self.suboptimal_move_penalty
            )));
        }

        if self.retry_penalty.abs() >= self.exhausted_penalty.abs() {
            return Err(invalid(format!(
                "retry_penalty ({}) must be milder than exhausted_penalty ({})",
                self.retry_penalty, self.exhausted_penalty
            )));
        }

        Ok(())
    }
}

/// Configuration for a game environment.
///
/// # Examples
///
/// ```
/// use ttt_oracle::environment::{EnvironmentConfig, RewardConfig};
///
/// let config = EnvironmentConfig::new()
///     .with_seed(42)
///     .with_max_attempts(3)
///     .with_rewards(RewardConfig::default().with_draw(0.5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub rewards: RewardConfig,
    /// Seed for opponent tie-breaks and steering fallbacks
    pub seed: Option<u64>,
    /// Attempts the steered variant grants the external actor per step
    pub max_attempts: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            rewards: RewardConfig::default(),
            seed: None,
            max_attempts: 2,
        }
    }
}

impl EnvironmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1".to_string()));
        }
        self.rewards.validate()
    }

    /// Load and validate a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
