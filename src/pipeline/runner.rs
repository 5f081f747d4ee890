//! Episode runner for an external actor against the oracle

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    environment::{ACTOR, SteeredGameEnvironment, SteeringEvent, Step},
    ports::{ActionProvider, Observer},
    tictactoe::Outcome,
};

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Seed handed to the actor before the first episode
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            seed: None,
        }
    }
}

/// Aggregate of a run, from the actor's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,

    /// Sum of every step reward
    pub total_reward: f64,

    /// Average per-episode return
    pub mean_reward: f64,

    /// Actor moves, including fallbacks played on its behalf
    pub total_steps: usize,
    pub optimal_moves: usize,
    pub suboptimal_moves: usize,

    /// Steps that needed a retry before a legal move
    pub recovered_steps: usize,

    /// Steps where every attempt failed and a random move was played
    pub exhausted_steps: usize,
}

impl RunResult {
    /// Create an empty result; counters are filled by [`RunResult::record_step`]
    /// and [`RunResult::record_episode`].
    pub fn new() -> Self {
        Self {
            episodes: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            win_rate: 0.0,
            draw_rate: 0.0,
            loss_rate: 0.0,
            total_reward: 0.0,
            mean_reward: 0.0,
            total_steps: 0,
            optimal_moves: 0,
            suboptimal_moves: 0,
            recovered_steps: 0,
            exhausted_steps: 0,
        }
    }

    pub fn record_step(&mut self, step: &Step) {
        self.total_steps += 1;
        self.total_reward += step.reward;
        if step.info.optimal {
            self.optimal_moves += 1;
        } else {
            self.suboptimal_moves += 1;
        }
        match step.info.steering {
            Some(SteeringEvent::Recovered { .. }) => self.recovered_steps += 1,
            Some(SteeringEvent::Exhausted { .. }) => self.exhausted_steps += 1,
            Some(SteeringEvent::Clean) | None => {}
        }
    }

    pub fn record_episode(&mut self, outcome: Outcome) {
        self.episodes += 1;
        match outcome {
            Outcome::Win(winner) if winner == ACTOR => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
        self.refresh_rates();
    }

    fn refresh_rates(&mut self) {
        let episodes = self.episodes;
        let rate = |count: usize| {
            if episodes > 0 {
                count as f64 / episodes as f64
            } else {
                0.0
            }
        };
        self.win_rate = rate(self.wins);
        self.draw_rate = rate(self.draws);
        self.loss_rate = rate(self.losses);
        self.mean_reward = if self.episodes > 0 {
            self.total_reward / self.episodes as f64
        } else {
            0.0
        };
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

impl Default for RunResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays complete episodes in a steered environment and reports to
/// observers.
pub struct EpisodeRunner {
    config: RunConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EpisodeRunner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play `config.episodes` episodes, each starting with a reset.
    pub fn run<A: ActionProvider>(
        &mut self,
        env: &mut SteeredGameEnvironment<A>,
    ) -> Result<RunResult> {
        if let Some(seed) = self.config.seed {
            env.actor_mut().set_rng_seed(seed)?;
        }

        log::info!(
            "running {} episodes with {}",
            self.config.episodes,
            env.actor().name()
        );
        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut result = RunResult::new();
        for episode in 0..self.config.episodes {
            let outcome = self.play_episode(episode, env, &mut result)?;
            result.record_episode(outcome);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }
        log::info!(
            "finished: {} wins, {} draws, {} losses, mean reward {:.3}",
            result.wins,
            result.draws,
            result.losses,
            result.mean_reward
        );

        Ok(result)
    }

    fn play_episode<A: ActionProvider>(
        &mut self,
        episode: usize,
        env: &mut SteeredGameEnvironment<A>,
        result: &mut RunResult,
    ) -> Result<Outcome> {
        let (observation, info) = env.reset()?;
        for observer in &mut self.observers {
            observer.on_episode_start(episode, &observation, &info)?;
        }

        let mut total_reward = 0.0;
        let mut step_num = 0;
        let outcome = loop {
            let step = env.step()?;
            total_reward += step.reward;
            result.record_step(&step);

            for observer in &mut self.observers {
                observer.on_step(episode, step_num, &step)?;
            }
            step_num += 1;

            if step.terminal {
                break step.info.outcome;
            }
        };

        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome, total_reward)?;
        }
        Ok(outcome)
    }
}
