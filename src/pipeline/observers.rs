//! Observer implementations for episode runs
//!
//! Observers allow composable data collection during a run without coupling
//! the runner to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    environment::{ACTOR, ResetInfo, Step},
    ports::Observer,
    tictactoe::{Board, Outcome},
};

/// Complete record of one episode, written as a single JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    /// Opponent's opening ply
    pub opening: usize,
    pub outcome: Outcome,
    pub total_reward: f64,
    pub steps: Vec<Step>,
}

/// Progress bar observer
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: Outcome,
        _total_reward: f64,
    ) -> Result<()> {
        match outcome {
            Outcome::Win(winner) if winner == ACTOR => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Tracks outcome and reward statistics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    returns: Vec<f64>,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64
        }
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Average number of actor steps per episode
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn mean_return(&self) -> f64 {
        if self.returns.is_empty() {
            0.0
        } else {
            self.returns.iter().sum::<f64>() / self.returns.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.total(),
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.rate(self.wins),
            draw_rate: self.draw_rate(),
            loss_rate: self.rate(self.losses),
            mean_return: self.mean_return(),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

/// Snapshot of [`MetricsObserver`] counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub mean_return: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_start(
        &mut self,
        _episode: usize,
        _observation: &Board,
        _info: &ResetInfo,
    ) -> Result<()> {
        self.episode_lengths.push(0);
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step_num: usize, _step: &Step) -> Result<()> {
        if let Some(last) = self.episode_lengths.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: Outcome,
        total_reward: f64,
    ) -> Result<()> {
        match outcome {
            Outcome::Win(winner) if winner == ACTOR => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => return Ok(()),
        }
        self.returns.push(total_reward);
        Ok(())
    }
}

/// Exports one [`EpisodeRecord`] per line in JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    opening: usize,
    steps: Vec<Step>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            opening: 0,
            steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(
        &mut self,
        _episode: usize,
        _observation: &Board,
        info: &ResetInfo,
    ) -> Result<()> {
        self.opening = info.opponent_move;
        self.steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step_num: usize, step: &Step) -> Result<()> {
        self.steps.push(step.clone());
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: Outcome,
        total_reward: f64,
    ) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            opening: self.opening,
            outcome,
            total_reward,
            steps: std::mem::take(&mut self.steps),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StepInfo;

    fn terminal_step(outcome: Outcome, reward: f64) -> Step {
        Step {
            observation: Board::from_string("XOXXOOOXX").unwrap(),
            reward,
            terminal: true,
            truncated: false,
            info: StepInfo {
                actor_move: 1,
                opponent_move: None,
                outcome,
                optimal: true,
                steering: None,
            },
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        let info = ResetInfo {
            opponent_move: 0,
            episode: 1,
        };

        observer.on_episode_start(0, &Board::new(), &info).unwrap();
        observer.on_step(0, 0, &terminal_step(Outcome::Draw, 1.0)).unwrap();
        observer.on_episode_end(0, Outcome::Draw, 1.0).unwrap();

        observer.on_episode_start(1, &Board::new(), &info).unwrap();
        observer.on_step(1, 0, &terminal_step(Outcome::Draw, 0.1)).unwrap();
        let loss = Outcome::Win(ACTOR.opponent());
        observer.on_step(1, 1, &terminal_step(loss, -2.0)).unwrap();
        observer.on_episode_end(1, loss, -1.9).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.losses, 1);
        assert!((summary.avg_episode_length - 1.5).abs() < 1e-12);
        assert!((summary.mean_return - (-0.45)).abs() < 1e-12);
    }

    #[test]
    fn test_progress_observer_lifecycle() {
        let mut observer = ProgressObserver::new();
        observer.on_run_start(2).unwrap();
        observer.on_episode_end(0, Outcome::Draw, 1.0).unwrap();
        observer.on_episode_end(1, Outcome::Win(ACTOR), 2.0).unwrap();
        observer.on_run_end().unwrap();
        assert_eq!((observer.wins, observer.draws, observer.losses), (1, 1, 0));
    }
}
