//! Episode runner, observers and persisted configuration

mod common;

use std::{
    fs,
    sync::{Arc, Mutex},
};

use ttt_oracle::{
    Result,
    actors::{OracleOpponent, RandomActor},
    environment::{
        ACTOR, EnvironmentConfig, GameEnvironment, ResetInfo, RewardConfig,
        SteeredGameEnvironment, Step,
    },
    oracle::OptimalMoveOracle,
    pipeline::{EpisodeRecord, EpisodeRunner, JsonlObserver, RunConfig, RunResult},
    ports::Observer,
    tictactoe::{Board, Outcome},
};

/// Records every callback so the event order can be checked
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<String>>>);

impl Observer for EventLog {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        self.0.lock().unwrap().push(format!("run {total_episodes}"));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize, board: &Board, _info: &ResetInfo) -> Result<()> {
        assert_eq!(board.occupied_count(), 1);
        self.0.lock().unwrap().push(format!("start {episode}"));
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step_num: usize, _step: &Step) -> Result<()> {
        self.0.lock().unwrap().push(format!("step {step_num}"));
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, _outcome: Outcome, _reward: f64) -> Result<()> {
        self.0.lock().unwrap().push(format!("end {episode}"));
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.0.lock().unwrap().push("done".to_string());
        Ok(())
    }
}

#[test]
fn test_observer_event_order() {
    let log = EventLog::default();
    let mut steered = common::steered(31, RandomActor::new("Random".to_string()));

    EpisodeRunner::new(RunConfig {
        episodes: 2,
        seed: Some(31),
    })
    .with_observer(Box::new(log.clone()))
    .run(&mut steered)
    .unwrap();

    let events = log.0.lock().unwrap().clone();
    assert_eq!(events.first().map(String::as_str), Some("run 2"));
    assert_eq!(events.last().map(String::as_str), Some("done"));
    assert_eq!(events[1], "start 0");
    assert_eq!(events[2], "step 0");
    let end0 = events.iter().position(|e| e == "end 0").unwrap();
    assert_eq!(events[end0 + 1], "start 1");
}

#[test]
fn test_jsonl_trace_has_one_line_per_episode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");

    let mut steered = common::steered(
        32,
        RandomActor::with_seed("Erratic".to_string(), 32).with_error_rate(0.5),
    );
    let result = EpisodeRunner::new(RunConfig {
        episodes: 5,
        seed: None,
    })
    .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
    .run(&mut steered)
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let records: Vec<EpisodeRecord> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 5);
    let steps: usize = records.iter().map(|r| r.steps.len()).sum();
    assert_eq!(steps, result.total_steps);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.episode, i);
        assert!(record.steps.last().unwrap().terminal);
        let sum: f64 = record.steps.iter().map(|s| s.reward).sum();
        assert!((sum - record.total_reward).abs() < 1e-9);
    }
}

#[test]
fn test_optimal_actor_draws_every_episode() {
    let oracle = OptimalMoveOracle::new();
    let env =
        GameEnvironment::with_oracle(EnvironmentConfig::new().with_seed(33), oracle.clone())
            .unwrap();
    let mut steered = SteeredGameEnvironment::new(env, OracleOpponent::new(oracle, ACTOR));

    let result = EpisodeRunner::new(RunConfig {
        episodes: 50,
        seed: Some(33),
    })
    .run(&mut steered)
    .unwrap();

    assert_eq!(result.draws, 50);
    assert_eq!(result.draw_rate, 1.0);
    assert_eq!(result.suboptimal_moves, 0);
    let rewards = RewardConfig::default();
    // Every episode: shaping bonuses on open steps plus the draw reward
    assert!(result.mean_reward >= rewards.draw);
}

#[test]
fn test_run_result_save_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");

    let mut steered = common::steered(34, RandomActor::new("Random".to_string()));
    let result = EpisodeRunner::new(RunConfig {
        episodes: 10,
        seed: Some(34),
    })
    .run(&mut steered)
    .unwrap();

    result.save(&path).unwrap();
    let loaded = RunResult::load(&path).unwrap();
    assert_eq!(loaded, result);
}

#[test]
fn test_environment_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.json");

    let config = EnvironmentConfig::new()
        .with_seed(35)
        .with_max_attempts(3)
        .with_rewards(RewardConfig::default().with_exhausted_penalty(-20.0));
    config.save(&path).unwrap();

    let loaded = EnvironmentConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    // Exhaustion must hurt more than a merely suboptimal move
    fs::write(
        &path,
        r#"{"rewards": {"suboptimal_move_penalty": -3.0, "exhausted_penalty": -1.0}}"#,
    )
    .unwrap();

    assert!(matches!(
        EnvironmentConfig::load(&path),
        Err(ttt_oracle::Error::InvalidConfiguration { .. })
    ));
}
