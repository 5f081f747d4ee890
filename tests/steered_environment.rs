//! Steering tiers for unreliable external actors

mod common;

use ttt_oracle::{
    Error, Result,
    actors::{RandomActor, ScriptedActor, ScriptedCompletion, TextActor},
    environment::{ACTOR, AttemptFailure, RewardConfig, SteeringEvent},
    ports::ActionProvider,
    tictactoe::{Board, Cell},
};

/// Fails every first attempt with unreadable text, then plays the lowest
/// free cell.
struct SecondTry {
    fail_next: bool,
}

impl ActionProvider for SecondTry {
    fn act(&mut self, board: &Board) -> Result<usize> {
        let fail = self.fail_next;
        self.fail_next = !fail;
        if fail {
            return Err(Error::UnparsableMove {
                text: "hmm".to_string(),
            });
        }
        board
            .empty_positions()
            .first()
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "second-try"
    }
}

#[test]
fn test_exhaustion_applies_penalty_and_fallback() {
    let rewards = RewardConfig::default();
    let mut steered = common::steered(21, ScriptedActor::new([Some(99), None]));
    let before = *steered.env().board();

    let step = steered.step().unwrap();

    assert_eq!(step.reward, rewards.exhausted_penalty);
    assert!(!step.terminal);
    let fallback = step.info.actor_move;
    assert!(before.is_empty(fallback));
    assert_eq!(step.observation.get(fallback), ACTOR.to_cell());
    match step.info.steering {
        Some(SteeringEvent::Exhausted { failures, fallback: reported }) => {
            assert_eq!(reported, fallback);
            assert_eq!(failures[0], AttemptFailure::OutOfRange(99));
            assert!(matches!(failures[1], AttemptFailure::Unparsable(_)));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn test_occupied_then_legal_is_softer_than_exhaustion() {
    let rewards = RewardConfig::default();
    let probe = common::seeded_env(22);
    let board = *probe.board();
    let occupied = (0..9).find(|&pos| board.get(pos) != Cell::Empty).unwrap();
    let legal = board.empty_positions()[0];

    let mut steered = common::steered(22, ScriptedActor::new([Some(occupied), Some(legal)]));
    let step = steered.step().unwrap();

    assert_eq!(step.info.actor_move, legal);
    assert_eq!(step.reward, rewards.retry_penalty);
    assert!(rewards.retry_penalty.abs() < rewards.exhausted_penalty.abs());
    assert_eq!(
        step.info.steering.map(|event| event.failures().to_vec()),
        Some(vec![AttemptFailure::Occupied(occupied)])
    );
}

#[test]
fn test_exhausted_actor_still_finishes_episode() {
    let mut steered = common::steered(23, ScriptedActor::new([]));
    let mut steps = 0;
    while !steered.env().is_terminal() {
        let step = steered.step().unwrap();
        assert_eq!(step.info.steering.as_ref().map(|e| e.label()), Some("exhausted"));
        steps += 1;
    }
    assert!(steps <= 4);
    assert!(matches!(steered.step(), Err(Error::EpisodeOver)));
}

#[test]
fn test_unparsable_then_legal_is_recovered() {
    let rewards = RewardConfig::default();
    let legal = common::seeded_env(26).board().empty_positions()[0];

    let mut steered = common::steered(26, ScriptedActor::new([None, Some(legal)]));
    let step = steered.step().unwrap();

    assert_eq!(step.info.actor_move, legal);
    assert_eq!(step.reward, rewards.retry_penalty);
    match step.info.steering {
        Some(SteeringEvent::Recovered { failures }) => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], AttemptFailure::Unparsable(_)));
        }
        other => panic!("expected recovery, got {other:?}"),
    }
}

#[test]
fn test_game_ending_fallback_earns_outcome_reward() {
    let rewards = RewardConfig::default();
    for seed in 30..40 {
        let mut steered = common::steered(seed, ScriptedActor::new([]));
        let last = loop {
            let step = steered.step().unwrap();
            if step.terminal {
                break step;
            }
            assert_eq!(step.reward, rewards.exhausted_penalty);
        };

        assert_eq!(last.info.steering.as_ref().map(|e| e.label()), Some("exhausted"));
        assert!(last.info.outcome.is_terminal());
        assert_eq!(
            Some(last.reward),
            rewards.terminal_reward(last.info.outcome, ACTOR)
        );
        assert_ne!(last.reward, rewards.exhausted_penalty);
    }
}

#[test]
fn test_game_ending_recovery_earns_outcome_reward() {
    let rewards = RewardConfig::default();
    for seed in 40..50 {
        let mut steered = common::steered(seed, SecondTry { fail_next: true });
        let last = loop {
            let step = steered.step().unwrap();
            assert_eq!(
                step.info.steering.as_ref().map(|e| e.label()),
                Some("recovered")
            );
            if step.terminal {
                break step;
            }
            assert_eq!(step.reward, rewards.retry_penalty);
        };

        assert_eq!(
            Some(last.reward),
            rewards.terminal_reward(last.info.outcome, ACTOR)
        );
        assert_ne!(last.reward, rewards.retry_penalty);
    }
}

#[test]
fn test_text_actor_drives_steered_environment() {
    let probe = common::seeded_env(24);
    let legal = probe.board().empty_positions()[0];
    // "0" is rejected, the second reply names a free square (1-indexed)
    let reply = format!("I'll take {}", legal + 1);
    let source = ScriptedCompletion::new(vec!["0".to_string(), reply]);
    let actor = TextActor::new(source, ACTOR);

    let mut steered = common::steered(24, actor);
    let step = steered.step().unwrap();

    assert_eq!(step.info.actor_move, legal);
    assert_eq!(
        step.info.steering.as_ref().map(|e| e.label()),
        Some("recovered")
    );
    assert_eq!(steered.actor().source().prompts().len(), 2);
}

#[test]
fn test_erratic_actor_never_crashes() {
    let actor = RandomActor::with_seed("Erratic".to_string(), 25).with_error_rate(0.7);
    let mut steered = common::steered(25, actor);
    for _ in 0..30 {
        steered.reset().unwrap();
        while !steered.env().is_terminal() {
            let step = steered.step().unwrap();
            assert!(step.observation.get(step.info.actor_move) == ACTOR.to_cell());
        }
    }
    assert_eq!(steered.env().tally().total(), 30);
    assert_eq!(steered.env().tally().wins, 0);
}
