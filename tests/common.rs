//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use ttt_oracle::{
    environment::{EnvironmentConfig, GameEnvironment, SteeredGameEnvironment},
    ports::ActionProvider,
    tictactoe::{Board, Player},
};

/// Every non-terminal position reachable from the empty board under
/// X-first alternation, with the player to move.
pub fn reachable_positions() -> Vec<(Board, Player)> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), Player::X)];
    let mut positions = Vec::new();

    while let Some((board, to_move)) = stack.pop() {
        if board.is_terminal() || !seen.insert(board) {
            continue;
        }
        positions.push((board, to_move));
        for pos in board.empty_positions() {
            if let Ok(child) = board.place(pos, to_move) {
                stack.push((child, to_move.opponent()));
            }
        }
    }

    positions
}

pub fn seeded_env(seed: u64) -> GameEnvironment {
    GameEnvironment::new(EnvironmentConfig::new().with_seed(seed)).unwrap()
}

pub fn steered<A: ActionProvider>(seed: u64, actor: A) -> SteeredGameEnvironment<A> {
    SteeredGameEnvironment::new(seeded_env(seed), actor)
}
