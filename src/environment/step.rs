//! Values returned from `reset` and `step`

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    tictactoe::{Board, Outcome},
};

/// Where the episode stands between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingExternalMove,
    Terminal(Outcome),
}

/// Extra data returned by `reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetInfo {
    /// The fixed opponent's opening ply
    pub opponent_move: usize,
    /// 1-based episode counter
    pub episode: usize,
}

/// Why one attempt by a steered actor was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptFailure {
    OutOfRange(usize),
    Occupied(usize),
    Unparsable(String),
    Provider(String),
}

impl From<&Error> for AttemptFailure {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidActionRange { action } => AttemptFailure::OutOfRange(*action),
            Error::CellOccupied { position } => AttemptFailure::Occupied(*position),
            Error::UnparsableMove { text } => AttemptFailure::Unparsable(text.clone()),
            other => AttemptFailure::Provider(other.to_string()),
        }
    }
}

/// How the steered variant obtained the actor's move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringEvent {
    /// First attempt was legal
    Clean,
    /// A retry produced a legal move after earlier failures
    Recovered { failures: Vec<AttemptFailure> },
    /// Every attempt failed; `fallback` was chosen uniformly at random
    Exhausted {
        failures: Vec<AttemptFailure>,
        fallback: usize,
    },
}

impl SteeringEvent {
    pub fn label(&self) -> &'static str {
        match self {
            SteeringEvent::Clean => "clean",
            SteeringEvent::Recovered { .. } => "recovered",
            SteeringEvent::Exhausted { .. } => "exhausted",
        }
    }

    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            SteeringEvent::Clean => &[],
            SteeringEvent::Recovered { failures } | SteeringEvent::Exhausted { failures, .. } => {
                failures
            }
        }
    }
}

/// Extra data returned by `step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Move applied for the external actor
    pub actor_move: usize,
    /// The fixed opponent's reply, if the game was still open
    pub opponent_move: Option<usize>,
    pub outcome: Outcome,
    /// Whether the actor's move was oracle-optimal on the board it was
    /// played on
    pub optimal: bool,
    /// Present only for steered steps
    pub steering: Option<SteeringEvent>,
}

/// Result of one `step` call.
///
/// The opponent's reply is folded into the same step, so `observation` is
/// always a board on which the actor is to move (or a terminal board).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub observation: Board,
    pub reward: f64,
    pub terminal: bool,
    /// Always false: episodes end only through the rules
    pub truncated: bool,
    pub info: StepInfo,
}
