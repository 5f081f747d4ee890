//! Failure-tolerant wrapper for unreliable external actors

use super::{ACTOR, AttemptFailure, GameEnvironment, ResetInfo, SteeringEvent, Step};
use crate::{Error, Result, ports::ActionProvider, tictactoe::Board};

/// [`GameEnvironment`] driven by an [`ActionProvider`] that may answer
/// with illegal or unparsable moves.
///
/// Each step asks the provider up to `max_attempts` times. A legal first
/// answer is scored normally; a legal answer after failures costs the
/// retry penalty; when every attempt fails a random legal move is played
/// on the actor's behalf at the cost of the exhaustion penalty. A finished
/// game's outcome reward always wins over either penalty.
pub struct SteeredGameEnvironment<A> {
    env: GameEnvironment,
    actor: A,
}

impl<A: ActionProvider> SteeredGameEnvironment<A> {
    pub fn new(env: GameEnvironment, actor: A) -> Self {
        Self { env, actor }
    }

    pub fn reset(&mut self) -> Result<(Board, ResetInfo)> {
        self.env.reset()
    }

    /// Obtain a move from the provider and play it.
    ///
    /// # Errors
    ///
    /// [`Error::EpisodeOver`] once the game has finished. Provider failures
    /// never surface here.
    pub fn step(&mut self) -> Result<Step> {
        if self.env.is_terminal() {
            return Err(Error::EpisodeOver);
        }

        let board = *self.env.board();
        let max_attempts = self.env.config().max_attempts;
        let mut failures = Vec::new();

        for attempt in 1..=max_attempts {
            let failure = match self.actor.act(&board) {
                Ok(action) => match board.place(action, ACTOR) {
                    Ok(_) => {
                        let event = if failures.is_empty() {
                            SteeringEvent::Clean
                        } else {
                            SteeringEvent::Recovered { failures }
                        };
                        return self.env.advance(action, Some(event));
                    }
                    Err(err) => AttemptFailure::from(&err),
                },
                Err(err) => AttemptFailure::from(&err),
            };

            log::debug!(
                "{} attempt {attempt}/{max_attempts} rejected: {failure:?}",
                self.actor.name()
            );
            failures.push(failure);
        }

        let exhausted = Error::ExternalActorExhausted {
            attempts: max_attempts,
        };
        let fallback = self.env.random_legal_move()?;
        log::warn!("{}: {exhausted}; playing {fallback} instead", self.actor.name());

        self.env
            .advance(fallback, Some(SteeringEvent::Exhausted { failures, fallback }))
    }

    pub fn env(&self) -> &GameEnvironment {
        &self.env
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut A {
        &mut self.actor
    }

    pub fn into_parts(self) -> (GameEnvironment, A) {
        (self.env, self.actor)
    }
}
