//! Replays a fixed sequence of replies

use std::collections::VecDeque;

use crate::{Error, Result, ports::ActionProvider, tictactoe::Board};

/// Actor that answers from a predetermined script.
///
/// `Some(index)` is returned as-is, legal or not; `None` stands for output
/// that could not be parsed. Once the script runs out every call fails.
pub struct ScriptedActor {
    name: String,
    replies: VecDeque<Option<usize>>,
}

impl ScriptedActor {
    pub fn new(replies: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            name: "Scripted".to_string(),
            replies: replies.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl ActionProvider for ScriptedActor {
    fn act(&mut self, _board: &Board) -> Result<usize> {
        match self.replies.pop_front() {
            Some(Some(index)) => Ok(index),
            Some(None) => Err(Error::UnparsableMove {
                text: "<unparsable>".to_string(),
            }),
            None => Err(Error::UnparsableMove {
                text: "<script exhausted>".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
