//! Free-text move sources
//!
//! A [`TextActor`] renders the board as a numbered grid, asks a
//! [`CompletionSource`] for a reply and extracts the first digit as a
//! 1-indexed cell. Concrete clients for remote models live outside this
//! crate; anything that can turn a prompt into text can drive a game.

use std::collections::VecDeque;

use crate::{
    Error, Result,
    ports::ActionProvider,
    tictactoe::{Board, Player},
};

/// Something that answers a prompt with free text.
pub trait CompletionSource: Send {
    fn complete(&mut self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Extract a 0-indexed move from free text.
///
/// Only the first ASCII digit counts. Digits `1..=9` map to cells `0..=8`;
/// a leading `0` or text with no digit at all is rejected.
///
/// ```
/// use ttt_oracle::actors::parse_move;
///
/// assert_eq!(parse_move("I'll take square 5.").unwrap(), 4);
/// assert!(parse_move("pass").is_err());
/// ```
pub fn parse_move(text: &str) -> Result<usize> {
    let digit = text
        .chars()
        .find(char::is_ascii_digit)
        .and_then(|c| c.to_digit(10));

    match digit {
        Some(d @ 1..=9) => Ok(d as usize - 1),
        _ => Err(Error::UnparsableMove {
            text: text.to_string(),
        }),
    }
}

/// Build the prompt shown to a text-driven actor.
pub fn render_prompt(preamble: &str, board: &Board, mark: Player) -> String {
    format!(
        "{preamble}\n\nYou are playing {mark}.\n\n{}\n\nReply with the number of the square you take.",
        board.render_numbered()
    )
}

const DEFAULT_PREAMBLE: &str = "We are playing tic-tac-toe. Open squares show their number.";

/// Adapter from a [`CompletionSource`] to an [`ActionProvider`].
pub struct TextActor<S> {
    source: S,
    mark: Player,
    preamble: String,
    name: String,
    last_reply: Option<String>,
}

impl<S: CompletionSource> TextActor<S> {
    pub fn new(source: S, mark: Player) -> Self {
        let name = format!("Text({})", source.name());
        Self {
            source,
            mark,
            preamble: DEFAULT_PREAMBLE.to_string(),
            name,
            last_reply: None,
        }
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// Raw text of the most recent completion, parsed or not
    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CompletionSource> ActionProvider for TextActor<S> {
    fn act(&mut self, board: &Board) -> Result<usize> {
        let prompt = render_prompt(&self.preamble, board, self.mark);
        let reply = self.source.complete(&prompt)?;
        log::trace!("{} replied {reply:?}", self.name);
        let parsed = parse_move(&reply);
        self.last_reply = Some(reply);
        parsed
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Completion source that replays canned replies and records prompts.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    replies: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedCompletion {
    pub fn new<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl CompletionSource for ScriptedCompletion {
    fn complete(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.replies
            .pop_front()
            .ok_or_else(|| Error::CompletionFailed {
                source_name: "scripted".to_string(),
                message: "no replies left".to_string(),
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_takes_first_digit() {
        assert_eq!(parse_move("1").unwrap(), 0);
        assert_eq!(parse_move("Move: 9").unwrap(), 8);
        assert_eq!(parse_move("3 or maybe 7").unwrap(), 2);
        assert_eq!(parse_move("**5**").unwrap(), 4);
    }

    #[test]
    fn test_parse_move_rejects_zero_and_missing_digits() {
        assert!(matches!(
            parse_move("0"),
            Err(Error::UnparsableMove { .. })
        ));
        // The first digit decides, even if a valid one follows
        assert!(parse_move("0 then 4").is_err());
        assert!(parse_move("").is_err());
        assert!(parse_move("center").is_err());
    }

    #[test]
    fn test_prompt_shows_numbered_board() {
        let board = Board::from_string("X...O....").unwrap();
        let prompt = render_prompt("Hi.", &board, Player::O);
        assert!(prompt.starts_with("Hi."));
        assert!(prompt.contains("X 2 3\n4 O 6\n7 8 9"));
        assert!(prompt.contains("You are playing O"));
    }

    #[test]
    fn test_text_actor_parses_replies() {
        let source = ScriptedCompletion::new(["I choose 5", "hmm"]);
        let mut actor = TextActor::new(source, Player::O).with_preamble("Play well.");
        let board = Board::from_string("X........").unwrap();

        assert_eq!(actor.act(&board).unwrap(), 4);
        assert_eq!(actor.last_reply(), Some("I choose 5"));

        assert!(matches!(
            actor.act(&board),
            Err(Error::UnparsableMove { .. })
        ));
        assert_eq!(actor.last_reply(), Some("hmm"));

        assert!(matches!(
            actor.act(&board),
            Err(Error::CompletionFailed { .. })
        ));
        assert_eq!(actor.source().prompts().len(), 3);
        assert!(actor.source().prompts()[0].starts_with("Play well."));
        assert_eq!(actor.name(), "Text(scripted)");
    }
}
