//! Move sources implementing [`ActionProvider`](crate::ports::ActionProvider).

pub mod oracle_opponent;
pub mod random;
pub mod scripted;
pub mod text;

use rand::{SeedableRng, rngs::StdRng};

pub use oracle_opponent::OracleOpponent;
pub use random::RandomActor;
pub use scripted::ScriptedActor;
pub use text::{CompletionSource, ScriptedCompletion, TextActor, parse_move, render_prompt};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}
