//! Episode environments for an external actor playing O against the
//! oracle-driven X.

pub mod base;
pub mod config;
pub mod steered;
pub mod step;
pub mod tally;

pub use base::{ACTOR, GameEnvironment, OPPONENT};
pub use config::{EnvironmentConfig, RewardConfig};
pub use steered::SteeredGameEnvironment;
pub use step::{AttemptFailure, Phase, ResetInfo, SteeringEvent, Step, StepInfo};
pub use tally::Tally;
