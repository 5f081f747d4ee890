//! Tic-Tac-Toe oracle and turn-based environment
//!
//! This crate provides:
//! - Board representation and rules for the 3x3 game
//! - A memoized minimax/alpha-beta oracle reporting every optimal move
//! - An environment in which an external actor plays O against the oracle
//! - A steered variant that tolerates illegal or unparsable moves
//! - Episode runs with observers, and a small CLI

pub mod actors;
pub mod cli;
pub mod environment;
pub mod error;
pub mod oracle;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, Result};
