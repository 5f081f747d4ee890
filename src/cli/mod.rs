//! CLI infrastructure for the oracle toolkit
//!
//! This module provides the command-line interface for playing episodes
//! against the oracle opponent and querying optimal moves.

pub mod commands;
pub mod output;
