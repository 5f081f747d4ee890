//! Subcommands of the `ttt-oracle` binary

pub mod optimal;
pub mod play;
