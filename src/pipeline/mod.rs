//! Episode runs with composable observers
//!
//! This module provides:
//! - An episode runner driving a steered environment to completion
//! - Aggregated run results with JSON export
//! - Observers for progress display, metrics and JSONL traces

pub mod observers;
pub mod runner;

pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
};
pub use runner::{EpisodeRunner, RunConfig, RunResult};

pub use crate::ports::Observer;
