//! Play command - run episodes of an actor against the oracle opponent

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    actors::{OracleOpponent, RandomActor},
    cli::output,
    environment::{ACTOR, EnvironmentConfig, GameEnvironment, SteeredGameEnvironment},
    oracle::OptimalMoveOracle,
    pipeline::{EpisodeRunner, JsonlObserver, MetricsObserver, ProgressObserver, RunConfig},
    ports::ActionProvider,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ActorKind {
    /// Uniformly random legal moves
    Random,
    /// Oracle-optimal moves with random tie-breaks
    Optimal,
    /// Random moves that are sometimes illegal, exercising the steering tiers
    Erratic,
}

#[derive(Parser, Debug)]
#[command(about = "Play episodes against the oracle opponent")]
pub struct PlayArgs {
    /// Number of episodes
    #[arg(long, short = 'n', default_value_t = 100)]
    pub episodes: usize,

    /// Actor playing O
    #[arg(long, short = 'a', value_enum, default_value_t = ActorKind::Random)]
    pub actor: ActorKind,

    /// Probability that the erratic actor names an arbitrary cell
    #[arg(long, default_value_t = 0.3)]
    pub error_rate: f64,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON environment configuration
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Attempts granted per step before falling back to a random move
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Write one JSON line per episode with every step
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Export the run summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => EnvironmentConfig::load(path)?,
        None => EnvironmentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(attempts) = args.max_attempts {
        config = config.with_max_attempts(attempts);
    }

    output::print_section("Episode run");
    output::print_kv("Actor", &format!("{:?}", args.actor));
    output::print_config(&config);

    let oracle = OptimalMoveOracle::new();
    let actor = build_actor(args.actor, args.error_rate, &oracle);
    let seed = config.seed;
    let env = GameEnvironment::with_oracle(config, oracle)?;
    let mut steered = SteeredGameEnvironment::new(env, actor);

    let mut runner = EpisodeRunner::new(RunConfig {
        episodes: args.episodes,
        seed: seed.map(|s| s.wrapping_add(2)),
    })
    .with_observer(Box::new(MetricsObserver::new()));
    if !args.quiet {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.trace {
        runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = runner.run(&mut steered)?;

    output::print_run_result(&result);
    output::print_kv("Tally", &output::format_tally(steered.env().tally()));
    output::print_kv(
        "Oracle cache",
        &output::format_number(steered.env().oracle().cache_len()),
    );

    if let Some(path) = &args.trace {
        println!("\nTrace written to: {}", path.display());
    }
    if let Some(path) = &args.export {
        result.save(path)?;
        println!("Summary exported to: {}", path.display());
    }

    Ok(())
}

fn build_actor(
    kind: ActorKind,
    error_rate: f64,
    oracle: &OptimalMoveOracle,
) -> Box<dyn ActionProvider> {
    match kind {
        ActorKind::Random => Box::new(RandomActor::new("Random".to_string())),
        ActorKind::Optimal => Box::new(OracleOpponent::new(oracle.clone(), ACTOR)),
        ActorKind::Erratic => {
            Box::new(RandomActor::new("Erratic".to_string()).with_error_rate(error_rate))
        }
    }
}
