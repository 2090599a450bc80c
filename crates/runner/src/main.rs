//! `spire-gym`: drives the reference simulator through the RL environment.
//!
//! Configuration comes from `SPIRE_GYM_*` environment variables (a `.env`
//! file is honoured), overridden by command-line flags.
//!
//! ```bash
//! spire-gym --episodes 10 --policy random --seed 42 --report out/runs.jsonl
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gym_core::CharacterClass;
use gym_runner::{EnvConfigLoader, PolicyKind, RunnerConfig, logging, run_batch};

/// Run policies against the deck-building RL environment
#[derive(Parser)]
#[command(name = "spire-gym")]
#[command(version)]
struct Cli {
    /// TOML file with the environment configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of episodes to run
    #[arg(long)]
    episodes: Option<u32>,

    /// Steps per episode before the driver gives up
    #[arg(long)]
    max_steps: Option<u64>,

    /// Progress log interval in steps (0 = only episode ends)
    #[arg(long)]
    log_every: Option<u64>,

    /// Action-selection policy: random, first, uniform-index
    #[arg(long)]
    policy: Option<PolicyKind>,

    /// Seed for sampling policies
    #[arg(long)]
    policy_seed: Option<u64>,

    /// Seed of the first episode; later episodes use consecutive seeds
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    character: Option<CharacterClass>,

    #[arg(long)]
    ascension: Option<u8>,

    /// Boss floor of the reference simulator
    #[arg(long)]
    final_floor: Option<i32>,

    /// Write one JSON summary per episode to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Directory for runner.log
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: RunnerConfig) -> Result<RunnerConfig> {
        if let Some(path) = self.config.as_deref() {
            config.env = EnvConfigLoader::load(path)?;
        }
        if let Some(episodes) = self.episodes {
            config.episodes = episodes.max(1);
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps.max(1);
        }
        if let Some(log_every) = self.log_every {
            config.log_every = log_every;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(character) = self.character {
            config.env.character = character;
        }
        if let Some(ascension) = self.ascension {
            config.env.ascension = ascension.min(gym_core::EnvConfig::MAX_ASCENSION);
        }
        config.policy_seed = self.policy_seed.or(config.policy_seed);
        config.seed = self.seed.or(config.seed);
        config.final_floor = self.final_floor.or(config.final_floor);
        config.report_path = self.report.or(config.report_path);
        config.log_dir = self.log_dir.or(config.log_dir);

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Cli::parse().apply(RunnerConfig::from_env())?;
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    run_batch(&config)?;
    Ok(())
}
