//! Rollout driver for the `gym-core` environment.
//!
//! Wires the reference simulator into an [`Episode`], drives it with a
//! [`Policy`] and reports one [`EpisodeSummary`] per episode.
pub mod config;
pub mod logging;
pub mod policy;
pub mod report;
pub mod rollout;

pub use config::{ConfigError, EnvConfigLoader, RunnerConfig};
pub use policy::{FirstActionPolicy, Policy, PolicyKind, RandomPolicy, UniformIndexPolicy};
pub use report::ReportWriter;
pub use rollout::{EpisodeSummary, RolloutLimits, run_episode};

use anyhow::Result;
use gym_core::Episode;
use sim_lite::{LiteEncoder, LiteSimulator};

/// Environment type driven by the runner.
pub type LiteEpisode = Episode<LiteSimulator, LiteEncoder>;

/// Runs `config.episodes` episodes, writing the report if one is configured.
pub fn run_batch(config: &RunnerConfig) -> Result<Vec<EpisodeSummary>> {
    let mut episode = LiteEpisode::new(
        LiteSimulator::new(config.rules()),
        LiteEncoder,
        config.env.clone(),
    )?;
    let mut policy = config.policy.build(config.policy_seed);
    let mut report = config
        .report_path
        .as_deref()
        .map(ReportWriter::create)
        .transpose()?;
    let limits = RolloutLimits {
        max_steps: config.max_steps,
        log_every: config.log_every,
    };

    tracing::info!(
        episodes = config.episodes,
        policy = %config.policy,
        character = %config.env.character,
        ascension = config.env.ascension,
        "starting rollouts"
    );

    let mut summaries = Vec::with_capacity(config.episodes as usize);
    for index in 0..config.episodes {
        let seed = config.seed.map(|seed| seed.wrapping_add(u64::from(index)));
        let summary = run_episode(&mut episode, policy.as_mut(), seed, limits)?;
        if let Some(report) = report.as_mut() {
            report.write(&summary)?;
        }
        summaries.push(summary);
    }

    if let Some(report) = report.as_mut() {
        report.flush()?;
    }

    let wins = summaries
        .iter()
        .filter(|summary| summary.outcome == "victory")
        .count();
    tracing::info!(episodes = summaries.len(), wins, "rollouts complete");

    Ok(summaries)
}
