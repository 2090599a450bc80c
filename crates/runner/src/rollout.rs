//! Episode driver: feeds policy choices into an [`Episode`] until it terminates.

use gym_core::{EnvError, Episode, ObservationEncoder, Simulator};
use tracing::{debug, info};

use crate::policy::Policy;

/// Driver-side limits for a single episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RolloutLimits {
    pub max_steps: u64,
    /// Progress log interval in steps; 0 disables progress logs.
    pub log_every: u64,
}

impl Default for RolloutLimits {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            log_every: 0,
        }
    }
}

/// Result of one driven episode, written to the JSON-lines report.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub steps: u64,
    pub total_reward: f64,
    pub floor: i32,
    pub hp: i32,
    /// `victory`, `loss`, `stalled`, or `running` when the driver stopped early.
    pub outcome: String,
    /// Steps whose index was outside the legal prefix of the mask.
    pub invalid_actions: u64,
    /// True when `max_steps` stopped the driver before the episode terminated.
    pub capped: bool,
}

/// Starts a session with `seed` and steps it with `policy` until it terminates
/// or `limits.max_steps` is reached.
///
/// # Errors
///
/// Propagates [`EnvError`] from `start` or `step`.
pub fn run_episode<S, E>(
    episode: &mut Episode<S, E>,
    policy: &mut dyn Policy,
    seed: Option<u64>,
    limits: RolloutLimits,
) -> Result<EpisodeSummary, EnvError>
where
    S: Simulator,
    E: ObservationEncoder<S::Overworld, S::Battle>,
{
    let (mut observation, mut info) = episode.start(seed)?;
    let session_seed = info.seed;
    debug!(seed = session_seed, "rollout started");

    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut invalid_actions = 0;
    let mut terminated = false;

    while steps < limits.max_steps {
        let index = policy.select(&observation, &info);
        if index >= info.available_actions_count {
            invalid_actions += 1;
        }

        let transition = episode.step(index)?;
        steps += 1;
        total_reward += transition.reward;
        observation = transition.observation;
        info = transition.info;

        if limits.log_every > 0 && steps % limits.log_every == 0 {
            info!(
                seed = session_seed,
                steps,
                total_reward,
                floor = info.floor,
                hp = info.hp,
                screen = %info.screen,
                "rollout progress"
            );
        }

        if transition.terminated || transition.truncated {
            terminated = true;
            break;
        }
    }

    let outcome = episode
        .status()
        .map_or("running", |status| status.label())
        .to_string();
    let summary = EpisodeSummary {
        seed: session_seed,
        steps,
        total_reward,
        floor: info.floor,
        hp: info.hp,
        outcome,
        invalid_actions,
        capped: !terminated,
    };

    info!(
        seed = summary.seed,
        steps = summary.steps,
        total_reward = summary.total_reward,
        floor = summary.floor,
        outcome = %summary.outcome,
        invalid_actions = summary.invalid_actions,
        capped = summary.capped,
        "episode finished"
    );

    Ok(summary)
}
