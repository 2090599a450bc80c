//! Action-selection policies used by the rollout driver.

use gym_core::{EnvConfig, Observation, StepInfo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses the next action index from the latest observation and info.
pub trait Policy {
    fn select(&mut self, observation: &Observation, info: &StepInfo) -> usize;
}

/// Built-in policy selector, parsed from the command line and environment.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Uniform over the currently legal indices.
    #[default]
    Random,
    /// Always index 0.
    First,
    /// Uniform over the whole action space, legal or not.
    UniformIndex,
}

impl PolicyKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::First => Box::new(FirstActionPolicy),
            PolicyKind::UniformIndex => Box::new(UniformIndexPolicy::new(seed)),
        }
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Samples uniformly among the legal indices.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, _observation: &Observation, info: &StepInfo) -> usize {
        let legal = info.action_mask.available_count();
        if legal == 0 {
            return 0;
        }
        self.rng.gen_range(0..legal)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstActionPolicy;

impl Policy for FirstActionPolicy {
    fn select(&mut self, _observation: &Observation, _info: &StepInfo) -> usize {
        0
    }
}

/// Ignores the mask and samples from `[0, MAX_ACTIONS)`.
pub struct UniformIndexPolicy {
    rng: StdRng,
}

impl UniformIndexPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl Policy for UniformIndexPolicy {
    fn select(&mut self, _observation: &Observation, _info: &StepInfo) -> usize {
        self.rng.gen_range(0..EnvConfig::MAX_ACTIONS)
    }
}
