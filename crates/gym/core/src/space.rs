//! Observation and action space declarations.

use crate::config::EnvConfig;

/// Bounded integer observation space: every feature lies in `[LOW, high[i]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationSpace {
    high: Vec<i32>,
}

impl ObservationSpace {
    /// Lower bound shared by all features.
    pub const LOW: i32 = 0;

    pub fn new(high: Vec<i32>) -> Self {
        Self { high }
    }

    /// Number of features in every observation.
    pub fn len(&self) -> usize {
        self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    /// Per-feature inclusive upper bounds.
    pub fn high(&self) -> &[i32] {
        &self.high
    }

    /// Returns true if `observation` has the right shape and every feature is in bounds.
    pub fn contains(&self, observation: &[i32]) -> bool {
        observation.len() == self.high.len()
            && observation
                .iter()
                .zip(&self.high)
                .all(|(&value, &high)| (Self::LOW..=high).contains(&value))
    }
}

/// Discrete action space of fixed width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSpace {
    Discrete(usize),
}

impl ActionSpace {
    /// Number of distinct action indices.
    pub const fn n(&self) -> usize {
        match self {
            Self::Discrete(n) => *n,
        }
    }

    pub const fn contains(&self, index: usize) -> bool {
        index < self.n()
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::Discrete(EnvConfig::MAX_ACTIONS)
    }
}
