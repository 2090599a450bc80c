//! Dense reward shaping from consecutive state samples.
//!
//! The simulator only reports sparse signals (floor reached, hit points, run
//! outcome). [`RewardShaper::compute`] turns the difference between two samples
//! into a scalar reward; [`RewardShaper::observe`] wraps it with the baseline
//! bookkeeping the episode needs, including HP continuity across context
//! switches.

use crate::config::RewardConfig;
use crate::sim::GameOutcome;

/// The slice of simulator state the shaper reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSample {
    pub floor: i32,
    /// HP of the active context: the battle's player HP during a battle,
    /// otherwise the overworld HP.
    pub hp: i32,
    pub outcome: GameOutcome,
}

impl RewardSample {
    pub const fn new(floor: i32, hp: i32, outcome: GameOutcome) -> Self {
        Self { floor, hp, outcome }
    }
}

/// Per-component reward for one step. [`RewardBreakdown::total`] is the
/// reward returned to the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardBreakdown {
    pub floor: f64,
    pub hp: f64,
    pub terminal: f64,
    pub invalid_action: f64,
}

impl RewardBreakdown {
    pub fn total(&self) -> f64 {
        self.floor + self.hp + self.terminal + self.invalid_action
    }
}

/// Stateful reward shaper holding the previous step's sample.
#[derive(Clone, Debug)]
pub struct RewardShaper {
    weights: RewardConfig,
    baseline: RewardSample,
}

impl RewardShaper {
    pub fn new(weights: RewardConfig, baseline: RewardSample) -> Self {
        Self { weights, baseline }
    }

    pub fn weights(&self) -> &RewardConfig {
        &self.weights
    }

    /// Sample the next reward is measured against.
    pub fn baseline(&self) -> RewardSample {
        self.baseline
    }

    /// Replaces the baseline, e.g. when a new session starts.
    pub fn reset(&mut self, baseline: RewardSample) {
        self.baseline = baseline;
    }

    /// Pure reward for the transition `previous -> current`.
    ///
    /// The terminal component fires only on the step the outcome leaves
    /// `Undecided`.
    pub fn compute(
        weights: &RewardConfig,
        previous: &RewardSample,
        current: &RewardSample,
        action_valid: bool,
    ) -> RewardBreakdown {
        let floor = f64::from(current.floor - previous.floor) * weights.floor_weight;
        let hp = f64::from(current.hp - previous.hp) * weights.hp_weight;

        let terminal = match (previous.outcome, current.outcome) {
            (GameOutcome::Undecided, GameOutcome::PlayerVictory) => weights.victory_bonus,
            (GameOutcome::Undecided, GameOutcome::PlayerLoss) => -weights.loss_penalty,
            _ => 0.0,
        };

        let invalid_action = if action_valid {
            0.0
        } else {
            -weights.invalid_action_penalty
        };

        RewardBreakdown {
            floor,
            hp,
            terminal,
            invalid_action,
        }
    }

    /// Scores `current` against the baseline and advances the baseline.
    ///
    /// `outgoing_hp` is the HP reading of the context that was active before a
    /// context switch on this step. When present it is used for the HP delta and
    /// the baseline is then rebased onto `current.hp`, so entering or leaving a
    /// battle never registers as a change in HP by itself.
    ///
    /// HP the simulator changes while committing a switch (for example healing
    /// applied by `exit_battle`) is absorbed into the new baseline and never
    /// scored. On such steps the reward's HP term differs from the difference
    /// between consecutive `StepInfo::hp` readings.
    pub fn observe(
        &mut self,
        current: RewardSample,
        outgoing_hp: Option<i32>,
        action_valid: bool,
    ) -> RewardBreakdown {
        let measured = RewardSample {
            hp: outgoing_hp.unwrap_or(current.hp),
            ..current
        };
        let breakdown = Self::compute(&self.weights, &self.baseline, &measured, action_valid);
        self.baseline = current;
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(floor: i32, hp: i32, outcome: GameOutcome) -> RewardSample {
        RewardSample::new(floor, hp, outcome)
    }

    #[test]
    fn sums_floor_and_hp_components() {
        let weights = RewardConfig::default();
        let previous = sample(3, 50, GameOutcome::Undecided);
        let current = sample(4, 44, GameOutcome::Undecided);

        let reward = RewardShaper::compute(&weights, &previous, &current, true);

        assert_eq!(reward.floor, 10.0);
        assert_eq!(reward.hp, -6.0);
        assert_eq!(reward.terminal, 0.0);
        assert_eq!(reward.total(), 4.0);
    }

    #[test]
    fn terminal_bonus_only_on_transition() {
        let weights = RewardConfig::default();
        let undecided = sample(16, 30, GameOutcome::Undecided);
        let won = sample(16, 30, GameOutcome::PlayerVictory);
        let lost = sample(16, 0, GameOutcome::PlayerLoss);

        assert_eq!(
            RewardShaper::compute(&weights, &undecided, &won, true).total(),
            1000.0
        );
        assert_eq!(
            RewardShaper::compute(&weights, &won, &won, true).terminal,
            0.0
        );
        assert_eq!(
            RewardShaper::compute(&weights, &undecided, &lost, true).total(),
            -130.0
        );
    }

    #[test]
    fn invalid_action_penalty_is_additive() {
        let weights = RewardConfig::default();
        let previous = sample(1, 70, GameOutcome::Undecided);
        let current = sample(2, 70, GameOutcome::Undecided);

        let valid = RewardShaper::compute(&weights, &previous, &current, true);
        let invalid = RewardShaper::compute(&weights, &previous, &current, false);

        assert_eq!(invalid.invalid_action, -1.0);
        assert_eq!(valid.total() - invalid.total(), 1.0);
    }

    #[test]
    fn observe_rebases_hp_on_context_switch() {
        let mut shaper = RewardShaper::new(
            RewardConfig::default(),
            sample(5, 60, GameOutcome::Undecided),
        );

        // Leaving a battle at 52 HP; the overworld then reports 58 after a
        // post-combat heal. Only the combat loss is scored.
        let reward = shaper.observe(sample(5, 58, GameOutcome::Undecided), Some(52), true);
        assert_eq!(reward.hp, -8.0);
        assert_eq!(shaper.baseline().hp, 58);

        let reward = shaper.observe(sample(5, 58, GameOutcome::Undecided), None, true);
        assert_eq!(reward.total(), 0.0);
    }

    #[test]
    fn custom_weights_are_applied() {
        let weights = RewardConfig {
            floor_weight: 2.0,
            hp_weight: 0.5,
            victory_bonus: 10.0,
            loss_penalty: 5.0,
            invalid_action_penalty: 0.25,
        };
        let previous = sample(0, 10, GameOutcome::Undecided);
        let current = sample(1, 14, GameOutcome::PlayerVictory);

        let reward = RewardShaper::compute(&weights, &previous, &current, false);
        assert_eq!(reward.total(), 2.0 + 2.0 + 10.0 - 0.25);
    }
}
