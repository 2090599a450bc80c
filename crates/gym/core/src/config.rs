use crate::sim::CharacterClass;

/// Environment configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    /// Character every session of this environment plays.
    pub character: CharacterClass,

    /// Difficulty (ascension) level passed to the simulator.
    pub ascension: u8,

    /// Seed for the generator that draws session seeds when `start` is called
    /// without one. `None` seeds the generator from OS entropy.
    pub seed_stream: Option<u64>,

    /// Reward shaping weights.
    pub reward: RewardConfig,
}

impl EnvConfig {
    // ===== compile-time constants =====
    /// Width of the discrete action space exposed to agents.
    pub const MAX_ACTIONS: usize = 128;
    /// Exclusive upper bound for generated session seeds (31-bit range).
    pub const SEED_UPPER_BOUND: u64 = 1 << 31;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ASCENSION: u8 = 0;
    pub const MAX_ASCENSION: u8 = 20;

    pub fn new(character: CharacterClass, ascension: u8) -> Self {
        Self {
            character,
            ascension: ascension.min(Self::MAX_ASCENSION),
            seed_stream: None,
            reward: RewardConfig::default(),
        }
    }

    pub fn with_seed_stream(mut self, seed_stream: u64) -> Self {
        self.seed_stream = Some(seed_stream);
        self
    }

    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(CharacterClass::default(), Self::DEFAULT_ASCENSION)
    }
}

/// Weights applied to each shaped reward component.
///
/// Penalties are stored as positive magnitudes and subtracted by the shaper.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Reward per floor climbed.
    pub floor_weight: f64,
    /// Reward per hit point gained (and penalty per hit point lost).
    pub hp_weight: f64,
    /// Bonus granted on the step the run is won.
    pub victory_bonus: f64,
    /// Penalty applied on the step the run is lost.
    pub loss_penalty: f64,
    /// Penalty applied when the requested index did not address a legal action.
    pub invalid_action_penalty: f64,
}

impl RewardConfig {
    pub const DEFAULT_FLOOR_WEIGHT: f64 = 10.0;
    pub const DEFAULT_HP_WEIGHT: f64 = 1.0;
    pub const DEFAULT_VICTORY_BONUS: f64 = 1000.0;
    pub const DEFAULT_LOSS_PENALTY: f64 = 100.0;
    pub const DEFAULT_INVALID_ACTION_PENALTY: f64 = 1.0;
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            floor_weight: Self::DEFAULT_FLOOR_WEIGHT,
            hp_weight: Self::DEFAULT_HP_WEIGHT,
            victory_bonus: Self::DEFAULT_VICTORY_BONUS,
            loss_penalty: Self::DEFAULT_LOSS_PENALTY,
            invalid_action_penalty: Self::DEFAULT_INVALID_ACTION_PENALTY,
        }
    }
}
