use crate::action::ActionMask;
use crate::sim::{CharacterClass, GameOutcome};

/// Fixed-length integer observation produced by the encoder.
pub type Observation = Vec<i32>;

/// Parameters identifying one episode. Immutable until the next `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub character: CharacterClass,
    pub ascension: u8,
    pub seed: u64,
}

/// Lifecycle of the current episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpisodeStatus {
    Running,
    /// The simulator decided the run.
    Finished(GameOutcome),
    /// The simulator offered no legal action while the run was undecided.
    Stalled,
}

impl EpisodeStatus {
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_terminal(&self) -> bool {
        !self.is_running()
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Finished(GameOutcome::PlayerVictory) => "victory",
            Self::Finished(GameOutcome::PlayerLoss) => "loss",
            Self::Finished(GameOutcome::Undecided) => "undecided",
            Self::Stalled => "stalled",
        }
    }
}

/// Auxiliary per-step information.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    /// `BATTLE` during a battle, otherwise the overworld screen-state label.
    pub screen: String,
    pub action_mask: ActionMask,
    pub available_actions_count: usize,
    pub floor: i32,
    /// Battle HP while a battle is active, otherwise overworld HP.
    pub hp: i32,
    pub max_hp: i32,
    pub gold: i32,
    pub seed: u64,
}

/// Result of one `step`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// Always false: episodes end only through the simulator's outcome.
    pub truncated: bool,
    pub info: StepInfo,
}
