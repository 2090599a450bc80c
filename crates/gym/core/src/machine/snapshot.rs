use core::fmt;

use crate::reward::RewardSample;
use crate::sim::{BattleOutcome, GameOutcome, ScreenState};

/// Which sub-context is currently active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Overworld,
    Battle,
}

/// Screen presented to the agent: the overworld's screen-state, or the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Overworld(ScreenState),
    Battle,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Overworld(state) => write!(f, "{}", state),
            Screen::Battle => f.write_str("BATTLE"),
        }
    }
}

/// Combat-local state, present only while a battle is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub player_hp: i32,
    pub outcome: BattleOutcome,
}

/// Scalar view of the session read once per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub floor: i32,
    /// Context-sensitive HP: battle HP while a battle is active.
    pub hp: i32,
    pub max_hp: i32,
    pub gold: i32,
    pub screen: Screen,
    pub outcome: GameOutcome,
    pub battle: Option<BattleSnapshot>,
}

impl GameSnapshot {
    pub fn phase(&self) -> Phase {
        match self.battle {
            Some(_) => Phase::Battle,
            None => Phase::Overworld,
        }
    }

    pub fn reward_sample(&self) -> RewardSample {
        RewardSample::new(self.floor, self.hp, self.outcome)
    }
}
