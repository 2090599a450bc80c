//! Enumerations shared between the adapter and simulator backends.

/// Playable character class.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterClass {
    #[default]
    Ironclad,
    Silent,
    Defect,
    Watcher,
}

/// Screen the overworld context is currently presenting.
///
/// `Battle` signals that the overworld has handed control to a combat
/// encounter and a battle context must be entered.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenState {
    #[default]
    Invalid,
    EventScreen,
    Rewards,
    BossRelicRewards,
    CardSelect,
    MapScreen,
    TreasureRoom,
    RestRoom,
    ShopRoom,
    Battle,
}

impl ScreenState {
    /// Stable index of this screen, used by encoders for one-hot features.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Run-level outcome reported by the overworld context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameOutcome {
    #[default]
    Undecided,
    PlayerVictory,
    PlayerLoss,
}

impl GameOutcome {
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

/// Outcome of a single combat encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    #[default]
    Undecided,
    PlayerVictory,
    PlayerLoss,
}

impl BattleOutcome {
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn character_parses_case_insensitively() {
        assert_eq!(
            CharacterClass::from_str("IRONCLAD").unwrap(),
            CharacterClass::Ironclad
        );
        assert_eq!(
            CharacterClass::from_str("watcher").unwrap(),
            CharacterClass::Watcher
        );
        assert!(CharacterClass::from_str("necromancer").is_err());
    }

    #[test]
    fn screen_labels_are_screaming_snake_case() {
        assert_eq!(ScreenState::MapScreen.to_string(), "MAP_SCREEN");
        assert_eq!(ScreenState::Battle.to_string(), "BATTLE");
    }
}
