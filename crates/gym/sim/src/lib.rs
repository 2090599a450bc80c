//! Deterministic reference simulator for `gym-core`.
//!
//! `sim-lite` is a small deck-building roguelike: a run climbs floors on a
//! map of monster, elite, event, rest, shop and treasure rooms, and combat
//! happens in a separate [`Battle`] context that commits its result back to
//! the [`Run`]. All randomness is derived from the session seed, so a seed
//! plus an action sequence replays exactly.
//!
//! The crate exists to drive `gym-core` end to end; [`LiteEncoder`] produces
//! the fixed-length observations.
pub mod battle;
pub mod content;
pub mod encoder;
pub mod rng;
pub mod rules;
pub mod run;

use gym_core::{CharacterClass, EnvConfig, Simulator, SimulatorError};

pub use battle::{Battle, BattleAction, Monster};
pub use content::{Card, MonsterKind, RoomKind};
pub use encoder::LiteEncoder;
pub use rules::LiteRules;
pub use run::{Run, RunAction};

/// [`Simulator`] backend producing [`Run`] / [`Battle`] contexts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiteSimulator {
    rules: LiteRules,
}

impl LiteSimulator {
    pub fn new(rules: LiteRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LiteRules {
        &self.rules
    }
}

impl Simulator for LiteSimulator {
    type Overworld = Run;
    type Battle = Battle;

    fn create_overworld(
        &self,
        character: CharacterClass,
        seed: u64,
        ascension: u8,
    ) -> Result<Run, SimulatorError> {
        if ascension > EnvConfig::MAX_ASCENSION {
            return Err(SimulatorError::AscensionOutOfRange {
                requested: ascension,
                max: EnvConfig::MAX_ASCENSION,
            });
        }
        if self.rules.final_floor < 1 {
            return Err(SimulatorError::Unavailable(format!(
                "final floor must be positive, got {}",
                self.rules.final_floor
            )));
        }

        Ok(Run::new(self.rules.clone(), character, seed, ascension))
    }
}
