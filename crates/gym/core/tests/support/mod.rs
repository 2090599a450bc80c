//! Scripted simulator used by the gym-core integration tests.
//!
//! The tower is a straight climb: the map screen offers `Fight`, `Climb` and
//! `Rest` (plus optional padding actions). Fighting opens a duel in which each
//! `Strike` costs the player `damage_taken` HP and the enemy 10 HP. Reaching
//! `final_floor` wins the run.
#![allow(dead_code)]

use gym_core::{
    BattleContext, BattleOutcome, CharacterClass, GameOutcome, ObservationEncoder,
    OverworldContext, ScreenState, Simulator, SimulatorError,
};

#[derive(Clone, Debug)]
pub struct TowerSimulator {
    pub max_hp: i32,
    pub enemy_hp: i32,
    pub damage_taken: i32,
    /// HP restored by `exit_battle` after a won duel.
    pub heal_on_exit: i32,
    /// HP a duel starts at instead of the overworld HP.
    pub battle_entry_hp: Option<i32>,
    /// Padding actions appended to the map screen catalog.
    pub extra_actions: usize,
    /// Floor at which the map screen stops offering any action.
    pub stall_floor: Option<i32>,
    pub final_floor: i32,
    pub unavailable: bool,
}

impl Default for TowerSimulator {
    fn default() -> Self {
        Self {
            max_hp: 50,
            enemy_hp: 20,
            damage_taken: 4,
            heal_on_exit: 0,
            battle_entry_hp: None,
            extra_actions: 0,
            stall_floor: None,
            final_floor: 3,
            unavailable: false,
        }
    }
}

impl Simulator for TowerSimulator {
    type Overworld = Tower;
    type Battle = Duel;

    fn create_overworld(
        &self,
        character: CharacterClass,
        seed: u64,
        ascension: u8,
    ) -> Result<Tower, SimulatorError> {
        if self.unavailable {
            return Err(SimulatorError::Unavailable("tower offline".into()));
        }
        if ascension > 20 {
            return Err(SimulatorError::AscensionOutOfRange {
                requested: ascension,
                max: 20,
            });
        }
        Ok(Tower {
            rules: self.clone(),
            character,
            seed,
            floor: 0,
            hp: self.max_hp - i32::from(ascension),
            gold: 99,
            screen: ScreenState::MapScreen,
            outcome: GameOutcome::Undecided,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TowerAction {
    Fight,
    Climb,
    Rest,
    Wait(usize),
}

#[derive(Clone, Debug)]
pub struct Tower {
    rules: TowerSimulator,
    pub character: CharacterClass,
    pub seed: u64,
    pub floor: i32,
    pub hp: i32,
    pub gold: i32,
    pub screen: ScreenState,
    pub outcome: GameOutcome,
}

impl OverworldContext for Tower {
    type Action = TowerAction;

    fn floor(&self) -> i32 {
        self.floor
    }

    fn cur_hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.rules.max_hp
    }

    fn gold(&self) -> i32 {
        self.gold
    }

    fn screen_state(&self) -> ScreenState {
        self.screen
    }

    fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn possible_actions(&self) -> Vec<TowerAction> {
        if self.outcome.is_decided() || Some(self.floor) == self.rules.stall_floor {
            return Vec::new();
        }
        let mut actions = vec![TowerAction::Fight, TowerAction::Climb, TowerAction::Rest];
        actions.extend((0..self.rules.extra_actions).map(TowerAction::Wait));
        actions
    }

    fn execute(&mut self, action: &TowerAction) {
        match action {
            TowerAction::Fight => self.screen = ScreenState::Battle,
            TowerAction::Climb => {
                self.floor += 1;
                if self.floor >= self.rules.final_floor {
                    self.outcome = GameOutcome::PlayerVictory;
                }
            }
            TowerAction::Rest => self.hp = (self.hp + 5).min(self.rules.max_hp),
            TowerAction::Wait(_) => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuelAction {
    Strike,
    Guard,
}

#[derive(Clone, Debug)]
pub struct Duel {
    pub player_hp: i32,
    pub enemy_hp: i32,
    damage_taken: i32,
    heal_on_exit: i32,
    pub outcome: BattleOutcome,
}

impl BattleContext for Duel {
    type Overworld = Tower;
    type Action = DuelAction;

    fn enter(overworld: &Tower) -> Self {
        Self {
            player_hp: overworld.rules.battle_entry_hp.unwrap_or(overworld.hp),
            enemy_hp: overworld.rules.enemy_hp,
            damage_taken: overworld.rules.damage_taken,
            heal_on_exit: overworld.rules.heal_on_exit,
            outcome: BattleOutcome::Undecided,
        }
    }

    fn player_hp(&self) -> i32 {
        self.player_hp
    }

    fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    fn possible_actions(&self) -> Vec<DuelAction> {
        vec![DuelAction::Strike, DuelAction::Guard]
    }

    fn execute(&mut self, action: &DuelAction) {
        match action {
            DuelAction::Strike => {
                self.enemy_hp -= 10;
                self.player_hp -= self.damage_taken;
            }
            DuelAction::Guard => self.player_hp -= 1,
        }
        if self.player_hp <= 0 {
            self.player_hp = 0;
            self.outcome = BattleOutcome::PlayerLoss;
        } else if self.enemy_hp <= 0 {
            self.outcome = BattleOutcome::PlayerVictory;
        }
    }

    fn exit_battle(self, overworld: &mut Tower) {
        overworld.screen = ScreenState::MapScreen;
        match self.outcome {
            BattleOutcome::PlayerLoss => {
                overworld.hp = 0;
                overworld.outcome = GameOutcome::PlayerLoss;
            }
            _ => {
                overworld.hp = (self.player_hp + self.heal_on_exit).min(overworld.rules.max_hp);
                overworld.gold += 10;
            }
        }
    }
}

/// Encodes `[floor, hp, gold, screen, in_battle, enemy_hp]`.
#[derive(Clone, Debug, Default)]
pub struct TowerEncoder {
    /// Drops the last feature from every observation.
    pub truncate: bool,
    /// Declares no features at all.
    pub empty: bool,
}

impl ObservationEncoder<Tower, Duel> for TowerEncoder {
    fn observation(&self, overworld: &Tower, battle: Option<&Duel>) -> Vec<i32> {
        let mut features = vec![
            overworld.floor,
            battle.map_or(overworld.hp, |duel| duel.player_hp),
            overworld.gold,
            overworld.screen.index() as i32,
            i32::from(battle.is_some()),
            battle.map_or(0, |duel| duel.enemy_hp.max(0)),
        ];
        if self.truncate {
            features.pop();
        }
        features
    }

    fn observation_maximums(&self) -> Vec<i32> {
        if self.empty {
            return Vec::new();
        }
        vec![20, 100, 1000, 9, 1, 100]
    }
}
