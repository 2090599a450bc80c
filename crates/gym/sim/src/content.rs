//! Static content: cards, monsters, rooms and character loadouts.
//!
//! Content is read-only and never stored by value in encoders; everything
//! here is keyed by small `Copy` enums.

use gym_core::CharacterClass;

use crate::rng::SimRng;

/// Playable card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Card {
    Strike,
    Defend,
    Bash,
    Cleave,
    ShrugItOff,
    PommelStrike,
    IronWave,
    Bloodletting,
}

/// Effects of playing a card, resolved by the battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardEffect {
    pub damage: i32,
    pub hits_all: bool,
    pub block: i32,
    pub draw: usize,
    pub hp_cost: i32,
    pub energy_gain: i32,
}

impl Card {
    pub const fn cost(self) -> i32 {
        match self {
            Card::Bash => 2,
            Card::Bloodletting => 0,
            _ => 1,
        }
    }

    /// True if the card needs a single monster target.
    pub const fn targets(self) -> bool {
        matches!(
            self,
            Card::Strike | Card::Bash | Card::PommelStrike | Card::IronWave
        )
    }

    pub const fn effect(self) -> CardEffect {
        let none = CardEffect {
            damage: 0,
            hits_all: false,
            block: 0,
            draw: 0,
            hp_cost: 0,
            energy_gain: 0,
        };
        match self {
            Card::Strike => CardEffect { damage: 6, ..none },
            Card::Defend => CardEffect { block: 5, ..none },
            Card::Bash => CardEffect { damage: 8, ..none },
            Card::Cleave => CardEffect {
                damage: 8,
                hits_all: true,
                ..none
            },
            Card::ShrugItOff => CardEffect {
                block: 8,
                draw: 1,
                ..none
            },
            Card::PommelStrike => CardEffect {
                damage: 9,
                draw: 1,
                ..none
            },
            Card::IronWave => CardEffect {
                damage: 5,
                block: 5,
                ..none
            },
            Card::Bloodletting => CardEffect {
                hp_cost: 3,
                energy_gain: 2,
                ..none
            },
        }
    }

    /// Shop price in gold.
    pub const fn price(self) -> i32 {
        match self {
            Card::Strike | Card::Defend => 40,
            Card::Bloodletting | Card::IronWave => 55,
            _ => 75,
        }
    }

    /// Cards that can appear as rewards or in shops.
    pub const REWARD_POOL: [Card; 6] = [
        Card::Bash,
        Card::Cleave,
        Card::ShrugItOff,
        Card::PommelStrike,
        Card::IronWave,
        Card::Bloodletting,
    ];

    pub fn random_reward(rng: &mut SimRng) -> Card {
        Self::REWARD_POOL[rng.below(Self::REWARD_POOL.len() as u32) as usize]
    }
}

/// Enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MonsterKind {
    Louse,
    Cultist,
    JawWorm,
    GremlinNob,
    Lagavulin,
    Guardian,
}

impl MonsterKind {
    pub const fn base_hp(self) -> i32 {
        match self {
            MonsterKind::Louse => 12,
            MonsterKind::Cultist => 48,
            MonsterKind::JawWorm => 40,
            MonsterKind::GremlinNob => 82,
            MonsterKind::Lagavulin => 109,
            MonsterKind::Guardian => 240,
        }
    }

    /// Inclusive range of attack damage per turn.
    pub const fn damage(self) -> (i32, i32) {
        match self {
            MonsterKind::Louse => (5, 7),
            MonsterKind::Cultist => (4, 8),
            MonsterKind::JawWorm => (7, 11),
            MonsterKind::GremlinNob => (12, 16),
            MonsterKind::Lagavulin => (14, 18),
            MonsterKind::Guardian => (10, 20),
        }
    }
}

/// Room offered on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoomKind {
    Monster,
    Elite,
    Event,
    Rest,
    Shop,
    Treasure,
    Boss,
}

impl RoomKind {
    /// Non-zero code used by the encoder; 0 means "no room".
    pub const fn code(self) -> i32 {
        self as i32 + 1
    }

    pub const MAX_CODE: i32 = RoomKind::Boss as i32 + 1;

    const TABLE: [RoomKind; 6] = [
        RoomKind::Monster,
        RoomKind::Elite,
        RoomKind::Event,
        RoomKind::Rest,
        RoomKind::Shop,
        RoomKind::Treasure,
    ];
    const WEIGHTS: [u32; 6] = [45, 10, 20, 12, 8, 5];

    pub fn random(rng: &mut SimRng) -> RoomKind {
        Self::TABLE[rng.weighted(&Self::WEIGHTS)]
    }

    pub const fn is_combat(self) -> bool {
        matches!(self, RoomKind::Monster | RoomKind::Elite | RoomKind::Boss)
    }

    /// Monsters fought in a combat room of this kind.
    pub fn encounter(self, rng: &mut SimRng) -> Vec<MonsterKind> {
        match self {
            RoomKind::Boss => vec![MonsterKind::Guardian],
            RoomKind::Elite => match rng.below(2) {
                0 => vec![MonsterKind::GremlinNob],
                _ => vec![MonsterKind::Lagavulin],
            },
            _ => match rng.below(3) {
                0 => vec![MonsterKind::Cultist],
                1 => vec![MonsterKind::JawWorm],
                _ => vec![MonsterKind::Louse, MonsterKind::Louse],
            },
        }
    }

    /// Gold granted for winning a combat in this room.
    pub fn gold_reward(self, rng: &mut SimRng) -> i32 {
        match self {
            RoomKind::Boss => rng.range(95, 105),
            RoomKind::Elite => rng.range(25, 35),
            _ => rng.range(10, 20),
        }
    }
}

/// Starting hit points and deck for a character.
pub struct Loadout {
    pub max_hp: i32,
    pub deck: Vec<Card>,
}

impl Loadout {
    pub fn for_character(character: CharacterClass) -> Self {
        let (max_hp, signature) = match character {
            CharacterClass::Ironclad => (80, Card::Bash),
            CharacterClass::Silent => (70, Card::PommelStrike),
            CharacterClass::Defect => (75, Card::IronWave),
            CharacterClass::Watcher => (72, Card::ShrugItOff),
        };

        let mut deck = vec![Card::Strike; 5];
        deck.extend([Card::Defend; 4]);
        deck.push(signature);

        Self { max_hp, deck }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn starting_decks_have_ten_cards() {
        for character in CharacterClass::iter() {
            let loadout = Loadout::for_character(character);
            assert_eq!(loadout.deck.len(), 10);
            assert!(loadout.max_hp >= 70);
        }
    }

    #[test]
    fn room_codes_are_non_zero() {
        assert_eq!(RoomKind::Monster.code(), 1);
        assert_eq!(RoomKind::Boss.code(), RoomKind::MAX_CODE);
    }

    #[test]
    fn boss_room_always_fights_the_guardian() {
        let mut rng = SimRng::new(1, 1);
        assert_eq!(
            RoomKind::Boss.encounter(&mut rng),
            vec![MonsterKind::Guardian]
        );
    }
}
