//! Overworld context: map travel, rooms, rewards and the run outcome.

use arrayvec::ArrayVec;
use gym_core::{BattleOutcome, CharacterClass, GameOutcome, OverworldContext, ScreenState};
use tracing::trace;

use crate::content::{Card, Loadout, MonsterKind, RoomKind};
use crate::rng::SimRng;
use crate::rules::LiteRules;

/// Maximum number of rooms offered on one map screen.
pub const MAP_WIDTH: usize = 3;
/// Maximum number of cards offered by a reward screen or shop.
pub const OFFER_SLOTS: usize = 3;

/// Card on offer, with its price (0 for combat rewards).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offer {
    pub card: Card,
    pub price: i32,
}

/// Overworld action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunAction {
    /// Travel to the map room at this index.
    Travel(u8),
    TakeCard(u8),
    SkipReward,
    Rest,
    BuyCard(u8),
    OpenChest,
    Gamble,
    Leave,
}

/// Overworld context of the reference simulator.
#[derive(Clone, Debug)]
pub struct Run {
    pub(crate) rules: LiteRules,
    pub(crate) character: CharacterClass,
    pub(crate) ascension: u8,
    pub(crate) seed: u64,
    rng: SimRng,
    pub(crate) floor: i32,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) gold: i32,
    pub(crate) deck: Vec<Card>,
    screen: ScreenState,
    outcome: GameOutcome,
    map: ArrayVec<RoomKind, MAP_WIDTH>,
    pub(crate) room: Option<RoomKind>,
    pub(crate) encounter: Vec<MonsterKind>,
    offers: ArrayVec<Offer, OFFER_SLOTS>,
}

impl Run {
    pub(crate) fn new(rules: LiteRules, character: CharacterClass, seed: u64, ascension: u8) -> Self {
        let loadout = Loadout::for_character(character);
        let max_hp = if ascension >= 14 {
            loadout.max_hp - 4
        } else {
            loadout.max_hp
        };

        let mut run = Self {
            character,
            ascension,
            seed,
            rng: SimRng::new(seed, 0),
            floor: 0,
            hp: max_hp,
            max_hp,
            gold: rules.starting_gold,
            deck: loadout.deck,
            screen: ScreenState::MapScreen,
            outcome: GameOutcome::Undecided,
            map: ArrayVec::new(),
            room: None,
            encounter: Vec::new(),
            offers: ArrayVec::new(),
            rules,
        };
        run.roll_map();
        run
    }

    pub fn character(&self) -> CharacterClass {
        self.character
    }

    pub fn ascension(&self) -> u8 {
        self.ascension
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Rooms currently offered on the map screen.
    pub fn map(&self) -> &[RoomKind] {
        &self.map
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    fn roll_map(&mut self) {
        self.map.clear();
        let next_floor = self.floor + 1;
        if next_floor >= self.rules.final_floor {
            self.map.push(RoomKind::Boss);
            return;
        }
        if next_floor == 1 {
            self.map.push(RoomKind::Monster);
            self.map.push(RoomKind::Monster);
            return;
        }
        let width = 2 + self.rng.below(2) as usize;
        for _ in 0..width {
            self.map.push(RoomKind::random(&mut self.rng));
        }
    }

    fn to_map(&mut self) {
        self.offers.clear();
        self.room = None;
        self.screen = ScreenState::MapScreen;
        self.roll_map();
    }

    fn roll_offers(&mut self, priced: bool) {
        self.offers.clear();
        for _ in 0..OFFER_SLOTS {
            let card = Card::random_reward(&mut self.rng);
            let price = if priced { card.price() } else { 0 };
            self.offers.push(Offer { card, price });
        }
    }

    fn enter_room(&mut self, room: RoomKind) {
        self.floor += 1;
        self.room = Some(room);
        trace!(floor = self.floor, %room, "entering room");

        if room.is_combat() {
            self.encounter = room.encounter(&mut self.rng);
            self.screen = ScreenState::Battle;
            return;
        }

        self.screen = match room {
            RoomKind::Rest => ScreenState::RestRoom,
            RoomKind::Shop => {
                self.roll_offers(true);
                ScreenState::ShopRoom
            }
            RoomKind::Treasure => ScreenState::TreasureRoom,
            _ => ScreenState::EventScreen,
        };
    }

    /// Applies the result of a finished battle.
    pub(crate) fn conclude_battle(&mut self, hp: i32, outcome: BattleOutcome, gold: i32) {
        self.encounter.clear();
        match outcome {
            BattleOutcome::PlayerLoss => {
                self.hp = 0;
                self.outcome = GameOutcome::PlayerLoss;
            }
            _ => {
                self.hp = hp.clamp(0, self.max_hp);
                self.gold += gold;
                if self.room == Some(RoomKind::Boss) {
                    self.outcome = GameOutcome::PlayerVictory;
                } else {
                    self.roll_offers(false);
                    self.screen = ScreenState::Rewards;
                }
            }
        }
    }
}

impl OverworldContext for Run {
    type Action = RunAction;

    fn floor(&self) -> i32 {
        self.floor
    }

    fn cur_hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
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

    fn possible_actions(&self) -> Vec<RunAction> {
        if self.outcome.is_decided() {
            return Vec::new();
        }

        let slots = |count: usize| (0..count).map(|index| index as u8);
        match self.screen {
            ScreenState::MapScreen => slots(self.map.len()).map(RunAction::Travel).collect(),
            ScreenState::Rewards => slots(self.offers.len())
                .map(RunAction::TakeCard)
                .chain([RunAction::SkipReward])
                .collect(),
            ScreenState::RestRoom => vec![RunAction::Rest, RunAction::Leave],
            ScreenState::ShopRoom => self
                .offers
                .iter()
                .enumerate()
                .filter(|(_, offer)| offer.price <= self.gold)
                .map(|(index, _)| RunAction::BuyCard(index as u8))
                .chain([RunAction::Leave])
                .collect(),
            ScreenState::TreasureRoom => vec![RunAction::OpenChest, RunAction::Leave],
            ScreenState::EventScreen => vec![RunAction::Gamble, RunAction::Leave],
            _ => Vec::new(),
        }
    }

    fn execute(&mut self, action: &RunAction) {
        match *action {
            RunAction::Travel(index) => {
                if let Some(&room) = self.map.get(usize::from(index)) {
                    self.enter_room(room);
                }
            }
            RunAction::TakeCard(index) => {
                if let Some(offer) = self.offers.get(usize::from(index)) {
                    self.deck.push(offer.card);
                }
                self.to_map();
            }
            RunAction::SkipReward | RunAction::Leave => self.to_map(),
            RunAction::Rest => {
                self.hp = (self.hp + self.max_hp * 30 / 100).min(self.max_hp);
                self.to_map();
            }
            RunAction::BuyCard(index) => {
                let index = usize::from(index);
                if let Some(offer) = self.offers.get(index).copied() {
                    if offer.price <= self.gold {
                        self.gold -= offer.price;
                        self.deck.push(offer.card);
                        self.offers.remove(index);
                    }
                }
            }
            RunAction::OpenChest => {
                self.gold += self.rng.range(25, 50);
                self.to_map();
            }
            RunAction::Gamble => {
                self.hp -= 6;
                self.gold += 50;
                if self.hp <= 0 {
                    self.hp = 0;
                    self.outcome = GameOutcome::PlayerLoss;
                } else {
                    self.to_map();
                }
            }
        }
    }
}
