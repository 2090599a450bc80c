//! Fixed-length observation encoding for the reference simulator.
//!
//! Layout, in order:
//! - run scalars: floor, hp, max hp, gold, ascension
//! - one-hot overworld screen
//! - deck size and per-card deck counts
//! - map room codes and offered card codes
//! - battle block: in-battle flag, energy, block, turn, pile sizes, per-card
//!   hand counts and one `(hp, intent, alive)` triple per monster slot
//!
//! Battle features are zero outside of combat. Every value is clamped to
//! `[0, max]` so observations always lie inside the declared space.

use gym_core::{BattleContext, ObservationEncoder, OverworldContext, ScreenState};
use strum::{EnumCount, IntoEnumIterator};

use crate::battle::{Battle, ENERGY_PER_TURN, HAND_LIMIT, MAX_MONSTERS};
use crate::content::{Card, RoomKind};
use crate::run::{MAP_WIDTH, OFFER_SLOTS, Run};

const MAX_FLOOR: i32 = 60;
const MAX_HP: i32 = 200;
const MAX_GOLD: i32 = 1800;
const MAX_ASCENSION: i32 = 20;
const MAX_DECK: i32 = 60;
const MAX_CARD_COPIES: i32 = 7;
const MAX_ENERGY: i32 = ENERGY_PER_TURN + 7;
const MAX_BLOCK: i32 = 200;
const MAX_TURN: i32 = 99;
const MAX_MONSTER_HP: i32 = 300;
const MAX_INTENT: i32 = 60;

/// Number of features produced by [`LiteEncoder`].
pub const FEATURES: usize = 5
    + ScreenState::COUNT
    + 1
    + Card::COUNT
    + MAP_WIDTH
    + OFFER_SLOTS
    + 6
    + Card::COUNT
    + 3 * MAX_MONSTERS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiteEncoder;

/// Accumulates clamped feature values.
struct Features(Vec<i32>);

impl Features {
    fn push(&mut self, value: i32, max: i32) {
        self.0.push(value.clamp(0, max));
    }

    fn count(&mut self, value: usize, max: i32) {
        self.push(i32::try_from(value).unwrap_or(max), max);
    }
}

fn card_code(card: Card) -> i32 {
    card as i32 + 1
}

fn copies(cards: &[Card], card: Card) -> usize {
    cards.iter().filter(|&&held| held == card).count()
}

impl ObservationEncoder<Run, Battle> for LiteEncoder {
    fn observation(&self, run: &Run, battle: Option<&Battle>) -> Vec<i32> {
        let mut out = Features(Vec::with_capacity(FEATURES));

        out.push(run.floor(), MAX_FLOOR);
        out.push(battle.map_or(run.cur_hp(), |battle| battle.player_hp()), MAX_HP);
        out.push(run.max_hp(), MAX_HP);
        out.push(run.gold(), MAX_GOLD);
        out.push(i32::from(run.ascension()), MAX_ASCENSION);

        let screen = run.screen_state().index();
        for index in 0..ScreenState::COUNT {
            out.push(i32::from(index == screen), 1);
        }

        out.count(run.deck().len(), MAX_DECK);
        for card in Card::iter() {
            out.count(copies(run.deck(), card), MAX_CARD_COPIES);
        }

        for slot in 0..MAP_WIDTH {
            let code = run.map().get(slot).map_or(0, |room| room.code());
            out.push(code, RoomKind::MAX_CODE);
        }
        for slot in 0..OFFER_SLOTS {
            let code = run.offers().get(slot).map_or(0, |offer| card_code(offer.card));
            out.push(code, Card::COUNT as i32);
        }

        match battle {
            Some(battle) => {
                out.push(1, 1);
                out.push(battle.energy(), MAX_ENERGY);
                out.push(battle.block(), MAX_BLOCK);
                out.count(battle.turn() as usize, MAX_TURN);
                out.count(battle.draw_pile_len(), MAX_DECK);
                out.count(battle.discard_len(), MAX_DECK);
                for card in Card::iter() {
                    out.count(copies(battle.hand(), card), HAND_LIMIT as i32);
                }
                for slot in 0..MAX_MONSTERS {
                    match battle.monsters().get(slot) {
                        Some(monster) => {
                            out.push(monster.hp, MAX_MONSTER_HP);
                            out.push(monster.intent, MAX_INTENT);
                            out.push(i32::from(monster.is_alive()), 1);
                        }
                        None => out.0.extend([0; 3]),
                    }
                }
            }
            None => out.0.resize(FEATURES, 0),
        }

        out.0
    }

    fn observation_maximums(&self) -> Vec<i32> {
        let mut high = vec![MAX_FLOOR, MAX_HP, MAX_HP, MAX_GOLD, MAX_ASCENSION];
        high.extend([1; ScreenState::COUNT]);
        high.push(MAX_DECK);
        high.extend([MAX_CARD_COPIES; Card::COUNT]);
        high.extend([RoomKind::MAX_CODE; MAP_WIDTH]);
        high.extend([Card::COUNT as i32; OFFER_SLOTS]);
        high.extend([1, MAX_ENERGY, MAX_BLOCK, MAX_TURN, MAX_DECK, MAX_DECK]);
        high.extend([HAND_LIMIT as i32; Card::COUNT]);
        for _ in 0..MAX_MONSTERS {
            high.extend([MAX_MONSTER_HP, MAX_INTENT, 1]);
        }
        high
    }
}
