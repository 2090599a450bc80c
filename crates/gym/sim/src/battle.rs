//! Combat context: a deck cycling through draw, hand and discard piles against
//! up to [`MAX_MONSTERS`] enemies with telegraphed attacks.

use arrayvec::ArrayVec;
use gym_core::{BattleContext, BattleOutcome};
use tracing::trace;

use crate::content::{Card, MonsterKind, RoomKind};
use crate::rng::SimRng;
use crate::rules::LiteRules;
use crate::run::Run;

pub const MAX_MONSTERS: usize = 3;
pub const HAND_LIMIT: usize = 10;
pub const HAND_SIZE: usize = 5;
pub const ENERGY_PER_TURN: i32 = 3;

/// Stream offset separating battle RNG streams from the run stream.
const BATTLE_STREAM: u64 = 1_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub hp: i32,
    pub max_hp: i32,
    /// Damage this monster will deal at the end of the player's turn.
    pub intent: i32,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleAction {
    PlayCard { hand_index: u8, target: Option<u8> },
    EndTurn,
}

/// Battle context of the reference simulator.
#[derive(Clone, Debug)]
pub struct Battle {
    rng: SimRng,
    rules: LiteRules,
    player_hp: i32,
    block: i32,
    energy: i32,
    turn: u32,
    draw_pile: Vec<Card>,
    hand: ArrayVec<Card, HAND_LIMIT>,
    discard: Vec<Card>,
    monsters: ArrayVec<Monster, MAX_MONSTERS>,
    outcome: BattleOutcome,
    gold_reward: i32,
}

impl Battle {
    pub fn block(&self) -> i32 {
        self.block
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    fn draw(&mut self, count: usize) {
        for _ in 0..count {
            if self.hand.is_full() {
                break;
            }
            if self.draw_pile.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.draw_pile.append(&mut self.discard);
                self.rng.shuffle(&mut self.draw_pile);
            }
            if let Some(card) = self.draw_pile.pop() {
                self.hand.push(card);
            }
        }
    }

    fn roll_intents(&mut self) {
        for monster in self.monsters.iter_mut() {
            let (min, max) = monster.kind.damage();
            monster.intent = self.rules.scale_damage(self.rng.range(min, max));
        }
    }

    fn lose(&mut self) {
        self.player_hp = 0;
        self.outcome = BattleOutcome::PlayerLoss;
    }

    fn check_victory(&mut self) {
        if self.monsters.iter().all(|monster| !monster.is_alive()) {
            self.outcome = BattleOutcome::PlayerVictory;
        }
    }

    fn play_card(&mut self, hand_index: usize, target: Option<usize>) {
        let Some(&card) = self.hand.get(hand_index) else {
            return;
        };
        if card.cost() > self.energy {
            return;
        }
        let target = match (card.targets(), target) {
            (true, Some(index)) if self.monsters.get(index).is_some_and(Monster::is_alive) => {
                Some(index)
            }
            (true, _) => return,
            (false, _) => None,
        };

        self.hand.remove(hand_index);
        self.energy -= card.cost();
        let effect = card.effect();
        trace!(%card, ?target, "playing card");

        if effect.hp_cost > 0 {
            self.player_hp -= effect.hp_cost;
            if self.player_hp <= 0 {
                self.lose();
                return;
            }
        }
        self.energy += effect.energy_gain;
        self.block += effect.block;

        if effect.damage > 0 {
            for (index, monster) in self.monsters.iter_mut().enumerate() {
                if monster.is_alive() && (effect.hits_all || target == Some(index)) {
                    monster.hp = (monster.hp - effect.damage).max(0);
                }
            }
        }

        self.draw(effect.draw);
        self.discard.push(card);
        self.check_victory();
    }

    fn end_turn(&mut self) {
        self.discard.extend(self.hand.drain(..));

        for monster in self.monsters.iter().filter(|monster| monster.is_alive()) {
            let absorbed = self.block.min(monster.intent);
            self.block -= absorbed;
            self.player_hp -= monster.intent - absorbed;
        }
        if self.player_hp <= 0 {
            self.lose();
            return;
        }

        self.block = 0;
        self.energy = ENERGY_PER_TURN;
        self.turn += 1;
        self.roll_intents();
        self.draw(HAND_SIZE);
    }
}

impl BattleContext for Battle {
    type Overworld = Run;
    type Action = BattleAction;

    fn enter(run: &Run) -> Self {
        let mut rng = SimRng::new(run.seed, BATTLE_STREAM + run.floor as u64);
        let mut draw_pile = run.deck.clone();
        rng.shuffle(&mut draw_pile);

        let monsters = run
            .encounter
            .iter()
            .take(MAX_MONSTERS)
            .map(|&kind| {
                let hp = run.rules.scale_hp(kind.base_hp(), run.ascension);
                Monster {
                    kind,
                    hp,
                    max_hp: hp,
                    intent: 0,
                }
            })
            .collect();
        let gold_reward = run.room.unwrap_or(RoomKind::Monster).gold_reward(&mut rng);

        let mut battle = Self {
            rng,
            rules: run.rules.clone(),
            player_hp: run.hp,
            block: 0,
            energy: ENERGY_PER_TURN,
            turn: 1,
            draw_pile,
            hand: ArrayVec::new(),
            discard: Vec::new(),
            monsters,
            outcome: BattleOutcome::Undecided,
            gold_reward,
        };
        battle.roll_intents();
        battle.draw(HAND_SIZE);
        // An empty encounter is won immediately.
        battle.check_victory();
        battle
    }

    fn player_hp(&self) -> i32 {
        self.player_hp
    }

    fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    fn possible_actions(&self) -> Vec<BattleAction> {
        if self.outcome.is_decided() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for (hand_index, card) in self.hand.iter().enumerate() {
            if card.cost() > self.energy {
                continue;
            }
            let hand_index = hand_index as u8;
            if card.targets() {
                actions.extend(
                    self.monsters
                        .iter()
                        .enumerate()
                        .filter(|(_, monster)| monster.is_alive())
                        .map(|(target, _)| BattleAction::PlayCard {
                            hand_index,
                            target: Some(target as u8),
                        }),
                );
            } else {
                actions.push(BattleAction::PlayCard {
                    hand_index,
                    target: None,
                });
            }
        }
        actions.push(BattleAction::EndTurn);
        actions
    }

    fn execute(&mut self, action: &BattleAction) {
        if self.outcome.is_decided() {
            return;
        }
        match *action {
            BattleAction::PlayCard { hand_index, target } => {
                self.play_card(usize::from(hand_index), target.map(usize::from))
            }
            BattleAction::EndTurn => self.end_turn(),
        }
    }

    fn exit_battle(self, run: &mut Run) {
        run.conclude_battle(self.player_hp, self.outcome, self.gold_reward);
    }
}

#[cfg(test)]
mod tests {
    use gym_core::{CharacterClass, OverworldContext};

    use super::*;
    use crate::run::RunAction;

    fn battle_with(rules: LiteRules) -> (Run, Battle) {
        let mut run = Run::new(rules, CharacterClass::Ironclad, 5, 0);
        run.execute(&RunAction::Travel(0));
        let battle = Battle::enter(&run);
        (run, battle)
    }

    #[test]
    fn enter_draws_a_full_hand() {
        let (run, battle) = battle_with(LiteRules::default());
        assert_eq!(battle.hand().len(), HAND_SIZE);
        assert_eq!(battle.draw_pile_len(), run.deck().len() - HAND_SIZE);
        assert_eq!(battle.energy(), ENERGY_PER_TURN);
        assert_eq!(battle.player_hp(), run.cur_hp());
        assert!(!battle.monsters().is_empty());
    }

    #[test]
    fn end_turn_is_always_legal_and_last() {
        let (_, battle) = battle_with(LiteRules::default());
        let actions = battle.possible_actions();
        assert_eq!(actions.last(), Some(&BattleAction::EndTurn));
    }

    #[test]
    fn block_absorbs_damage_before_hp() {
        let (_, mut battle) = battle_with(LiteRules::default());
        let intents: i32 = battle.monsters().iter().map(|monster| monster.intent).sum();
        battle.block = intents;
        let hp = battle.player_hp();

        battle.execute(&BattleAction::EndTurn);
        assert_eq!(battle.player_hp(), hp);
        assert_eq!(battle.block(), 0);
        assert_eq!(battle.turn(), 2);
        assert_eq!(battle.hand().len(), HAND_SIZE);
    }

    #[test]
    fn lethal_damage_loses_the_battle() {
        let (mut run, mut battle) = battle_with(LiteRules::default());
        battle.player_hp = 1;
        battle.monsters[0].intent = 5;
        battle.execute(&BattleAction::EndTurn);

        assert_eq!(battle.outcome(), BattleOutcome::PlayerLoss);
        assert_eq!(battle.player_hp(), 0);
        assert!(battle.possible_actions().is_empty());

        battle.exit_battle(&mut run);
        assert_eq!(run.outcome(), gym_core::GameOutcome::PlayerLoss);
    }

    #[test]
    fn killing_every_monster_wins() {
        let rules = LiteRules {
            monster_hp_percent: 1,
            ..LiteRules::default()
        };
        let (mut run, mut battle) = battle_with(rules);
        for monster in battle.monsters.iter_mut() {
            monster.hp = 0;
        }
        battle.monsters[0].hp = 1;
        battle.hand.clear();
        battle.hand.push(Card::Cleave);

        battle.execute(&BattleAction::PlayCard {
            hand_index: 0,
            target: None,
        });
        assert_eq!(battle.outcome(), BattleOutcome::PlayerVictory);

        let gold = run.gold();
        battle.exit_battle(&mut run);
        assert!(run.gold() > gold);
        assert_eq!(run.screen_state(), gym_core::ScreenState::Rewards);
    }

    #[test]
    fn unaffordable_cards_are_not_offered() {
        let (_, mut battle) = battle_with(LiteRules::default());
        battle.hand.clear();
        battle.hand.push(Card::Bash);
        battle.energy = 1;
        assert_eq!(battle.possible_actions(), vec![BattleAction::EndTurn]);
    }
}
