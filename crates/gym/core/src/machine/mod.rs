//! Active-context tracking and per-step execution.
//!
//! The [`StateMachine`] owns the overworld context for the whole session and
//! tags which context is active. A battle context exists only inside
//! [`ActiveContext::Battle`], so "exactly one active context" holds by
//! construction. Each call to [`StateMachine::advance`] resolves an index
//! against a freshly built catalog, executes it, and performs at most one
//! context switch.
mod snapshot;

pub use snapshot::{BattleSnapshot, GameSnapshot, Phase, Screen};

use tracing::debug;

use crate::action::{ActionCatalog, ActionHandle};
use crate::error::EnvError;
use crate::sim::{BattleContext, BattleOutcome, OverworldContext, ScreenState};

/// The context currently receiving actions.
#[derive(Clone, Debug)]
pub enum ActiveContext<B> {
    Overworld,
    Battle(B),
}

impl<B> ActiveContext<B> {
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Overworld => Phase::Overworld,
            Self::Battle(_) => Phase::Battle,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Battle(_) => "battle",
        }
    }
}

/// Context switch performed at the end of a step.
///
/// `outgoing_hp` is the HP of the context that was active before the switch,
/// read after the action executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextSwitch {
    EnteredBattle {
        outgoing_hp: i32,
    },
    ExitedBattle {
        outgoing_hp: i32,
        battle_outcome: BattleOutcome,
    },
}

impl ContextSwitch {
    pub const fn outgoing_hp(&self) -> i32 {
        match self {
            Self::EnteredBattle { outgoing_hp } | Self::ExitedBattle { outgoing_hp, .. } => {
                *outgoing_hp
            }
        }
    }
}

/// Result of [`StateMachine::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The run outcome was already decided; nothing was executed.
    Finished,
    /// The active context offered no legal action while the run was undecided.
    Stalled,
    /// An action was executed.
    Executed {
        /// Catalog index that was actually executed.
        executed: usize,
        /// True if the requested index was invalid and index 0 ran instead.
        substituted: bool,
        switch: Option<ContextSwitch>,
    },
}

/// Session state machine over the `OVERWORLD` and `BATTLE` phases.
#[derive(Clone, Debug)]
pub struct StateMachine<O, B> {
    overworld: O,
    active: ActiveContext<B>,
}

impl<O, B> StateMachine<O, B>
where
    O: OverworldContext,
    B: BattleContext<Overworld = O>,
{
    /// Starts a session in the overworld phase.
    pub fn new(overworld: O) -> Self {
        Self {
            overworld,
            active: ActiveContext::Overworld,
        }
    }

    pub fn phase(&self) -> Phase {
        self.active.phase()
    }

    pub fn active(&self) -> &ActiveContext<B> {
        &self.active
    }

    pub fn overworld(&self) -> &O {
        &self.overworld
    }

    pub fn battle(&self) -> Option<&B> {
        match &self.active {
            ActiveContext::Overworld => None,
            ActiveContext::Battle(battle) => Some(battle),
        }
    }

    /// Returns true once the run outcome is decided.
    pub fn is_finished(&self) -> bool {
        self.overworld.outcome().is_decided()
    }

    /// HP of the active context.
    pub fn hp(&self) -> i32 {
        match &self.active {
            ActiveContext::Overworld => self.overworld.cur_hp(),
            ActiveContext::Battle(battle) => battle.player_hp(),
        }
    }

    pub fn screen(&self) -> Screen {
        match &self.active {
            ActiveContext::Overworld => Screen::Overworld(self.overworld.screen_state()),
            ActiveContext::Battle(_) => Screen::Battle,
        }
    }

    /// Legal actions of the active context, rebuilt on every call.
    pub fn catalog(&self) -> ActionCatalog<O::Action, B::Action> {
        match &self.active {
            ActiveContext::Overworld => ActionCatalog::Overworld(self.overworld.possible_actions()),
            ActiveContext::Battle(battle) => ActionCatalog::Battle(battle.possible_actions()),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            floor: self.overworld.floor(),
            hp: self.hp(),
            max_hp: self.overworld.max_hp(),
            gold: self.overworld.gold(),
            screen: self.screen(),
            outcome: self.overworld.outcome(),
            battle: self.battle().map(|battle| BattleSnapshot {
                player_hp: battle.player_hp(),
                outcome: battle.outcome(),
            }),
        }
    }

    /// Executes the action at `index` against the active context.
    ///
    /// Indices outside the legal range are not wrapped: catalog entry 0 runs
    /// instead and the outcome is flagged `substituted`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ContextMismatch`] if the resolved handle does not
    /// belong to the active context.
    pub fn advance(&mut self, index: usize) -> Result<StepOutcome, EnvError> {
        if self.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        let catalog = self.catalog();
        let available = catalog.mask().available_count();
        if available == 0 {
            return Ok(StepOutcome::Stalled);
        }

        let substituted = index >= available;
        let executed = if substituted { 0 } else { index };
        if substituted {
            debug!(
                requested = index,
                available,
                context = catalog.context(),
                "invalid action index, executing first action"
            );
        }

        let Some(handle) = catalog.take(executed) else {
            return Ok(StepOutcome::Stalled);
        };
        let switch = self.execute(handle)?;

        Ok(StepOutcome::Executed {
            executed,
            substituted,
            switch,
        })
    }

    fn execute(
        &mut self,
        handle: ActionHandle<O::Action, B::Action>,
    ) -> Result<Option<ContextSwitch>, EnvError> {
        let active = self.active.label();

        match handle {
            ActionHandle::Overworld(action) => {
                if !matches!(self.active, ActiveContext::Overworld) {
                    return Err(EnvError::ContextMismatch {
                        handle: "overworld",
                        active,
                    });
                }

                self.overworld.execute(&action);
                if self.overworld.screen_state() != ScreenState::Battle {
                    return Ok(None);
                }

                let outgoing_hp = self.overworld.cur_hp();
                self.active = ActiveContext::Battle(B::enter(&self.overworld));
                debug!(
                    floor = self.overworld.floor(),
                    hp = outgoing_hp,
                    "entered battle"
                );
                Ok(Some(ContextSwitch::EnteredBattle { outgoing_hp }))
            }
            ActionHandle::Battle(action) => {
                let ActiveContext::Battle(battle) = &mut self.active else {
                    return Err(EnvError::ContextMismatch {
                        handle: "battle",
                        active,
                    });
                };

                battle.execute(&action);
                let battle_outcome = battle.outcome();
                if !battle_outcome.is_decided() {
                    return Ok(None);
                }

                let outgoing_hp = battle.player_hp();
                if let ActiveContext::Battle(battle) =
                    core::mem::replace(&mut self.active, ActiveContext::Overworld)
                {
                    battle.exit_battle(&mut self.overworld);
                }
                debug!(
                    floor = self.overworld.floor(),
                    hp = self.overworld.cur_hp(),
                    %battle_outcome,
                    "exited battle"
                );
                Ok(Some(ContextSwitch::ExitedBattle {
                    outgoing_hp,
                    battle_outcome,
                }))
            }
        }
    }
}
