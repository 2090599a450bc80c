//! Reinforcement-learning environment adapter for the deck-building simulator.
//!
//! `gym-core` turns a simulator that alternates between an overworld session and
//! transient battles into a fixed-shape RL environment: integer observations, a
//! bounded discrete action space with a legality mask, a dense shaped reward, and
//! termination signals. The simulator itself and its observation encoder are
//! consumed through the traits in [`sim`]; all episode state flows through
//! [`episode::Episode`].
//!
//! Modules, leaf-first:
//! - [`action`] holds the per-step action catalog and the legality mask
//! - [`reward`] shapes rewards from consecutive state samples
//! - [`machine`] tracks the active context and performs context switches
//! - [`episode`] exposes the `start` / `step` contract
pub mod action;
pub mod config;
pub mod episode;
pub mod error;
pub mod machine;
pub mod reward;
pub mod sim;
pub mod space;

pub use action::{ActionCatalog, ActionHandle, ActionMask};
pub use config::{EnvConfig, RewardConfig};
pub use episode::{Episode, EpisodeStatus, Observation, Session, StepInfo, Transition};
pub use error::{EnvError, ErrorSeverity, GymError};
pub use machine::{
    ActiveContext, BattleSnapshot, ContextSwitch, GameSnapshot, Phase, Screen, StateMachine,
    StepOutcome,
};
pub use reward::{RewardBreakdown, RewardSample, RewardShaper};
pub use sim::{
    BattleContext, BattleOutcome, CharacterClass, GameOutcome, ObservationEncoder,
    OverworldContext, ScreenState, Simulator, SimulatorError,
};
pub use space::{ActionSpace, ObservationSpace};
