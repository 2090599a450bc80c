//! Traits describing the external simulator and observation encoder.
//!
//! The adapter never looks inside the simulator: it reads a handful of scalar
//! fields, asks for the ordered list of legal actions, and executes one of them
//! against whichever context is active. The [`Simulator`] trait bundles the
//! context types with the constructor so an [`crate::Episode`] can create fresh
//! sessions without coupling to a concrete backend.
mod types;

pub use types::{BattleOutcome, CharacterClass, GameOutcome, ScreenState};

/// Persistent run state outside of combat (map, shops, rewards, events).
pub trait OverworldContext {
    /// Executable action handle for this context.
    type Action: Clone + core::fmt::Debug;

    fn floor(&self) -> i32;
    fn cur_hp(&self) -> i32;
    fn max_hp(&self) -> i32;
    fn gold(&self) -> i32;
    fn screen_state(&self) -> ScreenState;
    fn outcome(&self) -> GameOutcome;

    /// Seed the run was created with.
    fn seed(&self) -> u64;

    /// Ordered list of actions that are legal right now.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Executes `action`, mutating this context in place.
    fn execute(&mut self, action: &Self::Action);
}

/// Transient sub-session representing one combat encounter.
pub trait BattleContext: Sized {
    /// Overworld context this battle is entered from and committed back into.
    type Overworld: OverworldContext;

    /// Executable action handle for this context.
    type Action: Clone + core::fmt::Debug;

    /// Initializes a battle from the overworld's current state.
    fn enter(overworld: &Self::Overworld) -> Self;

    fn player_hp(&self) -> i32;
    fn outcome(&self) -> BattleOutcome;

    /// Ordered list of actions that are legal right now.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Executes `action`, mutating this context in place.
    fn execute(&mut self, action: &Self::Action);

    /// Commits the battle's results (HP, rewards, run outcome) to the overworld.
    fn exit_battle(self, overworld: &mut Self::Overworld);
}

/// Simulator backend: context types plus the session constructor.
pub trait Simulator {
    type Overworld: OverworldContext;
    type Battle: BattleContext<Overworld = Self::Overworld>;

    /// Creates the overworld context for a new session.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError`] if the backend cannot create a run for the
    /// requested parameters.
    fn create_overworld(
        &self,
        character: CharacterClass,
        seed: u64,
        ascension: u8,
    ) -> Result<Self::Overworld, SimulatorError>;
}

/// Encodes raw simulator state into a fixed-length integer vector.
pub trait ObservationEncoder<O, B> {
    /// Encodes the overworld plus the active battle, if any.
    ///
    /// Implementations must return exactly as many features as
    /// [`ObservationEncoder::observation_maximums`] declares.
    fn observation(&self, overworld: &O, battle: Option<&B>) -> Vec<i32>;

    /// Per-feature inclusive upper bounds. Queried once when the environment is built.
    fn observation_maximums(&self) -> Vec<i32>;
}

/// Errors raised by simulator backends while constructing a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulatorError {
    #[error("simulator backend unavailable: {0}")]
    Unavailable(String),

    #[error("character {0} is not supported by this simulator")]
    UnsupportedCharacter(CharacterClass),

    #[error("ascension {requested} exceeds the supported maximum {max}")]
    AscensionOutOfRange { requested: u8, max: u8 },
}
