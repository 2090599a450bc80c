//! Common error infrastructure for gym-core.
//!
//! Expected control flow (invalid indices, stalled simulators, stepping a
//! finished episode) never produces an error; those paths are recovered inside
//! the episode. What remains are misuse of the API and broken collaborators.
//!
//! # Design Principles
//!
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Fail Fast**: Simulator and encoder failures surface from `new`/`start`,
//!   never in the middle of an episode

use crate::sim::SimulatorError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid use of the API that should be fixed by the caller
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: A collaborator is missing or broken; the environment cannot run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: step called before start
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - a collaborator cannot be constructed.
    ///
    /// Examples: simulator construction failed, encoder declares no features
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }

    /// Returns true if the environment cannot continue.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all gym-core errors.
pub trait GymError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by [`crate::Episode`].
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("step called before start")]
    NotStarted,

    #[error("simulator initialization failed")]
    Simulator(#[from] SimulatorError),

    #[error("observation encoder declares an empty observation space")]
    EmptyObservationSpace,

    #[error("observation has {actual} features but the encoder declared {expected}")]
    ObservationSize { expected: usize, actual: usize },

    #[error("{handle} action cannot execute while the {active} context is active")]
    ContextMismatch {
        handle: &'static str,
        active: &'static str,
    },
}

impl GymError for EnvError {
    fn severity(&self) -> ErrorSeverity {
        use EnvError::*;
        match self {
            NotStarted => ErrorSeverity::Validation,
            ContextMismatch { .. } => ErrorSeverity::Internal,
            Simulator(_) | EmptyObservationSpace | ObservationSize { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EnvError::*;
        match self {
            NotStarted => "ENV_NOT_STARTED",
            Simulator(_) => "ENV_SIMULATOR_INIT",
            EmptyObservationSpace => "ENV_EMPTY_OBSERVATION_SPACE",
            ObservationSize { .. } => "ENV_OBSERVATION_SIZE",
            ContextMismatch { .. } => "ENV_CONTEXT_MISMATCH",
        }
    }
}
