//! Unified error type surfaced by the orchestrator and its listeners.
//!
//! Everything here is an invariant violation: a caller drove the decision
//! step out of order, or content referenced something that does not exist.
//! Rejected player input never becomes a `RuntimeError`; it is reported with
//! a `PlayerSelectionIsInvalid` message instead.

use battle_core::{
    CalculatorError, DecisionStepError, ErrorSeverity, GameError, MapError, RepositoryError,
    TargetingError, TurnError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Component-qualified invariant violation.
    #[error("{component}: {message}")]
    Invariant {
        component: &'static str,
        message: String,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    DecisionStep(#[from] DecisionStepError),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error(transparent)]
    Targeting(#[from] TargetingError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl RuntimeError {
    pub fn invariant(component: &'static str, message: impl Into<String>) -> Self {
        Self::Invariant {
            component,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant { .. } => ErrorSeverity::Internal,
            Self::Repository(err) => err.severity(),
            Self::DecisionStep(err) => err.severity(),
            Self::Calculator(err) => err.severity(),
            Self::Targeting(err) => err.severity(),
            Self::Map(err) => err.severity(),
            Self::Turn(err) => err.severity(),
        }
    }
}
