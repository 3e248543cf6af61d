//! Shared error classification for battle-core.
//!
//! Each rule set keeps its own error enum next to the rules it protects
//! (`DecisionStepError`, `CalculatorError`, `MapError`, ...). They all
//! implement [`GameError`] so the runtime can decide whether a failure is a
//! bad request or a broken battle.
//!
//! A player choosing something they cannot do is not an error here: that is
//! reported through [`crate::ActionValidity`] and surfaces as a popup.

/// How a battle-core error should be handled by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSeverity {
    /// The request may succeed with different input, e.g. an occupied tile.
    Recoverable,
    /// Malformed data, e.g. an action template with no effects.
    Validation,
    /// A caller skipped a step, e.g. confirming a target with no actor set.
    Internal,
    /// The battle state no longer holds together.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at a bug rather than at bad input.
    pub const fn is_bug(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every battle-core error enum.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs. Defaults to the error's type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
