//! Action template errors.

use crate::error::{ErrorSeverity, GameError};
use crate::ids::ActionTemplateId;

/// Errors raised while building an [`crate::ActionTemplate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionTemplateError {
    #[error("action template {0} declares no effects")]
    NoEffects(ActionTemplateId),

    #[error("action template {id} has minimum range {min} above maximum range {max}")]
    InvalidRange {
        id: ActionTemplateId,
        min: u32,
        max: u32,
    },
}

impl GameError for ActionTemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEffects(_) => "ACTION_TEMPLATE_NO_EFFECTS",
            Self::InvalidRange { .. } => "ACTION_TEMPLATE_INVALID_RANGE",
        }
    }
}
