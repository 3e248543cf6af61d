//! Action validity gates.
//!
//! Checks decide whether an actor may pick an action at all. A failed check
//! is a normal outcome carrying a reason and a player-facing message; only
//! broken repository lookups are errors.

mod action_points;
mod buff_self_check;

pub use action_points::ActionPointCheck;
pub use buff_self_check::BuffSelfCheck;

use crate::action::ActionTemplate;
use crate::ids::BattleSquaddieId;
use crate::repository::{ObjectRepository, RepositoryError};

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionValidityReason {
    BuffHasNoEffect,
    NotEnoughActionPoints,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionValidity {
    pub is_valid: bool,
    pub reason: Option<ActionValidityReason>,
    pub message: Option<String>,
}

impl ActionValidity {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
            message: None,
        }
    }

    pub fn invalid(reason: ActionValidityReason, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            message: Some(message.into()),
        }
    }
}

/// One rule an action must pass before it can be selected.
pub trait ActionValidityCheck {
    fn can_perform(
        &self,
        repository: &ObjectRepository,
        actor_id: &BattleSquaddieId,
        action_template: &ActionTemplate,
    ) -> Result<ActionValidity, RepositoryError>;
}

/// Runs every check in order and returns the first failure.
pub fn validate_action(
    repository: &ObjectRepository,
    actor_id: &BattleSquaddieId,
    action_template: &ActionTemplate,
) -> Result<ActionValidity, RepositoryError> {
    let checks: [&dyn ActionValidityCheck; 2] = [&ActionPointCheck, &BuffSelfCheck];
    for check in checks {
        let validity = check.can_perform(repository, actor_id, action_template)?;
        if !validity.is_valid {
            return Ok(validity);
        }
    }
    Ok(ActionValidity::valid())
}
