use crate::error::{ErrorSeverity, GameError};
use crate::ids::{ActionTemplateId, BattleSquaddieId};
use crate::map::HexCoordinate;

/// Raised when a decision step is filled out of order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionStepError {
    #[error("decision step has no actor")]
    ActorNotSet,

    #[error("decision step has no action")]
    ActionNotSet,

    #[error("decision step has no considered target")]
    TargetNotConsidered,
}

impl GameError for DecisionStepError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotSet => "DECISION_STEP_ACTOR_NOT_SET",
            Self::ActionNotSet => "DECISION_STEP_ACTION_NOT_SET",
            Self::TargetNotConsidered => "DECISION_STEP_TARGET_NOT_CONSIDERED",
        }
    }
}

/// What the actor decided to do. Exactly one kind per step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionAction {
    ActionTemplate(ActionTemplateId),
    Movement,
    EndTurn,
}

impl DecisionAction {
    pub fn action_template_id(&self) -> Option<&ActionTemplateId> {
        match self {
            Self::ActionTemplate(id) => Some(id),
            Self::Movement | Self::EndTurn => None,
        }
    }
}

/// Where the action is aimed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionTarget {
    pub considered_coordinate: Option<HexCoordinate>,
    pub confirmed_coordinate: Option<HexCoordinate>,
}

impl DecisionTarget {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_coordinate.is_some()
    }
}

/// The decision the current actor is building this step.
///
/// Fields fill in order: actor, then action, then a considered target, then
/// a confirmed one. Setting an earlier field discards everything after it,
/// so a confirmed target never outlives the action it was chosen for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleActionDecisionStep {
    actor: Option<BattleSquaddieId>,
    action: Option<DecisionAction>,
    target: DecisionTarget,
}

impl BattleActionDecisionStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the actor, discarding any action and target.
    pub fn set_actor(&mut self, battle_squaddie_id: BattleSquaddieId) {
        self.actor = Some(battle_squaddie_id);
        self.action = None;
        self.target = DecisionTarget::default();
    }

    /// Picks the action, discarding any target.
    pub fn add_action(&mut self, action: DecisionAction) -> Result<(), DecisionStepError> {
        if self.actor.is_none() {
            return Err(DecisionStepError::ActorNotSet);
        }
        self.action = Some(action);
        self.target = DecisionTarget::default();
        Ok(())
    }

    /// Aims at a coordinate, withdrawing any earlier confirmation.
    pub fn set_considered_target(&mut self, coordinate: HexCoordinate) -> Result<(), DecisionStepError> {
        if self.action.is_none() {
            return Err(DecisionStepError::ActionNotSet);
        }
        self.target = DecisionTarget {
            considered_coordinate: Some(coordinate),
            confirmed_coordinate: None,
        };
        Ok(())
    }

    pub fn set_confirmed_target(&mut self, coordinate: HexCoordinate) -> Result<(), DecisionStepError> {
        if self.action.is_none() {
            return Err(DecisionStepError::ActionNotSet);
        }
        if self.target.considered_coordinate.is_none() {
            return Err(DecisionStepError::TargetNotConsidered);
        }
        self.target = DecisionTarget {
            considered_coordinate: Some(coordinate),
            confirmed_coordinate: Some(coordinate),
        };
        Ok(())
    }

    /// Drops the target but keeps actor and action.
    pub fn remove_target(&mut self) {
        self.target = DecisionTarget::default();
    }

    /// Drops the action and target but keeps the actor.
    pub fn remove_action(&mut self) {
        self.action = None;
        self.target = DecisionTarget::default();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_actor_set(&self) -> bool {
        self.actor.is_some()
    }

    pub fn is_action_set(&self) -> bool {
        self.action.is_some()
    }

    pub fn is_target_considered(&self) -> bool {
        self.target.considered_coordinate.is_some()
    }

    pub fn is_target_confirmed(&self) -> bool {
        self.target.is_confirmed()
    }

    pub fn actor(&self) -> Option<&BattleSquaddieId> {
        self.actor.as_ref()
    }

    pub fn action(&self) -> Option<&DecisionAction> {
        self.action.as_ref()
    }

    /// `None` until a target has at least been considered.
    pub fn target(&self) -> Option<&DecisionTarget> {
        self.is_target_considered().then_some(&self.target)
    }
}
