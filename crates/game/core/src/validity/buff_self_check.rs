use crate::action::ActionTemplate;
use crate::ids::BattleSquaddieId;
use crate::repository::{ObjectRepository, RepositoryError};

use super::{ActionValidity, ActionValidityCheck, ActionValidityReason};

/// Rejects self-only actions that would change nothing.
///
/// An action passes when it can target someone other than the user, when it
/// heals and the user is hurt, or when it grants any attribute modifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuffSelfCheck;

impl ActionValidityCheck for BuffSelfCheck {
    fn can_perform(
        &self,
        repository: &ObjectRepository,
        actor_id: &BattleSquaddieId,
        action_template: &ActionTemplate,
    ) -> Result<ActionValidity, RepositoryError> {
        if !action_template.targets_only_self() {
            return Ok(ActionValidity::valid());
        }

        let (template, actor) = repository.get_squaddie_by_battle_id(actor_id)?;
        let heals = action_template.is_healing();
        if heals && actor.damage_taken() > 0 {
            return Ok(ActionValidity::valid());
        }

        let grants_modifiers = action_template
            .effects()
            .iter()
            .any(|effect| !effect.attribute_modifiers.is_empty());
        if grants_modifiers {
            return Ok(ActionValidity::valid());
        }

        let message = if heals {
            format!("{} is already at full health", template.name)
        } else {
            format!("Will have no effect on {}", template.name)
        };
        Ok(ActionValidity::invalid(ActionValidityReason::BuffHasNoEffect, message))
    }
}
