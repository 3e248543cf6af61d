use battle_core::{
    ActionCalculator, BattleActionAction, BattleActionEffect, DiceRoller, EffectRequest,
    apply_results,
};
use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

const COMPONENT: &str = "SquaddieUsesActionOnSquaddie";

/// Resolves and animates the squaddie effect at the head of the queue.
///
/// Effects are rolled only when they reach the head, so an effect sees the
/// results of every effect animated before it.
#[derive(Debug, Default)]
pub struct SquaddieUsesActionOnSquaddie {
    frames_remaining: Option<u32>,
    finished: bool,
}

impl OrchestratorComponent for SquaddieUsesActionOnSquaddie {
    fn name(&self) -> &'static str {
        COMPONENT
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        if self.frames_remaining.is_none() {
            resolve_animation_queue_head(state, &mut *context.dice)?;
        }
        let frames_remaining = self
            .frames_remaining
            .get_or_insert(context.config.action_animation_frames);
        if *frames_remaining > 0 {
            *frames_remaining -= 1;
            return Ok(());
        }
        context
            .message_board
            .send_message(state, BattleMessage::BattleActionFinishesAnimation)?;
        self.finished = true;
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, false)
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        self.finished
    }

    fn recommend_state_changes(&self, _state: &BattleState) -> RecommendedStateChanges {
        RecommendedStateChanges::next(BattleOrchestratorMode::PlayerHudController)
            .checking_mission_objectives()
    }

    fn reset(&mut self, _state: &mut BattleState) {
        *self = Self::default();
    }
}

/// Rolls the head effect against the repository as it stands now, applies
/// the changes and records them on the battle action.
pub(crate) fn resolve_animation_queue_head(state: &mut BattleState, dice: &mut dyn DiceRoller) -> Result<()> {
    let head = state
        .recorder
        .peek_at_animation_queue()
        .ok_or_else(|| RuntimeError::invariant(COMPONENT, "animation queue is empty"))?;
    if !head.needs_resolution() {
        return Ok(());
    }
    let (
        BattleActionAction::ActionTemplate { id, effect_index },
        BattleActionEffect::Squaddie { target_ids, .. },
    ) = (&head.action, &head.effect)
    else {
        return Err(RuntimeError::invariant(
            COMPONENT,
            "animation queue head is not a squaddie effect",
        ));
    };
    let actor = head.actor.clone();
    let action_template_id = id.clone();
    let effect_index = *effect_index;
    let target_ids: Vec<_> = target_ids
        .iter()
        .filter(|target_id| {
            state
                .repository
                .get_squaddie_by_battle_id(target_id)
                .is_ok_and(|(_, squaddie)| squaddie.is_alive())
        })
        .cloned()
        .collect();
    let multiple_attack_penalty = head.actor_context.multiple_attack_penalty;

    let resolution = {
        let action_template = state.repository.get_action_template_by_id(&action_template_id)?;
        ActionCalculator::new(&state.repository, &state.config).calculate_results(
            &EffectRequest {
                actor_id: &actor,
                action_template,
                effect_index,
                target_ids: &target_ids,
                multiple_attack_penalty,
            },
            dice,
        )?
    };
    apply_results(&mut state.repository, &resolution.changes)?;

    for change in &resolution.changes {
        let granted: Vec<String> = change
            .attribute_modifiers_granted
            .iter()
            .map(|modifier| modifier.readable_description())
            .collect();
        info!(
            target: "battle::orchestrator",
            battle_squaddie_id = %actor,
            target = %change.battle_squaddie_id,
            action_template_id = %action_template_id,
            degree = %change.degree_of_success,
            damage = change.damage.net,
            healing = change.healing_received,
            hit_points = change.attributes_after.hit_points,
            granted = ?granted,
            "effect resolved"
        );
        let (_, target) = state.repository.get_squaddie_by_battle_id(&change.battle_squaddie_id)?;
        if target.is_dead() && state.map.remove_squaddie(&change.battle_squaddie_id).is_some() {
            info!(target: "battle::orchestrator", battle_squaddie_id = %change.battle_squaddie_id, "squaddie defeated");
        }
    }

    let head = state
        .recorder
        .animation_queue_head_mut()
        .ok_or_else(|| RuntimeError::invariant(COMPONENT, "animation queue is empty"))?;
    head.actor_context = resolution.actor_context;
    if let BattleActionEffect::Squaddie { changes, .. } = &mut head.effect {
        *changes = Some(resolution.changes);
    }
    Ok(())
}
