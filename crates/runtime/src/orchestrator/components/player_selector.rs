use battle_core::{DecisionAction, SquaddieAffiliation};

use crate::error::Result;
use crate::input::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

/// Lets the player pick a squaddie and an action for it.
///
/// Clicking a player squaddie locks it; clicking anyone else only peeks.
/// Clicking an empty tile with a squaddie locked moves there.
#[derive(Debug, Default)]
pub struct PlayerSquaddieSelector;

impl PlayerSquaddieSelector {
    fn select_action(
        &self,
        state: &mut BattleState,
        context: &mut OrchestratorContext<'_>,
        index: usize,
    ) -> Result<()> {
        let Some(actor) = state.decision_step.actor().cloned() else {
            return Ok(());
        };
        let (template, _) = state.repository.get_squaddie_by_battle_id(&actor)?;
        let Some(action_template_id) = template.action_template_ids.get(index).cloned() else {
            return Ok(());
        };
        let action_template = state.repository.get_action_template_by_id(&action_template_id)?;

        let message = match state.map.location_of(&actor) {
            Some(target_coordinate) if action_template.targets_only_self() => {
                BattleMessage::PlayerSelectsActionWithKnownTargets {
                    action_template_id,
                    target_coordinate,
                }
            }
            _ => BattleMessage::PlayerSelectsActionThatRequiresATarget { action_template_id },
        };
        context.message_board.send_message(state, message)
    }
}

impl OrchestratorComponent for PlayerSquaddieSelector {
    fn name(&self) -> &'static str {
        "PlayerSquaddieSelector"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if !state.decision_step.is_actor_set()
            && !state.squaddies_ready_to_act(SquaddieAffiliation::Player).is_empty()
        {
            context
                .message_board
                .send_message(state, BattleMessage::SelectAndLockNextSquaddie)?;
        }
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, true)
    }

    fn mouse_event_happened(
        &mut self,
        state: &mut BattleState,
        event: MouseEvent,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        if event.is_release_of(MouseButton::Cancel) {
            return context
                .message_board
                .send_message(state, BattleMessage::PlayerCancelsSquaddieSelection);
        }
        let Some(coordinate) = event.coordinate else {
            return Ok(());
        };
        let occupant = state.map.squaddie_at(&coordinate).cloned();

        if event.kind == MouseEventKind::Move {
            return context.message_board.send_message(
                state,
                BattleMessage::PlayerPeeksAtSquaddie {
                    battle_squaddie_id: occupant,
                },
            );
        }
        if !event.is_release_of(MouseButton::Accept) {
            return Ok(());
        }

        let message = match occupant {
            Some(battle_squaddie_id)
                if state.repository.affiliation_of(&battle_squaddie_id)?
                    == SquaddieAffiliation::Player =>
            {
                BattleMessage::PlayerSelectsAndLocksSquaddie { battle_squaddie_id }
            }
            Some(battle_squaddie_id) => BattleMessage::PlayerPeeksAtSquaddie {
                battle_squaddie_id: Some(battle_squaddie_id),
            },
            None if state.decision_step.is_actor_set() => {
                BattleMessage::PlayerMovesSquaddie { destination: coordinate }
            }
            None => return Ok(()),
        };
        context.message_board.send_message(state, message)
    }

    fn key_event_happened(
        &mut self,
        state: &mut BattleState,
        event: KeyEvent,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        match event {
            KeyEvent::NextSquaddie => context
                .message_board
                .send_message(state, BattleMessage::SelectAndLockNextSquaddie),
            KeyEvent::SelectAction(index) => self.select_action(state, context, index),
            KeyEvent::EndTurn if state.decision_step.is_actor_set() => context
                .message_board
                .send_message(state, BattleMessage::PlayerEndsTurn),
            KeyEvent::Cancel => context
                .message_board
                .send_message(state, BattleMessage::PlayerCancelsSquaddieSelection),
            KeyEvent::EndTurn | KeyEvent::Accept => Ok(()),
        }
    }

    fn has_completed(&self, state: &BattleState) -> bool {
        state.decision_step.is_action_set()
            || state.squaddies_ready_to_act(SquaddieAffiliation::Player).is_empty()
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        let step = &state.decision_step;
        let next_mode = match step.action() {
            None => BattleOrchestratorMode::PhaseController,
            Some(DecisionAction::EndTurn | DecisionAction::Movement) => {
                BattleOrchestratorMode::PlayerHudController
            }
            Some(DecisionAction::ActionTemplate(_)) if step.is_target_confirmed() => {
                BattleOrchestratorMode::PlayerHudController
            }
            Some(DecisionAction::ActionTemplate(_)) if step.is_target_considered() => {
                BattleOrchestratorMode::PlayerActionConfirm
            }
            Some(DecisionAction::ActionTemplate(_)) => BattleOrchestratorMode::PlayerSquaddieTarget,
        };
        RecommendedStateChanges::next(next_mode).with_display_map(true)
    }
}
