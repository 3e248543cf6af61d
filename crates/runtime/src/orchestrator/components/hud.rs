use battle_core::{BattleActionEffect, DecisionAction, SquaddieAffiliation};

use crate::error::Result;
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

use super::selector_for;

/// Hub between decisions and animations.
///
/// Sends queued battle actions to the mode that animates them. Once the
/// queue drains, it closes the finished decision step and hands control to
/// whoever acts next.
#[derive(Debug)]
pub struct PlayerHudController {
    autoplay_player: bool,
    processed: bool,
}

impl PlayerHudController {
    pub fn new(autoplay_player: bool) -> Self {
        Self {
            autoplay_player,
            processed: false,
        }
    }

    fn close_finished_decision_step(
        &self,
        state: &mut BattleState,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        let step = &state.decision_step;
        let finished = step.is_target_confirmed() || matches!(step.action(), Some(DecisionAction::EndTurn));
        let Some(actor) = step.actor().cloned().filter(|_| finished) else {
            return Ok(());
        };
        state.decision_step.clear();

        let (template, squaddie) = state.repository.get_squaddie_by_battle_id(&actor)?;
        if template.affiliation != SquaddieAffiliation::Player || self.autoplay_player {
            return Ok(());
        }
        let message = if squaddie.is_alive() && squaddie.turn.has_action_points_remaining() {
            BattleMessage::PlayerConfirmsDecisionStepActor {
                battle_squaddie_id: actor,
            }
        } else {
            BattleMessage::PlayerCanControlDifferentSquaddie
        };
        context.message_board.send_message(state, message)
    }
}

impl OrchestratorComponent for PlayerHudController {
    fn name(&self) -> &'static str {
        "PlayerHudController"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.processed {
            return Ok(());
        }
        self.processed = true;
        if state.recorder.is_animation_queue_empty() {
            self.close_finished_decision_step(state, context)?;
        }
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, true)
    }

    fn has_completed(&self, _state: &BattleState) -> bool {
        self.processed
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        let next_mode = match state.recorder.peek_at_animation_queue().map(|action| &action.effect) {
            Some(BattleActionEffect::Squaddie { .. }) => BattleOrchestratorMode::SquaddieUsesActionOnSquaddie,
            Some(BattleActionEffect::Movement { .. }) => BattleOrchestratorMode::SquaddieMover,
            Some(BattleActionEffect::EndTurn) => BattleOrchestratorMode::SquaddieUsesActionOnMap,
            None => match state.phase.current_affiliation {
                Some(affiliation) if !state.squaddies_ready_to_act(affiliation).is_empty() => {
                    selector_for(affiliation, self.autoplay_player)
                }
                _ => BattleOrchestratorMode::PhaseController,
            },
        };
        RecommendedStateChanges::next(next_mode)
            .with_display_map(true)
            .checking_mission_objectives()
    }

    fn reset(&mut self, _state: &mut BattleState) {
        self.processed = false;
    }
}
