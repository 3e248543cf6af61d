use std::rc::Rc;

use battle_core::{ActionTemplateId, HexCoordinate, TargetingService};
use tracing::{debug, warn};

use crate::error::Result;
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;
use crate::strategy::{ComputerDecision, TeamStrategy};

/// Makes one decision for the next ready squaddie of a computer-controlled
/// team, sending the same messages a player would.
pub struct ComputerSquaddieSelector {
    strategy: Box<dyn TeamStrategy>,
    targeting: Rc<dyn TargetingService>,
    decided: bool,
}

impl ComputerSquaddieSelector {
    pub fn new(strategy: Box<dyn TeamStrategy>, targeting: Rc<dyn TargetingService>) -> Self {
        Self {
            strategy,
            targeting,
            decided: false,
        }
    }

    fn use_action(
        &self,
        state: &mut BattleState,
        context: &mut OrchestratorContext<'_>,
        action_template_id: ActionTemplateId,
        coordinate: HexCoordinate,
    ) -> Result<()> {
        let board = context.message_board;
        board.send_message(
            state,
            BattleMessage::PlayerSelectsActionThatRequiresATarget {
                action_template_id: action_template_id.clone(),
            },
        )?;
        if !state.decision_step.is_action_set() {
            warn!(target: "battle::orchestrator", %action_template_id, "computer action rejected");
            return board.send_message(state, BattleMessage::PlayerEndsTurn);
        }

        board.send_message(state, BattleMessage::PlayerSelectsTargetCoordinate { coordinate })?;
        if !state.decision_step.is_target_considered() {
            warn!(target: "battle::orchestrator", %action_template_id, %coordinate, "computer target rejected");
            board.send_message(state, BattleMessage::PlayerCancelsTargetSelection)?;
            return board.send_message(state, BattleMessage::PlayerEndsTurn);
        }
        board.send_message(state, BattleMessage::PlayerConfirmsAction)
    }
}

impl OrchestratorComponent for ComputerSquaddieSelector {
    fn name(&self) -> &'static str {
        "ComputerSquaddieSelector"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.decided {
            return Ok(());
        }
        let Some(affiliation) = state.phase.current_affiliation else {
            return Ok(());
        };
        let Some(actor) = state.squaddies_ready_to_act(affiliation).into_iter().next() else {
            return Ok(());
        };
        context.message_board.send_message(
            state,
            BattleMessage::PlayerConfirmsDecisionStepActor {
                battle_squaddie_id: actor.clone(),
            },
        )?;

        let decision = self.strategy.decide(state, &actor, self.targeting.as_ref())?;
        debug!(
            target: "battle::orchestrator",
            strategy = self.strategy.name(),
            battle_squaddie_id = %actor,
            ?decision,
            "computer decision"
        );
        match decision {
            ComputerDecision::UseAction {
                action_template_id,
                target_coordinate,
            } => self.use_action(state, context, action_template_id, target_coordinate)?,
            ComputerDecision::Move { destination } => {
                context
                    .message_board
                    .send_message(state, BattleMessage::PlayerMovesSquaddie { destination })?;
                if !state.decision_step.is_action_set() {
                    context
                        .message_board
                        .send_message(state, BattleMessage::PlayerEndsTurn)?;
                }
            }
            ComputerDecision::EndTurn => context
                .message_board
                .send_message(state, BattleMessage::PlayerEndsTurn)?,
        }
        state.popup = None;
        self.decided = true;
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, false)
    }

    fn has_completed(&self, state: &BattleState) -> bool {
        self.decided
            || state
                .phase
                .current_affiliation
                .is_none_or(|affiliation| state.squaddies_ready_to_act(affiliation).is_empty())
    }

    fn recommend_state_changes(&self, _state: &BattleState) -> RecommendedStateChanges {
        let next_mode = if self.decided {
            BattleOrchestratorMode::PlayerHudController
        } else {
            BattleOrchestratorMode::PhaseController
        };
        RecommendedStateChanges::next(next_mode).with_display_map(true)
    }

    fn reset(&mut self, _state: &mut BattleState) {
        self.decided = false;
    }
}
