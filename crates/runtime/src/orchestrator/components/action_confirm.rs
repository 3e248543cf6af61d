use battle_core::DecisionAction;

use crate::error::Result;
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::player_action_target::{ButtonArea, ButtonStatus, UiButton};
use crate::state::BattleState;

/// Shows the forecast and waits for the player to commit to the action.
#[derive(Debug)]
pub struct ActionConfirm {
    confirm_button: UiButton,
}

impl Default for ActionConfirm {
    fn default() -> Self {
        Self {
            confirm_button: UiButton::new("Confirm", ButtonArea::new(540.0, 640.0, 120.0, 40.0)),
        }
    }
}

impl ActionConfirm {
    fn cancel(&self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        let targets_only_self = match state.decision_step.action() {
            Some(DecisionAction::ActionTemplate(action_template_id)) => state
                .repository
                .get_action_template_by_id(action_template_id)?
                .targets_only_self(),
            _ => false,
        };
        let message = if targets_only_self {
            BattleMessage::PlayerCancelsPlayerActionConsiderations
        } else {
            BattleMessage::PlayerCancelsTargetConfirmation
        };
        context.message_board.send_message(state, message)
    }
}

impl OrchestratorComponent for ActionConfirm {
    fn name(&self) -> &'static str {
        "ActionConfirm"
    }

    fn update(&mut self, state: &mut BattleState, _context: &mut OrchestratorContext<'_>) -> Result<()> {
        let disabled = !state.decision_step.is_target_considered();
        if disabled != (self.confirm_button.status() == ButtonStatus::Disabled) {
            self.confirm_button.set_disabled(disabled);
        }
        Ok(())
    }

    fn ui_control_settings(&self, _state: &BattleState) -> UiControlSettings {
        UiControlSettings::new(true, false)
    }

    fn mouse_event_happened(
        &mut self,
        state: &mut BattleState,
        event: MouseEvent,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        if event.is_release_of(MouseButton::Cancel) {
            return self.cancel(state, context);
        }
        if self.confirm_button.handle(&event) {
            context
                .message_board
                .send_message(state, BattleMessage::PlayerConfirmsAction)?;
        }
        Ok(())
    }

    fn key_event_happened(
        &mut self,
        state: &mut BattleState,
        event: KeyEvent,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        match event {
            KeyEvent::Accept => context
                .message_board
                .send_message(state, BattleMessage::PlayerConfirmsAction),
            KeyEvent::Cancel => self.cancel(state, context),
            _ => Ok(()),
        }
    }

    fn has_completed(&self, state: &BattleState) -> bool {
        state.decision_step.is_target_confirmed() || !state.decision_step.is_target_considered()
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        let step = &state.decision_step;
        let next_mode = if step.is_target_confirmed() {
            BattleOrchestratorMode::PlayerHudController
        } else if step.is_action_set() {
            BattleOrchestratorMode::PlayerSquaddieTarget
        } else {
            BattleOrchestratorMode::PlayerSquaddieSelector
        };
        RecommendedStateChanges::next(next_mode).with_display_map(true)
    }

    fn reset(&mut self, _state: &mut BattleState) {
        *self = Self::default();
    }
}
