use std::rc::Rc;

use battle_core::TargetingService;

use crate::error::Result;
use crate::input::{KeyEvent, MouseButton, MouseEvent};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::player_action_target::{PlayerActionTargetState, PlayerActionTargetStateMachine, PlayerInput};
use crate::state::BattleState;

/// Picks the target of the chosen action.
///
/// [`PlayerActionTargetStateMachine`] runs first. When it hands over to the
/// legacy selector, the player clicks a tile to consider a target.
pub struct PlayerSquaddieTarget {
    machine: PlayerActionTargetStateMachine,
}

impl PlayerSquaddieTarget {
    pub fn new(targeting: Rc<dyn TargetingService>) -> Self {
        Self {
            machine: PlayerActionTargetStateMachine::new(targeting),
        }
    }

    pub fn machine(&self) -> &PlayerActionTargetStateMachine {
        &self.machine
    }

    fn uses_legacy_selector(&self) -> bool {
        self.machine.context().use_legacy_selector
    }
}

impl OrchestratorComponent for PlayerSquaddieTarget {
    fn name(&self) -> &'static str {
        "PlayerSquaddieTarget"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.uses_legacy_selector() {
            return Ok(());
        }
        self.machine.drive(state, context.message_board)
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
        if !self.uses_legacy_selector() {
            self.machine.queue_input(PlayerInput::Mouse(event));
            return Ok(());
        }
        if event.is_release_of(MouseButton::Cancel) {
            return context
                .message_board
                .send_message(state, BattleMessage::PlayerCancelsTargetSelection);
        }
        match event.coordinate {
            Some(coordinate) if event.is_release_of(MouseButton::Accept) => context
                .message_board
                .send_message(state, BattleMessage::PlayerSelectsTargetCoordinate { coordinate }),
            _ => Ok(()),
        }
    }

    fn key_event_happened(
        &mut self,
        state: &mut BattleState,
        event: KeyEvent,
        context: &mut OrchestratorContext<'_>,
    ) -> Result<()> {
        if !self.uses_legacy_selector() {
            self.machine.queue_input(PlayerInput::Key(event));
            return Ok(());
        }
        if event == KeyEvent::Cancel {
            context
                .message_board
                .send_message(state, BattleMessage::PlayerCancelsTargetSelection)?;
        }
        Ok(())
    }

    fn has_completed(&self, state: &BattleState) -> bool {
        if self.uses_legacy_selector() {
            state.decision_step.is_target_considered() || !state.decision_step.is_action_set()
        } else {
            self.machine.state() == PlayerActionTargetState::Finished
        }
    }

    fn recommend_state_changes(&self, state: &BattleState) -> RecommendedStateChanges {
        let step = &state.decision_step;
        let next_mode = if step.is_target_confirmed() {
            BattleOrchestratorMode::PlayerHudController
        } else if step.is_target_considered() {
            BattleOrchestratorMode::PlayerActionConfirm
        } else {
            BattleOrchestratorMode::PlayerSquaddieSelector
        };
        RecommendedStateChanges::next(next_mode).with_display_map(true)
    }

    fn reset(&mut self, _state: &mut BattleState) {
        self.machine.reset();
    }
}
