use crate::error::{Result, RuntimeError};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

/// Animates battle actions that target the map rather than a squaddie.
/// Ending a turn is the only such action.
#[derive(Debug, Default)]
pub struct SquaddieUsesActionOnMap {
    frames_remaining: Option<u32>,
    finished: bool,
}

impl OrchestratorComponent for SquaddieUsesActionOnMap {
    fn name(&self) -> &'static str {
        "SquaddieUsesActionOnMap"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        if state.recorder.is_animation_queue_empty() {
            return Err(RuntimeError::invariant(self.name(), "animation queue is empty"));
        }
        let frames_remaining = self.frames_remaining.get_or_insert(context.config.end_turn_frames);
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
    }

    fn reset(&mut self, _state: &mut BattleState) {
        *self = Self::default();
    }
}
