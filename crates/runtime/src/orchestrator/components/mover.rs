use battle_core::BattleActionEffect;
use tracing::debug;

use crate::error::{Result, RuntimeError};
use crate::message_board::BattleMessage;
use crate::orchestrator::{
    BattleOrchestratorMode, OrchestratorComponent, OrchestratorContext, RecommendedStateChanges,
    UiControlSettings,
};
use crate::state::BattleState;

/// Animates the movement at the head of the animation queue, then places
/// the squaddie on its destination.
#[derive(Debug, Default)]
pub struct SquaddieMover {
    frames_remaining: Option<u32>,
    finished: bool,
}

impl OrchestratorComponent for SquaddieMover {
    fn name(&self) -> &'static str {
        "SquaddieMover"
    }

    fn update(&mut self, state: &mut BattleState, context: &mut OrchestratorContext<'_>) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        let head = state
            .recorder
            .peek_at_animation_queue()
            .ok_or_else(|| RuntimeError::invariant(self.name(), "animation queue is empty"))?;
        let BattleActionEffect::Movement { start, end } = head.effect else {
            return Err(RuntimeError::invariant(
                self.name(),
                "animation queue head is not a movement",
            ));
        };

        let frames_remaining = self
            .frames_remaining
            .get_or_insert(start.distance_to(&end) * context.config.move_frames_per_tile);
        if *frames_remaining > 0 {
            *frames_remaining -= 1;
            return Ok(());
        }

        let actor = head.actor.clone();
        state.map.move_squaddie(&actor, end)?;
        debug!(target: "battle::orchestrator", battle_squaddie_id = %actor, %start, %end, "squaddie moved");
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
        RecommendedStateChanges::next(BattleOrchestratorMode::PlayerHudController).with_display_map(true)
    }

    fn reset(&mut self, _state: &mut BattleState) {
        *self = Self::default();
    }
}
