use tracing::debug;

use crate::error::{Result, RuntimeError};
use crate::state::BattleState;

use super::{BattleMessage, MessageBoard, MessageListener};

/// Moves the animating battle action to the already-animated queue.
#[derive(Debug, Default)]
pub struct BattleActionListener;

impl MessageListener for BattleActionListener {
    fn name(&self) -> &'static str {
        "battle_action"
    }

    fn receive_message(
        &self,
        _board: &MessageBoard,
        state: &mut BattleState,
        message: &BattleMessage,
    ) -> Result<()> {
        if !matches!(message, BattleMessage::BattleActionFinishesAnimation) {
            return Ok(());
        }
        let finished = state
            .recorder
            .battle_action_finished_animating()
            .ok_or_else(|| RuntimeError::invariant(self.name(), "animation queue is empty"))?;
        debug!(
            target: "battle::message_board",
            battle_squaddie_id = %finished.actor,
            "battle action finished animating"
        );
        Ok(())
    }
}
